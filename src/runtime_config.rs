//! Environment variable-based runtime configuration.
//!
//! `TEMPLAR_STACK_SIZE` sets the stack size for the coroutines the
//! transport engine runs handlers on, in decimal (`16384`) or hex
//! (`0x4000`). Larger stacks support deeper call chains; smaller stacks
//! keep memory down when many connections are in flight. Default: 16 KB.

use std::env;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeConfig {
    /// Stack size for coroutines in bytes (default: 16 KB / 0x4000)
    pub stack_size: usize,
}

impl RuntimeConfig {
    const DEFAULT_STACK_SIZE: usize = 0x4000;

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let stack_size = match env::var("TEMPLAR_STACK_SIZE") {
            Ok(val) => {
                if let Some(hex) = val.strip_prefix("0x") {
                    usize::from_str_radix(hex, 16).unwrap_or(Self::DEFAULT_STACK_SIZE)
                } else {
                    val.parse().unwrap_or(Self::DEFAULT_STACK_SIZE)
                }
            }
            Err(_) => Self::DEFAULT_STACK_SIZE,
        };
        RuntimeConfig { stack_size }
    }
}

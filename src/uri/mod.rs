//! # URI Module
//!
//! Percent-encoding and URI-template primitives used by the router.
//!
//! The two submodules are deliberately free of any transport or registry
//! state so they can be tested and reused in isolation:
//!
//! - [`codec`] - percent-escaping of path octets (`%XX` triplets)
//! - [`template`] - template validation, priority calculation, path
//!   matching and path-variable extraction

pub mod codec;
pub mod template;

pub use template::PathVars;

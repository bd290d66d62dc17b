//! # Dispatcher Module
//!
//! Orchestrates one request: finds the best endpoint for the method and
//! path, binds the winning template to the request context, invokes the
//! handler and reports its [`Disposition`](crate::handler::Disposition) back
//! to the transport. Routing misses fall back to the error-handler table, or
//! to a synthesized default response when no fallback is registered.

mod core;

pub use core::{Dispatcher, ErrorHandlerTable, NOT_FOUND};

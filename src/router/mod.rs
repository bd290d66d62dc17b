//! # Router Module
//!
//! The endpoint registry: an ordered collection of
//! (method, template, handler) records ranked by template specificity.
//!
//! ## Overview
//!
//! The registry is responsible for:
//! - Computing each template's priority at registration time
//! - Keeping endpoints sorted by descending priority, with ties broken by
//!   registration order
//! - Finding the best (first) matching endpoint for a method and path
//!
//! ## Matching
//!
//! Lookup is a linear scan in priority order; the first endpoint whose
//! method and template match wins. Registration is the slow path: an
//! insertion locates its slot with a binary search and shifts the tail,
//! which is acceptable because routes are registered at startup, not per
//! request.

mod core;

pub use core::{Endpoint, EndpointRegistry, RouterError};

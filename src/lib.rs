//! # Templar
//!
//! **Templar** is a URI-template request router and dispatcher for
//! coroutine HTTP services built on the `may` runtime.
//!
//! ## Overview
//!
//! Routes are registered as URI templates with literal segments, single
//! captures (`{name}`, one non-empty path segment) and a trailing variadic
//! capture (`{name}*`, the joined remainder of the path). Overlapping
//! templates are disambiguated by a specificity priority computed at
//! registration time; equal priorities fall back to registration order, so
//! dispatch is deterministic.
//!
//! ## Architecture
//!
//! - **[`uri`]** - percent codec and template matching primitives
//! - **[`router`]** - the priority-ordered endpoint registry
//! - **[`dispatcher`]** - per-request orchestration and error fallbacks
//! - **[`server`]** - the `may_minihttp` transport adapter
//! - **[`runtime_config`]** - environment-driven runtime settings
//!
//! The routing core is synchronous and transport-free: it consumes a method
//! and a raw request path and produces a buffered response plus a
//! [`Disposition`] telling the transport whether the connection survives.
//! Sockets, TLS and timeouts belong to the transport engine.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::{Arc, RwLock};
//! use templar::{Dispatcher, Disposition, server::{AppService, HttpServer}};
//!
//! let mut dispatcher = Dispatcher::new();
//! dispatcher
//!     .add_endpoint(http::Method::GET, "/api/hello/{name}", |req, res| {
//!         let greeting = format!("Hello, {}", req.path_var("name").unwrap_or("stranger"));
//!         res.write(greeting);
//!         Disposition::Keep
//!     })
//!     .expect("valid template");
//!
//! let service = AppService::new(Arc::new(RwLock::new(dispatcher)));
//! let handle = HttpServer(service).start("0.0.0.0:8080").expect("bind");
//! handle.join().unwrap();
//! ```

pub mod dispatcher;
pub mod handler;
pub mod request;
pub mod response;
pub mod router;
pub mod runtime_config;
pub mod server;
pub mod uri;

pub use dispatcher::{Dispatcher, ErrorHandlerTable, NOT_FOUND};
pub use handler::{Disposition, EndpointHandler, ErrorHandler};
pub use request::Request;
pub use response::Response;
pub use router::{Endpoint, EndpointRegistry, RouterError};
pub use runtime_config::RuntimeConfig;
pub use uri::PathVars;

//! # Server Module
//!
//! Adapter between the routing core and the `may_minihttp` transport
//! engine. The engine owns the sockets, the accept loop and HTTP parsing;
//! this module extracts the method, path, headers and body from each raw
//! request, hands them to the [`Dispatcher`](crate::Dispatcher), and encodes
//! the buffered response back onto the wire.

mod http_server;
mod request;
mod response;
mod service;

pub use http_server::{HttpServer, ServerHandle};
pub use request::{parse_request, ParsedRequest};
pub use response::write_response;
pub use service::AppService;

//! Handler types shared by the registry and the dispatcher.

use crate::request::Request;
use crate::response::Response;

/// Outcome a handler reports back to the transport.
///
/// `Keep` leaves the underlying connection open for further requests;
/// `Close` asks the transport to tear it down and is reserved for
/// unrecoverable handler failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Keep,
    Close,
}

/// Callable invoked for a matched endpoint.
///
/// The handler receives the request context (path variables, query
/// parameters, headers, body) and a buffered response to write into, and
/// reports a [`Disposition`] for the connection.
pub type EndpointHandler = Box<dyn Fn(&mut Request, &mut Response) -> Disposition + Send + Sync>;

/// Fallback callable invoked for a well-known error code when no endpoint
/// matches; receives the code it was registered under.
pub type ErrorHandler = Box<dyn Fn(&mut Request, &mut Response, u16) -> Disposition + Send + Sync>;

use http::Method;
use tracing::{debug, info, warn};

use crate::handler::{Disposition, EndpointHandler, ErrorHandler};
use crate::request::Request;
use crate::response::Response;
use crate::router::{EndpointRegistry, RouterError};

/// Error code consulted on a routing miss.
pub const NOT_FOUND: u16 = 404;

/// Fallback handlers keyed by error code.
///
/// Backed by a vector rather than a map to keep the footprint small; the
/// table holds a handful of entries at most. At most one handler per code:
/// setting a code again replaces the earlier handler.
#[derive(Default)]
pub struct ErrorHandlerTable {
    entries: Vec<(u16, ErrorHandler)>,
}

impl ErrorHandlerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `handler` for `code`, replacing any existing one.
    pub fn set(&mut self, code: u16, handler: ErrorHandler) {
        match self.entries.iter_mut().find(|(c, _)| *c == code) {
            Some(entry) => entry.1 = handler,
            None => self.entries.push((code, handler)),
        }
    }

    /// Removes the handler for `code`, if present.
    pub fn remove(&mut self, code: u16) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(c, _)| *c != code);
        self.entries.len() != before
    }

    /// Returns the handler for `code`, or none.
    pub fn find(&self, code: u16) -> Option<&ErrorHandler> {
        self.entries.iter().find(|(c, _)| *c == code).map(|(_, h)| h)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Routes one request to its handler.
///
/// Owns the endpoint registry and the error-handler table. Neither is
/// internally synchronized: registration is expected to happen while the
/// server is not dispatching, or under external mutual exclusion supplied by
/// the caller (the server adapter wraps the dispatcher in a lock).
#[derive(Default)]
pub struct Dispatcher {
    registry: EndpointRegistry,
    error_handlers: ErrorHandlerTable,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for `method` and `template`.
    ///
    /// # Errors
    ///
    /// Propagates [`RouterError`] for invalid templates and unsupported
    /// methods; nothing is stored in either case.
    pub fn add_endpoint<H>(
        &mut self,
        method: Method,
        template: &str,
        handler: H,
    ) -> Result<(), RouterError>
    where
        H: Fn(&mut Request, &mut Response) -> Disposition + Send + Sync + 'static,
    {
        self.registry
            .add(method, template, Box::new(handler) as EndpointHandler)
    }

    /// Removes the first endpoint registered under exactly this method and
    /// template string; returns whether one was removed.
    pub fn remove_endpoint(&mut self, method: &Method, template: &str) -> bool {
        self.registry.remove(method, template)
    }

    /// Installs a fallback handler for an error code, replacing any
    /// existing one.
    pub fn set_error_handler<H>(&mut self, code: u16, handler: H)
    where
        H: Fn(&mut Request, &mut Response, u16) -> Disposition + Send + Sync + 'static,
    {
        debug!(code, "error handler installed");
        self.error_handlers.set(code, Box::new(handler) as ErrorHandler);
    }

    /// Removes the fallback handler for `code`, if present.
    pub fn remove_error_handler(&mut self, code: u16) -> bool {
        self.error_handlers.remove(code)
    }

    pub fn registry(&self) -> &EndpointRegistry {
        &self.registry
    }

    pub fn error_handlers(&self) -> &ErrorHandlerTable {
        &self.error_handlers
    }

    /// Runs one request to completion.
    ///
    /// Finds the highest-priority endpoint for the request's method and
    /// query-stripped path, binds the winning template to the request so
    /// path variables are derived from that exact template, and invokes the
    /// handler. On a miss the not-found fallback runs instead, or a default
    /// not-found response is synthesized.
    pub fn dispatch(&self, req: &mut Request, res: &mut Response) -> Disposition {
        match self.registry.find_match(req.method(), req.path()) {
            Some(endpoint) => {
                info!(
                    method = %req.method(),
                    path = req.path(),
                    template = endpoint.template(),
                    priority = endpoint.priority(),
                    "route matched"
                );
                req.bind_template(endpoint.template_arc());
                (endpoint.handler())(req, res)
            }
            None => {
                warn!(method = %req.method(), path = req.path(), "no route matched");
                match self.error_handlers.find(NOT_FOUND) {
                    Some(handler) => handler(req, res, NOT_FOUND),
                    None => {
                        // failure-free completion: the default response is
                        // written and the connection stays usable
                        res.not_found();
                        Disposition::Keep
                    }
                }
            }
        }
    }
}

use std::io;
use std::sync::{Arc, RwLock};

use may_minihttp::{HttpService, Request as HttpRequest, Response as HttpResponse};
use tracing::warn;

use super::request::parse_request;
use super::response::write_response;
use crate::dispatcher::Dispatcher;
use crate::handler::Disposition;
use crate::request::Request;
use crate::response::Response;

/// The service the transport engine drives, one call per request.
///
/// Holds the dispatcher behind a read-write lock: dispatch takes the read
/// side, and the lock is the external mutual exclusion the registry relies
/// on for mutation. Register endpoints before `start()`, or take the write
/// lock while the server is quiesced.
#[derive(Clone)]
pub struct AppService {
    pub dispatcher: Arc<RwLock<Dispatcher>>,
}

impl AppService {
    pub fn new(dispatcher: Arc<RwLock<Dispatcher>>) -> Self {
        Self { dispatcher }
    }
}

impl HttpService for AppService {
    fn call(&mut self, req: HttpRequest, res: &mut HttpResponse) -> io::Result<()> {
        let parsed = parse_request(req);

        let method = match parsed.method.parse::<http::Method>() {
            Ok(method) => method,
            Err(_) => {
                warn!(method = %parsed.method, "unparseable request method");
                let mut response = Response::new();
                response.error(400, "Unrecognized request method");
                write_response(res, response);
                return Ok(());
            }
        };

        let mut request = Request::new(method, parsed.target, parsed.headers, parsed.body);
        let mut response = Response::new();

        let disposition = self
            .dispatcher
            .read()
            .unwrap()
            .dispatch(&mut request, &mut response);

        write_response(res, response);

        match disposition {
            Disposition::Keep => Ok(()),
            Disposition::Close => {
                // unrecoverable handler failure: report it to the transport,
                // which owns failure reporting and connection teardown
                warn!(path = request.path(), "handler requested connection close");
                Err(io::Error::new(
                    io::ErrorKind::ConnectionAborted,
                    "handler requested connection close",
                ))
            }
        }
    }
}

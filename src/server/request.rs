use may_minihttp::Request;
use std::collections::HashMap;
use std::io::Read;
use tracing::debug;

/// Raw HTTP request data extracted from the transport, before it becomes a
/// routing [`Request`](crate::Request).
#[derive(Debug, PartialEq)]
pub struct ParsedRequest {
    /// HTTP method token as received (GET, POST, ...)
    pub method: String,
    /// Request target, query string included
    pub target: String,
    /// HTTP headers (lowercase names)
    pub headers: HashMap<String, String>,
    /// Request body, empty when none was sent
    pub body: Vec<u8>,
}

/// Extract method, target, headers and body from a `may_minihttp::Request`.
///
/// Header names are lowercased; the body is read to completion here because
/// the transport's body reader borrows the connection buffer.
pub fn parse_request(req: Request) -> ParsedRequest {
    let method = req.method().to_string();
    let target = req.path().to_string();

    let headers: HashMap<String, String> = req
        .headers()
        .iter()
        .map(|h| {
            (
                h.name.to_ascii_lowercase(),
                String::from_utf8_lossy(h.value).to_string(),
            )
        })
        .collect();

    let mut body = Vec::new();
    if req.body().read_to_end(&mut body).is_err() {
        body.clear();
    }

    debug!(
        method = %method,
        target = %target,
        header_count = headers.len(),
        body_bytes = body.len(),
        "http request parsed"
    );

    ParsedRequest {
        method,
        target,
        headers,
        body,
    }
}

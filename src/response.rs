//! Buffered response written by handlers.

use serde_json::json;

const SERVER_BANNER: &str = concat!("templar ", env!("CARGO_PKG_VERSION"));

/// Response under construction for one exchange.
///
/// Handlers write status, headers and body into this buffer; the transport
/// adapter encodes it onto the wire after the dispatcher returns. Starts out
/// as an empty `200`.
#[derive(Debug)]
pub struct Response {
    status: u16,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

impl Response {
    pub fn new() -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn set_status(&mut self, status: u16) {
        self.status = status;
    }

    /// Looks up a header set on this response (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Adds a header, replacing any existing header of the same name.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.into()));
    }

    /// Shorthand for setting the `Content-Type` header.
    pub fn set_type(&mut self, content_type: &str) {
        self.set_header("Content-Type", content_type);
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Appends data to the response body.
    pub fn write(&mut self, data: impl AsRef<[u8]>) {
        self.body.extend_from_slice(data.as_ref());
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Replaces the response with a JSON error body for `status`.
    pub fn error(&mut self, status: u16, message: &str) {
        self.status = status;
        self.set_type("application/json");
        self.body = json!({ "error": message }).to_string().into_bytes();
    }

    /// The synthesized default not-found response.
    pub fn not_found(&mut self) {
        self.error(404, "The requested resource cannot be found on this server");
        self.set_header("Server", SERVER_BANNER);
    }

    /// Decomposes the response for wire encoding.
    pub fn into_parts(self) -> (u16, Vec<(String, String)>, Vec<u8>) {
        (self.status, self.headers, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_append_to_the_body() {
        let mut res = Response::new();
        assert_eq!(res.status(), 200);
        res.write("hello, ");
        res.write(b"world");
        assert_eq!(res.body(), b"hello, world");
    }

    #[test]
    fn set_header_replaces_case_insensitively() {
        let mut res = Response::new();
        res.set_header("content-type", "text/plain");
        res.set_type("text/html");
        assert_eq!(res.headers().len(), 1);
        assert_eq!(res.header("Content-Type"), Some("text/html"));
    }

    #[test]
    fn error_builds_a_json_body() {
        let mut res = Response::new();
        res.write("partial");
        res.error(400, "bad input");
        assert_eq!(res.status(), 400);
        assert_eq!(res.header("Content-Type"), Some("application/json"));
        let body: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["error"], "bad input");
    }

    #[test]
    fn default_not_found_carries_the_banner() {
        let mut res = Response::new();
        res.not_found();
        assert_eq!(res.status(), 404);
        assert!(res.header("Server").unwrap().starts_with("templar "));
    }
}

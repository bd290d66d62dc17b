use may_minihttp::Response as HttpResponse;

use crate::response::Response;

fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        204 => "No Content",
        301 => "Moved Permanently",
        302 => "Found",
        304 => "Not Modified",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        408 => "Request Timeout",
        413 => "Payload Too Large",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "OK",
    }
}

/// Returns a static header line for the values handlers set constantly,
/// falling back to a leaked allocation for the rest. may_minihttp only
/// accepts `&'static str` header lines, so uncommon dynamic headers cost a
/// small one-time leak each.
fn header_line(name: &str, value: &str) -> &'static str {
    if name.eq_ignore_ascii_case("content-type") {
        match value {
            "application/json" => return "Content-Type: application/json",
            "application/octet-stream" => return "Content-Type: application/octet-stream",
            "text/plain" => return "Content-Type: text/plain",
            "text/html" => return "Content-Type: text/html",
            "text/css" => return "Content-Type: text/css",
            "text/javascript" => return "Content-Type: text/javascript",
            "image/png" => return "Content-Type: image/png",
            "image/x-icon" => return "Content-Type: image/x-icon",
            _ => {}
        }
    }
    Box::leak(format!("{name}: {value}").into_boxed_str())
}

/// Encode a buffered routing response onto the transport response.
pub fn write_response(out: &mut HttpResponse, response: Response) {
    let (status, headers, body) = response.into_parts();
    out.status_code(status as usize, status_reason(status));
    for (name, value) in &headers {
        out.header(header_line(name, value));
    }
    out.body_vec(body);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reasons_for_common_codes() {
        assert_eq!(status_reason(200), "OK");
        assert_eq!(status_reason(404), "Not Found");
        assert_eq!(status_reason(500), "Internal Server Error");
    }

    #[test]
    fn constant_content_types_do_not_allocate() {
        assert_eq!(
            header_line("Content-Type", "application/json"),
            "Content-Type: application/json"
        );
        assert_eq!(header_line("X-Custom", "v"), "X-Custom: v");
    }
}

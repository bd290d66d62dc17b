//! End-to-end tests driving the full stack over a live TCP socket:
//! HTTP request -> transport parse -> dispatch -> handler -> wire response.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use http::Method;
use templar::server::{AppService, HttpServer, ServerHandle};
use templar::{Dispatcher, Disposition};

fn start_server(configure: impl FnOnce(&mut Dispatcher)) -> (ServerHandle, SocketAddr) {
    may::config().set_stack_size(0x8000);

    let mut dispatcher = Dispatcher::new();
    configure(&mut dispatcher);
    let service = AppService::new(Arc::new(RwLock::new(dispatcher)));

    // bind to a random free port to avoid conflicts between tests
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let handle = HttpServer(service).start(addr).unwrap();
    handle.wait_ready().unwrap();
    (handle, addr)
}

fn send_request(addr: &SocketAddr, req: &str) -> String {
    let mut stream = TcpStream::connect(addr).unwrap();
    stream.write_all(req.as_bytes()).unwrap();
    stream
        .set_read_timeout(Some(Duration::from_millis(200)))
        .unwrap();
    let mut buf = Vec::new();
    loop {
        let mut tmp = [0u8; 1024];
        match stream.read(&mut tmp) {
            Ok(0) => break,
            Ok(n) => buf.extend_from_slice(&tmp[..n]),
            Err(ref e)
                if e.kind() == std::io::ErrorKind::WouldBlock
                    || e.kind() == std::io::ErrorKind::TimedOut =>
            {
                break
            }
            Err(e) => panic!("read error: {e:?}"),
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}

/// Splits a raw HTTP/1.1 response into (status, body).
fn parse_parts(resp: &str) -> (u16, String) {
    let (head, body) = resp.split_once("\r\n\r\n").unwrap_or((resp, ""));
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|code| code.parse().ok())
        .unwrap_or(0);
    (status, body.to_string())
}

fn demo_routes(dispatcher: &mut Dispatcher) {
    dispatcher
        .add_endpoint(Method::GET, "/api/hello/{username}", |req, res| {
            let username = req.path_var("username").unwrap_or_default().to_string();
            res.set_type("text/plain");
            res.write(format!("Hello, {username}"));
            Disposition::Keep
        })
        .unwrap();

    dispatcher
        .add_endpoint(Method::POST, "/api/echo", |req, res| {
            res.set_type("application/octet-stream");
            res.write(req.body());
            Disposition::Keep
        })
        .unwrap();

    dispatcher
        .add_endpoint(Method::GET, "/api/path/{path}*", |req, res| {
            let path = req.path_var("path").unwrap_or_default().to_string();
            res.set_type("text/plain");
            res.write(format!("Path: {path}"));
            Disposition::Keep
        })
        .unwrap();
}

#[test]
fn greets_by_path_variable() {
    let (handle, addr) = start_server(demo_routes);
    let resp = send_request(&addr, "GET /api/hello/jane HTTP/1.1\r\nHost: x\r\n\r\n");
    handle.stop();

    let (status, body) = parse_parts(&resp);
    assert_eq!(status, 200);
    assert_eq!(body, "Hello, jane");
}

#[test]
fn percent_escapes_decode_over_the_wire() {
    let (handle, addr) = start_server(demo_routes);
    let resp = send_request(&addr, "GET /api/hello/jane%20doe HTTP/1.1\r\nHost: x\r\n\r\n");
    handle.stop();

    let (status, body) = parse_parts(&resp);
    assert_eq!(status, 200);
    assert_eq!(body, "Hello, jane doe");
}

#[test]
fn echoes_a_posted_body() {
    let (handle, addr) = start_server(demo_routes);
    let resp = send_request(
        &addr,
        "POST /api/echo HTTP/1.1\r\nHost: x\r\nContent-Length: 11\r\n\r\nhello world",
    );
    handle.stop();

    let (status, body) = parse_parts(&resp);
    assert_eq!(status, 200);
    assert_eq!(body, "hello world");
}

#[test]
fn variadic_route_joins_segments_over_the_wire() {
    let (handle, addr) = start_server(demo_routes);
    let resp = send_request(&addr, "GET /api/path/a/b/c HTTP/1.1\r\nHost: x\r\n\r\n");
    handle.stop();

    let (status, body) = parse_parts(&resp);
    assert_eq!(status, 200);
    assert_eq!(body, "Path: a/b/c");
}

#[test]
fn query_strings_are_ignored_for_routing() {
    let (handle, addr) = start_server(demo_routes);
    let resp = send_request(&addr, "GET /api/hello/jane?verbose=1 HTTP/1.1\r\nHost: x\r\n\r\n");
    handle.stop();

    let (status, body) = parse_parts(&resp);
    assert_eq!(status, 200);
    assert_eq!(body, "Hello, jane");
}

#[test]
fn unknown_routes_get_the_default_not_found() {
    let (handle, addr) = start_server(demo_routes);
    let resp = send_request(&addr, "GET /does/not/exist HTTP/1.1\r\nHost: x\r\n\r\n");
    handle.stop();

    let (status, body) = parse_parts(&resp);
    assert_eq!(status, 404);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert!(json["error"].is_string());
}

#[test]
fn serves_files_through_a_variadic_catch_all() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>home</h1>").unwrap();
    std::fs::write(dir.path().join("app.css"), "body {}").unwrap();

    let base = dir.path().to_path_buf();
    let (handle, addr) = start_server(move |dispatcher| {
        dispatcher
            .add_endpoint(Method::GET, "/{file}*", move |req, res| {
                let mut file = req.path_var("file").unwrap_or_default().to_string();
                if file.is_empty() {
                    file = "index.html".to_string();
                }
                match std::fs::read(base.join(&file)) {
                    Ok(bytes) => {
                        res.set_type(if file.ends_with(".css") {
                            "text/css"
                        } else {
                            "text/html"
                        });
                        res.write(bytes);
                    }
                    Err(_) => res.not_found(),
                }
                Disposition::Keep
            })
            .unwrap();
    });

    let (status, body) = parse_parts(&send_request(&addr, "GET / HTTP/1.1\r\nHost: x\r\n\r\n"));
    assert_eq!(status, 200);
    assert_eq!(body, "<h1>home</h1>");

    let (status, body) =
        parse_parts(&send_request(&addr, "GET /app.css HTTP/1.1\r\nHost: x\r\n\r\n"));
    assert_eq!(status, 200);
    assert_eq!(body, "body {}");

    let (status, _) =
        parse_parts(&send_request(&addr, "GET /missing.js HTTP/1.1\r\nHost: x\r\n\r\n"));
    assert_eq!(status, 404);

    handle.stop();
}

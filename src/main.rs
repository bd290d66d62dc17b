//! Demo service wiring the router to the `may_minihttp` transport.
//!
//! Mirrors a small embedded-style file server: an echo endpoint, greeting
//! endpoints with path captures, and an optional static-file catch-all.

use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, RwLock};

use clap::Parser;
use http::Method;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use templar::server::{AppService, HttpServer};
use templar::{Dispatcher, Disposition, RuntimeConfig};

#[derive(Parser, Debug)]
#[command(name = "templar", about = "URI-template routing demo server")]
struct Args {
    /// Address to bind to
    #[arg(long, default_value = "0.0.0.0:8080")]
    addr: String,

    /// Directory to serve under the catch-all `/{file}*` route
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

/// Maps a `{file}*` capture into the static directory, refusing any
/// component that would escape it.
fn map_static_path(base: &Path, capture: &str) -> Option<PathBuf> {
    let mut path = base.to_path_buf();
    for component in Path::new(capture).components() {
        match component {
            Component::Normal(part) => path.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(path)
}

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()).unwrap_or("") {
        "html" => "text/html",
        "css" => "text/css",
        "js" => "text/javascript",
        "png" => "image/png",
        "ico" => "image/x-icon",
        _ => "application/octet-stream",
    }
}

fn register_routes(dispatcher: &mut Dispatcher, static_dir: Option<PathBuf>) -> anyhow::Result<()> {
    dispatcher.add_endpoint(Method::POST, "/api/echo", |req, res| {
        info!(bytes = req.body().len(), "POST /api/echo");
        res.set_type("application/octet-stream");
        res.write(req.body());
        Disposition::Keep
    })?;

    dispatcher.add_endpoint(Method::GET, "/api/hello/{username}", |req, res| {
        let username = req.path_var("username").unwrap_or_default().to_string();
        info!(%username, "GET /api/hello/{{username}}");
        res.set_type("text/plain");
        res.write(format!("Hello, {username}"));
        Disposition::Keep
    })?;

    dispatcher.add_endpoint(Method::GET, "/api/hello/{name}/{surname}", |req, res| {
        let vars = req.path_vars();
        let name = vars.get("name").map(String::as_str).unwrap_or_default();
        let surname = vars.get("surname").map(String::as_str).unwrap_or_default();
        let greeting = format!("Hello, {name} {surname}");
        info!(name, surname, "GET /api/hello/{{name}}/{{surname}}");
        res.set_type("text/plain");
        res.write(greeting);
        Disposition::Keep
    })?;

    dispatcher.add_endpoint(Method::GET, "/api/path/{path}*", |req, res| {
        let path = req.path_var("path").unwrap_or_default().to_string();
        info!(%path, "GET /api/path/{{path}}*");
        res.set_type("text/plain");
        res.write(format!("Path: {path}"));
        Disposition::Keep
    })?;

    if let Some(base) = static_dir {
        dispatcher.add_endpoint(Method::GET, "/{file}*", move |req, res| {
            let mut capture = req.path_var("file").unwrap_or_default().to_string();
            if capture.is_empty() {
                capture = "index.html".to_string();
            }

            let Some(path) = map_static_path(&base, &capture) else {
                warn!(%capture, "rejected static path");
                res.not_found();
                return Disposition::Keep;
            };

            match std::fs::read(&path) {
                Ok(bytes) => {
                    res.set_type(content_type_for(&path));
                    res.write(bytes);
                }
                Err(_) => res.not_found(),
            }
            Disposition::Keep
        })?;
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let config = RuntimeConfig::from_env();
    may::config().set_stack_size(config.stack_size);

    let mut dispatcher = Dispatcher::new();
    register_routes(&mut dispatcher, args.static_dir)?;

    let routes = dispatcher.registry().len();
    let service = AppService::new(Arc::new(RwLock::new(dispatcher)));
    let handle = HttpServer(service).start(&args.addr)?;

    info!(addr = %handle.addr(), routes, "server started");

    if let Err(err) = handle.join() {
        anyhow::bail!("server terminated abnormally: {err:?}");
    }
    Ok(())
}

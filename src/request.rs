//! Request context handed to endpoint and error handlers.

use std::collections::HashMap;
use std::sync::Arc;

use http::Method;

use crate::uri::{codec, template, PathVars};

/// A single HTTP exchange as seen by the routing core.
///
/// Built by the transport adapter from an already-parsed request; the core
/// never touches the socket. Path variables are derived lazily from the
/// template that won the match and memoized for the lifetime of the
/// exchange.
#[derive(Debug)]
pub struct Request {
    method: Method,
    /// Raw request target, query string included.
    target: String,
    query: HashMap<String, String>,
    /// Header names are lowercased at construction.
    headers: HashMap<String, String>,
    body: Vec<u8>,
    /// Template of the endpoint that won the match, bound by the dispatcher.
    template: Option<Arc<str>>,
    path_vars: Option<PathVars>,
}

impl Request {
    /// Builds a request context from the transport's parsed pieces.
    ///
    /// The query string is split off `target` and its parameters are
    /// percent-decoded eagerly; path variables wait until first access.
    pub fn new(
        method: Method,
        target: impl Into<String>,
        headers: HashMap<String, String>,
        body: Vec<u8>,
    ) -> Self {
        let target = target.into();
        let query = parse_query(&target);
        Self {
            method,
            target,
            query,
            headers,
            body,
            template: None,
            path_vars: None,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Request path with the query string stripped.
    pub fn path(&self) -> &str {
        &self.target[..self.target.find('?').unwrap_or(self.target.len())]
    }

    /// Raw request target as received, query string included.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Looks up a header value; names are matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.header(name).is_some()
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Returns the decoded value of a query parameter.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    pub fn query_params(&self) -> &HashMap<String, String> {
        &self.query
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Request body as text, with invalid UTF-8 replaced.
    pub fn body_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Records the template of the winning endpoint so path variables can be
    /// computed without re-scanning the registry.
    pub(crate) fn bind_template(&mut self, template: Arc<str>) {
        self.template = Some(template);
    }

    /// Template of the endpoint that won the match, if any.
    pub fn matched_template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    /// The path variables of this exchange.
    ///
    /// Computed from the bound template on first access and cached; empty
    /// when no endpoint matched (or the template has no captures).
    pub fn path_vars(&mut self) -> &PathVars {
        if self.path_vars.is_none() {
            let vars = self
                .template
                .as_deref()
                .map(|t| template::parse(t, &self.target))
                .unwrap_or_default();
            self.path_vars = Some(vars);
        }
        self.path_vars.get_or_insert_with(PathVars::new)
    }

    /// Returns the value of a single path variable.
    pub fn path_var(&mut self, name: &str) -> Option<&str> {
        self.path_vars().get(name).map(String::as_str)
    }

    pub fn has_path_var(&mut self, name: &str) -> bool {
        self.path_vars().contains_key(name)
    }
}

/// Splits the query string off a request target and percent-decodes each
/// `name=value` pair. Pairs without `=` decode to an empty value.
fn parse_query(target: &str) -> HashMap<String, String> {
    match target.split_once('?') {
        Some((_, query)) => query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
                (codec::decode_str(name), codec::decode_str(value))
            })
            .collect(),
        None => HashMap::new(),
    }
}

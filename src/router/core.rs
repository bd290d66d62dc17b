use std::fmt;
use std::sync::Arc;

use http::Method;
use thiserror::Error;
use tracing::{debug, warn};

use crate::handler::EndpointHandler;
use crate::uri::template;

/// Errors surfaced when registering an endpoint.
#[derive(Debug, Error)]
pub enum RouterError {
    /// The template violates the grammar: it is empty, does not start with
    /// `/`, or ends with `/`.
    #[error("invalid endpoint template `{0}`: a template must start with '/' and must not end with '/'")]
    InvalidTemplate(String),
    /// The method is outside the supported verb set.
    #[error("unsupported method `{0}`: endpoints are limited to GET, POST, PUT and DELETE")]
    UnsupportedMethod(Method),
}

/// A registered route: method, template, handler and the priority derived
/// from the template at registration time.
pub struct Endpoint {
    method: Method,
    template: Arc<str>,
    handler: EndpointHandler,
    priority: i32,
    /// Registration sequence number; the tie-break for equal priorities.
    seq: u64,
}

impl Endpoint {
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub(crate) fn template_arc(&self) -> Arc<str> {
        Arc::clone(&self.template)
    }

    pub(crate) fn handler(&self) -> &EndpointHandler {
        &self.handler
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("method", &self.method)
            .field("template", &self.template)
            .field("priority", &self.priority)
            .field("seq", &self.seq)
            .finish_non_exhaustive()
    }
}

/// Ordered endpoint collection.
///
/// The invariant is that `endpoints` is always sorted by the comparator
/// (priority descending, registration sequence ascending): an earlier
/// registration is scanned first among equal priorities, and therefore wins
/// the match. Mutation is not internally synchronized; callers serialize
/// registration against dispatch (see [`crate::server::AppService`]).
#[derive(Debug, Default)]
pub struct EndpointRegistry {
    endpoints: Vec<Endpoint>,
    next_seq: u64,
}

impl EndpointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for `method` and `template`.
    ///
    /// The template's priority is computed once here; the endpoint is
    /// inserted after all entries of equal or higher priority and before the
    /// first entry of strictly lower priority. Duplicate registrations are
    /// allowed and coexist; the earlier one keeps winning lookups.
    ///
    /// # Errors
    ///
    /// Rejects templates that violate the grammar and methods outside the
    /// supported set; the registry is left unchanged in both cases.
    pub fn add(
        &mut self,
        method: Method,
        template: &str,
        handler: EndpointHandler,
    ) -> Result<(), RouterError> {
        let supported = [Method::GET, Method::POST, Method::PUT, Method::DELETE];
        if !supported.contains(&method) {
            warn!(method = %method, template, "endpoint rejected: unsupported method");
            return Err(RouterError::UnsupportedMethod(method));
        }

        let priority = template::calc_priority(template);
        if priority < 0 {
            warn!(method = %method, template, "endpoint rejected: invalid template");
            return Err(RouterError::InvalidTemplate(template.to_string()));
        }

        let seq = self.next_seq;
        self.next_seq += 1;

        // O(log n) slot lookup, O(n) shift; the comparator is
        // (priority desc, seq asc), so ties keep registration order
        let index = self
            .endpoints
            .partition_point(|e| e.priority > priority || (e.priority == priority && e.seq < seq));

        self.endpoints.insert(
            index,
            Endpoint {
                method,
                template: Arc::from(template),
                handler,
                priority,
                seq,
            },
        );

        let endpoint = &self.endpoints[index];
        debug!(
            method = %endpoint.method,
            template = %endpoint.template,
            priority = endpoint.priority,
            total = self.endpoints.len(),
            "endpoint registered"
        );

        Ok(())
    }

    /// Removes the first endpoint whose method and template are exactly
    /// equal to the arguments.
    ///
    /// Equality is on the template string, not on template semantics: a
    /// different spelling that matches the same paths does not qualify.
    /// Returns whether an endpoint was found and removed.
    pub fn remove(&mut self, method: &Method, template: &str) -> bool {
        let found = self
            .endpoints
            .iter()
            .position(|e| e.method == *method && e.template.as_ref() == template);

        match found {
            Some(index) => {
                self.endpoints.remove(index);
                debug!(method = %method, template, "endpoint removed");
                true
            }
            None => false,
        }
    }

    /// Returns the highest-priority endpoint matching `method` and `path`.
    ///
    /// A linear scan in priority order; the first hit wins, which is what
    /// makes the sort invariant and the registration-order tie-break
    /// load-bearing.
    pub fn find_match(&self, method: &Method, path: &str) -> Option<&Endpoint> {
        self.endpoints
            .iter()
            .find(|e| e.method == *method && template::is_match(&e.template, path))
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Endpoints in scan order (priority descending).
    pub fn iter(&self) -> impl Iterator<Item = &Endpoint> {
        self.endpoints.iter()
    }
}

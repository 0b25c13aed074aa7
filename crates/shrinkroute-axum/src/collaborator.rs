// File: src/collaborator.rs
// Purpose: Binds shrinkroute handlers onto an axum Router

use std::collections::{BTreeMap, BTreeSet};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use axum::routing::{any, on, MethodFilter};
use axum::Router;
use shrinkroute::params::expand_optional;
use shrinkroute::{Collaborator, Method};
use tracing::{debug, warn};

/// Future returned by a [`BoxedHandler`]
pub type HandlerFuture = Pin<Box<dyn Future<Output = Response> + Send>>;

/// Type-erased request handler stored in the route table
pub type BoxedHandler = Arc<dyn Fn(Request) -> HandlerFuture + Send + Sync>;

/// Wraps an async function taking the raw request into a [`BoxedHandler`]
///
/// Extractors are not available on the raw request; read extensions such
/// as [`Urls`](crate::Urls) with `request.extensions().get()`.
pub fn handler<F, Fut, R>(f: F) -> BoxedHandler
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse,
{
    Arc::new(move |req: Request| -> HandlerFuture {
        let fut = f(req);
        Box::pin(async move { fut.await.into_response() })
    })
}

/// [`Collaborator`] that builds an axum [`Router`]
///
/// Optional `:param?` tokens are expanded into one axum route per variant,
/// since axum paths have no optional segments. Patterns without a leading
/// `/` get one. A method already bound on a path (or any method next to
/// `all`) is skipped with a warning instead of letting axum panic on the
/// overlap.
#[derive(Default)]
pub struct AxumCollaborator {
    router: Router,
    bound: BTreeMap<String, BTreeSet<Method>>,
    pub(crate) patterns: BTreeMap<String, String>,
}

impl AxumCollaborator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing router
    ///
    /// Its routes are served next to the bound handlers and also get the
    /// per-request [`Urls`](crate::Urls) and [`RouteName`](crate::RouteName).
    pub fn with_router(router: Router) -> Self {
        Self {
            router,
            ..Self::default()
        }
    }

    /// Axum pattern → route pathname it was bound for
    pub fn patterns(&self) -> &BTreeMap<String, String> {
        &self.patterns
    }

    /// Router with every handler bound so far
    pub fn into_router(self) -> Router {
        self.router
    }

    fn claim(&mut self, pattern: &str, method: Method) -> bool {
        let methods = self.bound.entry(pattern.to_string()).or_default();
        let overlaps = methods.contains(&method)
            || methods.contains(&Method::All)
            || (method == Method::All && !methods.is_empty());
        if overlaps {
            return false;
        }
        methods.insert(method);
        true
    }
}

impl Collaborator for AxumCollaborator {
    type Handler = BoxedHandler;

    fn bind_handler(&mut self, method: Method, path: &str, handler: BoxedHandler) {
        for pattern in expand_optional(path).into_iter().map(rooted) {
            if !self.claim(&pattern, method) {
                warn!(%method, path = %pattern, "handler already bound, skipping");
                continue;
            }

            let endpoint = {
                let handler = handler.clone();
                move |req: Request| handler(req)
            };
            let method_router = match method_filter(method) {
                Some(filter) => on(filter, endpoint),
                None => any(endpoint),
            };

            debug!(%method, path = %pattern, "adding axum route");
            self.patterns
                .entry(pattern.clone())
                .or_insert_with(|| path.to_string());
            self.router = std::mem::take(&mut self.router).route(&pattern, method_router);
        }
    }
}

/// axum only accepts patterns starting with `/`
fn rooted(pattern: String) -> String {
    if pattern.starts_with('/') {
        return pattern;
    }
    debug!(path = %pattern, "prefixing `/` to axum pattern");
    format!("/{}", pattern)
}

/// `None` for [`Method::All`], which maps to [`any`]
fn method_filter(method: Method) -> Option<MethodFilter> {
    let filter = match method {
        Method::Get => MethodFilter::GET,
        Method::Post => MethodFilter::POST,
        Method::Put => MethodFilter::PUT,
        Method::Delete => MethodFilter::DELETE,
        Method::Patch => MethodFilter::PATCH,
        Method::Head => MethodFilter::HEAD,
        Method::Options => MethodFilter::OPTIONS,
        Method::Trace => MethodFilter::TRACE,
        Method::All => return None,
    };
    Some(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn noop() -> BoxedHandler {
        handler(|_req: Request| async { "ok" })
    }

    #[test]
    fn test_claim_rejects_overlaps() {
        let mut collab = AxumCollaborator::new();
        assert!(collab.claim("/a", Method::Get));
        assert!(collab.claim("/a", Method::Post));
        assert!(!collab.claim("/a", Method::Get));
        assert!(!collab.claim("/a", Method::All));

        assert!(collab.claim("/b", Method::All));
        assert!(!collab.claim("/b", Method::Put));
    }

    #[test]
    fn test_pattern_without_leading_slash_is_rooted() {
        let mut collab = AxumCollaborator::new();
        collab.bind_handler(Method::Get, "users", noop());
        collab.bind_handler(Method::Get, ":lang?", noop());

        let patterns: Vec<(&str, &str)> = collab
            .patterns()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            patterns,
            vec![("/", ":lang?"), ("/:lang", ":lang?"), ("/users", "users")]
        );
    }

    #[test]
    fn test_optional_tokens_expand_into_patterns() {
        let mut collab = AxumCollaborator::new();
        collab.bind_handler(Method::Get, "/article/:slug?", noop());

        let patterns: Vec<(&str, &str)> = collab
            .patterns()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            patterns,
            vec![
                ("/article/", "/article/:slug?"),
                ("/article/:slug", "/article/:slug?"),
            ]
        );
    }
}

// File: src/router.rs
// Purpose: Freezes a registry into an axum Router with URL helpers per request

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{MatchedPath, Request, State},
    http::{header, HeaderMap, Uri},
    middleware::{self, Next},
    response::Response,
    Router,
};
use shrinkroute::{RequestInfo, RouteTable, Shrinkroute, UrlHelper};
use tracing::debug;

use crate::collaborator::{AxumCollaborator, BoxedHandler};
use crate::extract::{RouteName, Urls};

/// Registry type for axum applications
pub type AxumShrinkroute = Shrinkroute<AxumCollaborator>;

struct Annotator {
    table: Arc<RouteTable<BoxedHandler>>,
    patterns: BTreeMap<String, String>,
}

impl Annotator {
    fn route_name(&self, matched: &str) -> Option<String> {
        let pathname = self
            .patterns
            .get(matched)
            .map(String::as_str)
            .unwrap_or(matched);
        self.table.name_for_path(pathname).map(str::to_string)
    }
}

/// Scheme and host of an inbound axum request
struct InboundRequest<'a> {
    protocol: &'a str,
    host: Option<&'a str>,
}

impl<'a> InboundRequest<'a> {
    fn new(headers: &'a HeaderMap, uri: &'a Uri) -> Self {
        let protocol = headers
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .or_else(|| uri.scheme_str())
            .unwrap_or("http");

        let host = headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .or_else(|| uri.authority().map(|a| a.as_str()));

        Self { protocol, host }
    }
}

impl RequestInfo for InboundRequest<'_> {
    fn protocol(&self) -> &str {
        self.protocol
    }

    fn host(&self) -> Option<&str> {
        self.host
    }
}

/// Turns a filled registry into a router
///
/// The collaborator is detached and the route table frozen behind an `Arc`.
/// Every request gets a [`Urls`] helper (origin taken from
/// `X-Forwarded-Proto` / the URI scheme and the `Host` header) and the
/// [`RouteName`] of the route that matched it.
///
/// # Examples
///
/// ```
/// use shrinkroute::RouteDef;
/// use shrinkroute_axum::{handler, into_router, AxumCollaborator, AxumShrinkroute};
///
/// let mut shrinkr = AxumShrinkroute::with_collaborator(AxumCollaborator::new());
/// shrinkr
///     .register("home", RouteDef::new("/").get(handler(|_req| async { "home" })))
///     .unwrap();
///
/// let app: axum::Router = into_router(shrinkr);
/// ```
pub fn into_router(shrinkr: AxumShrinkroute) -> Router {
    let (table, collaborator) = shrinkr.into_parts();
    let collaborator = collaborator.unwrap_or_default();

    let annotator = Arc::new(Annotator {
        table: Arc::new(table),
        patterns: collaborator.patterns.clone(),
    });

    collaborator
        .into_router()
        .layer(middleware::from_fn_with_state(annotator, annotate))
}

async fn annotate(
    State(annotator): State<Arc<Annotator>>,
    matched: Option<MatchedPath>,
    mut req: Request,
    next: Next,
) -> Response {
    let name = matched.and_then(|m| annotator.route_name(m.as_str()));
    let urls = {
        let inbound = InboundRequest::new(req.headers(), req.uri());
        UrlHelper::for_request(annotator.table.clone(), &inbound)
    };

    debug!(route = ?name, path = %req.uri().path(), "annotating request");
    req.extensions_mut().insert(Urls(urls));
    req.extensions_mut().insert(RouteName(name));
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_inbound_request_prefers_forwarded_proto() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-proto", "https".parse().unwrap());
        headers.insert(header::HOST, "example.com".parse().unwrap());
        let uri: Uri = "/users".parse().unwrap();

        let inbound = InboundRequest::new(&headers, &uri);
        assert_eq!(inbound.protocol(), "https");
        assert_eq!(inbound.host(), Some("example.com"));
    }

    #[test]
    fn test_inbound_request_falls_back_to_uri() {
        let headers = HeaderMap::new();
        let uri: Uri = "http://localhost:3000/users".parse().unwrap();

        let inbound = InboundRequest::new(&headers, &uri);
        assert_eq!(inbound.protocol(), "http");
        assert_eq!(inbound.host(), Some("localhost:3000"));
    }

    #[test]
    fn test_inbound_request_without_host() {
        let headers = HeaderMap::new();
        let uri: Uri = "/users".parse().unwrap();

        let inbound = InboundRequest::new(&headers, &uri);
        assert_eq!(inbound.protocol(), "http");
        assert!(inbound.host().is_none());
    }
}

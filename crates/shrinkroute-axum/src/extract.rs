// File: src/extract.rs
// Purpose: Request extensions and extractors for URL building inside handlers

use std::ops::Deref;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use shrinkroute::UrlHelper;

use crate::collaborator::BoxedHandler;

// ════════════════════════════════════════════════════════════
// 1. URL helper
// ════════════════════════════════════════════════════════════

/// Per-request URL helper, inserted by the router middleware
///
/// Works as an extractor in plain axum handlers and as a request extension
/// in [`BoxedHandler`]s.
#[derive(Debug, Clone)]
pub struct Urls(pub UrlHelper<BoxedHandler>);

impl Deref for Urls {
    type Target = UrlHelper<BoxedHandler>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Urls
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Urls>().cloned().ok_or((
            StatusCode::INTERNAL_SERVER_ERROR,
            "route table not attached to this router",
        ))
    }
}

// ════════════════════════════════════════════════════════════
// 2. Matched route name
// ════════════════════════════════════════════════════════════

/// Name of the route that matched the request, `None` for fallbacks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteName(pub Option<String>);

impl RouteName {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RouteName
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<RouteName>().cloned().unwrap_or_default())
    }
}

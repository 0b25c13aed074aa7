//! Integration tests for the axum router
//!
//! Requests go through `tower::ServiceExt::oneshot` against the router built
//! from a registry, checking dispatch, per-request URL helpers and route
//! name annotation.

use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::StatusCode,
    routing::get,
    Router,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use shrinkroute::{Params, RouteDef};
use shrinkroute_axum::*;
use tower::ServiceExt;

fn text(body: &'static str) -> BoxedHandler {
    handler(move |_req: Request| async move { body })
}

fn app() -> Router {
    let mut shrinkr = AxumShrinkroute::with_collaborator(AxumCollaborator::new());
    shrinkr
        .register_all([
            ("home", RouteDef::new("/").get(text("home"))),
            (
                "users",
                RouteDef::new("/users").get(text("list")).post(text("create")),
            ),
            (
                "users.show",
                RouteDef::new("/:id").get(handler(|req: Request| async move {
                    let urls = req.extensions().get::<Urls>().cloned();
                    let name = req.extensions().get::<RouteName>().cloned();
                    let link = urls
                        .map(|u| u.full_url("users.show.edit", &Params::new().with("id", 7)))
                        .unwrap_or_default();
                    format!("{:?} {}", name.and_then(|n| n.0), link)
                })),
            ),
            ("users.show.edit", RouteDef::new("/edit").all(text("edit"))),
            ("article", RouteDef::new("/article/:slug?").get(text("article"))),
        ])
        .unwrap();

    into_router(shrinkr)
}

async fn send(router: Router, method: &str, uri: &str) -> (StatusCode, String) {
    let req = axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header("host", "example.com")
        .body(Body::empty())
        .unwrap();

    let res = router.oneshot(req).await.unwrap();
    let status = res.status();
    let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[rstest]
#[case("GET", "/", "home")]
#[case("GET", "/users", "list")]
#[case("POST", "/users", "create")]
#[case("DELETE", "/users/3/edit", "edit")]
#[case("GET", "/article/hello", "article")]
#[case("GET", "/article/", "article")]
#[tokio::test]
async fn test_dispatch(#[case] method: &str, #[case] uri: &str, #[case] expected: &str) {
    let (status, body) = send(app(), method, uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, expected);
}

#[tokio::test]
async fn test_unbound_method_is_rejected() {
    let (status, _) = send(app(), "PUT", "/users").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_handler_sees_url_helper_and_route_name() {
    let (status, body) = send(app(), "GET", "/users/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        r#"Some("users.show") http://example.com/users/7/edit"#
    );
}

#[tokio::test]
async fn test_forwarded_proto_is_used_for_full_urls() {
    let req = axum::http::Request::builder()
        .uri("/users/1")
        .header("host", "example.com")
        .header("x-forwarded-proto", "https")
        .body(Body::empty())
        .unwrap();

    let res = app().oneshot(req).await.unwrap();
    let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&body).ends_with("https://example.com/users/7/edit"));
}

#[tokio::test]
async fn test_extractors_in_plain_axum_handlers() {
    async fn whoami(name: RouteName, urls: Urls) -> String {
        format!(
            "{} {}",
            name.as_deref().unwrap_or("-"),
            urls.url("users", &Params::new().with("page", 2))
        )
    }

    let plain = Router::new().route("/me", get(whoami));
    let mut shrinkr = AxumShrinkroute::with_collaborator(AxumCollaborator::with_router(plain));
    shrinkr.register("users", "/users").unwrap();
    shrinkr.register("me", "/me").unwrap();

    let (status, body) = send(into_router(shrinkr), "GET", "/me").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "me /users?page=2");

    let (status, _) = send(app(), "GET", "/nowhere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_relative_template_is_served_from_root() {
    let mut shrinkr = AxumShrinkroute::with_collaborator(AxumCollaborator::new());
    shrinkr
        .register(
            "users",
            RouteDef::new("users").get(handler(|req: Request| async move {
                let name = req.extensions().get::<RouteName>().cloned().unwrap_or_default();
                name.0.unwrap_or_default()
            })),
        )
        .unwrap();

    let (status, body) = send(into_router(shrinkr), "GET", "/users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "users");
}

#[tokio::test]
async fn test_missing_route_table_rejects_urls_extractor() {
    async fn needs_urls(_urls: Urls) -> &'static str {
        "unreachable"
    }

    let router = Router::new().route("/", get(needs_urls));
    let (status, _) = send(router, "GET", "/").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

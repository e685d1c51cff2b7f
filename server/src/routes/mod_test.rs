use super::*;
use axum::body::Body;
use axum::http::{Method, Request, header};
use tower::ServiceExt;

use crate::state::test_helpers;

const FOREIGN_ORIGIN: &str = "https://elsewhere.example";

// =========================================================================
// api_routes
// =========================================================================

#[tokio::test]
async fn healthz_answers_ok() {
    let app = api_routes(test_helpers::test_app_state());
    let request = Request::builder().uri("/healthz").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn foreign_origin_gets_no_cors_grant() {
    let app = api_routes(test_helpers::test_app_state());
    let request = Request::builder()
        .uri("/healthz")
        .header(header::ORIGIN, FOREIGN_ORIGIN)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[tokio::test]
async fn chat_preflight_from_foreign_origin_is_not_allowed() {
    let app = api_routes(test_helpers::test_app_state());
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/chat")
        .header(header::ORIGIN, FOREIGN_ORIGIN)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_ne!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_METHODS).is_none());
}

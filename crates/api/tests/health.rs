//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, body_text, get, TestApp, HEADER};
use gongryak_core::variant::SurveyVariant;
use gongryak_sheets::MemorySheetStore;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Test: GET /health reports the store state
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_returns_ok_with_json() {
    let app = TestApp::new(SurveyVariant::default());
    let response = get(&app.router, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["store_healthy"], true);
}

#[tokio::test]
async fn health_check_is_degraded_when_store_unreachable() {
    let store = Arc::new(MemorySheetStore::with_header(HEADER));
    store.fail_reads(true);
    let app = TestApp::with_store(SurveyVariant::default(), store);

    let json = body_json(get(&app.router, "/health").await).await;

    assert_eq!(json["status"], "degraded");
    assert_eq!(json["store_healthy"], false);
}

// ---------------------------------------------------------------------------
// Test: x-request-id header is present in response
// ---------------------------------------------------------------------------

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let app = TestApp::new(SurveyVariant::default());
    let response = get(&app.router, "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");
    assert_eq!(request_id.to_str().unwrap().len(), 36, "x-request-id should be a UUID string");
}

// ---------------------------------------------------------------------------
// Test: static form page is served at the root
// ---------------------------------------------------------------------------

#[tokio::test]
async fn root_serves_the_form_page() {
    let app = TestApp::new(SurveyVariant::default());
    let response = get(&app.router, "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("내 MBTI를 공략해라"));
}

#[tokio::test]
async fn unknown_path_returns_404() {
    let app = TestApp::new(SurveyVariant::default());
    let response = get(&app.router, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: CORS preflight OPTIONS request returns correct headers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cors_preflight_allows_configured_origin() {
    let app = TestApp::new(SurveyVariant::default());

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/submissions")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "http://localhost:5173"
    );
    assert_eq!(
        response.headers().get("access-control-allow-credentials").unwrap(),
        "true"
    );
    assert!(
        response.headers().get("set-cookie").is_none(),
        "preflight must not open a session"
    );
}

mod common;

use axum::ServiceExt;
use axum::extract::Request;
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use shortlink::domain::repositories::LinkStore;
use shortlink::routes::app_router;
use shortlink::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use common::UnreachableStore;

/// Serves the full application router over a real socket, so handlers see
/// the peer address the same way they do in production.
fn make_app_server(state: AppState) -> TestServer {
    let app = ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(
        app_router(state),
    );
    TestServer::builder().http_transport().build(app).unwrap()
}

fn short_code(response: &serde_json::Value) -> String {
    response["shortUrl"]
        .as_str()
        .and_then(|url| url.strip_prefix(&format!("{}/", common::TEST_BASE_URL)))
        .expect("short URL uses the base URL")
        .to_string()
}

#[tokio::test]
async fn test_store_down_create_returns_generic_500() {
    let state =
        common::create_test_state_with_store(Arc::new(UnreachableStore), Duration::from_secs(5));
    let server = make_app_server(state);

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "example.com" }))
        .await;

    response.assert_status_internal_server_error();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "internal_error");
    assert_eq!(json["error"]["message"], "Internal server error");
    assert!(!json.to_string().contains("Store unavailable"));
}

#[tokio::test]
async fn test_store_down_redirect_returns_generic_500() {
    let state =
        common::create_test_state_with_store(Arc::new(UnreachableStore), Duration::from_secs(5));
    let server = make_app_server(state);

    let response = server.get("/aZ09bY18").await;

    response.assert_status_internal_server_error();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "internal_error");
    assert_eq!(json["error"]["message"], "Internal server error");
}

#[tokio::test]
async fn test_only_creation_is_rate_limited() {
    let (state, store) = common::create_test_state_with_window(Duration::from_secs(60));
    let server = make_app_server(state);

    let created = server
        .post("/api/links")
        .json(&json!({ "url": "example.com/page" }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let code = short_code(&created.json::<serde_json::Value>());

    server
        .post("/api/links")
        .json(&json!({ "url": "example.org" }))
        .await
        .assert_status_too_many_requests();

    for _ in 0..3 {
        let response = server.get(&format!("/{code}")).await;
        response.assert_status(StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.header("location"), "https://example.com/page");
    }

    server.get("/health").await.assert_status_ok();
    server.get("/health").await.assert_status_ok();

    assert_eq!(store.len().await, 1);
    assert_eq!(store.get(&code).await.unwrap().unwrap().hit_count, 3);
}

#[tokio::test]
async fn test_trailing_slash_is_accepted() {
    let (state, store) = common::create_test_state();
    let server = make_app_server(state);

    server
        .post("/api/links/")
        .json(&json!({ "url": "example.com" }))
        .await
        .assert_status(StatusCode::CREATED);

    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_unknown_code_through_router() {
    let (state, _store) = common::create_test_state();
    let server = make_app_server(state);

    let response = server.get("/zzzzzzzz").await;

    response.assert_status_not_found();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let (state, _store) = common::create_test_state();
    let server = make_app_server(state);

    let response = server
        .post("/api/links")
        .add_header("origin", "https://app.example.net")
        .json(&json!({ "url": "example.com" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.header("access-control-allow-origin"), "*");
}

#[tokio::test]
async fn test_cors_preflight() {
    let (state, _store) = common::create_test_state();
    let server = make_app_server(state);

    let response = server
        .method(axum::http::Method::OPTIONS, "/api/links")
        .add_header("origin", "https://app.example.net")
        .add_header("access-control-request-method", "POST")
        .add_header("access-control-request-headers", "content-type")
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("access-control-allow-origin"), "*");
    assert!(response.maybe_header("access-control-allow-methods").is_some());
}

mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use chrono::{Duration, Utc};
use shortlink::api::handlers::redirect_handler;

#[tokio::test]
async fn test_redirect_success() {
    let (state, store) = common::create_test_state();
    let app = Router::new()
        .route("/{code}", get(redirect_handler))
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    common::seed_mapping(
        &store,
        "redirect1",
        "https://example.com/target",
        Utc::now() + Duration::days(1),
    )
    .await;

    let response = server.get("/redirect1").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_unknown_code() {
    let (state, _store) = common::create_test_state();
    let app = Router::new()
        .route("/{code}", get(redirect_handler))
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    let response = server.get("/doesnotexist").await;

    assert_eq!(response.status_code(), 404);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_redirect_expired_code() {
    let (state, store) = common::create_test_state();
    let app = Router::new()
        .route("/{code}", get(redirect_handler))
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    common::seed_mapping(
        &store,
        "ephemeral",
        "https://example.com",
        Utc::now() + Duration::milliseconds(20),
    )
    .await;

    // Live while the TTL holds...
    let response = server.get("/ephemeral").await;
    assert_eq!(response.status_code(), 307);

    // ...and gone once it elapses.
    tokio::time::sleep(std::time::Duration::from_millis(40)).await;
    let response = server.get("/ephemeral").await;
    assert_eq!(response.status_code(), 404);
}

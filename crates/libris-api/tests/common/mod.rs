//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use libris_core::clock::Clock;
use libris_lending::application::library::Library;
use libris_test_support::{FixedClock, fixture_library};
use tower::ServiceExt;

use libris_api::routes;
use libris_api::state::AppState;

/// Fixed "now" used across all integration tests: 2024-01-01 midnight UTC.
fn fixed_clock() -> Arc<dyn Clock + Send + Sync> {
    Arc::new(FixedClock::on(2024, 1, 1))
}

/// Build the full app router over the fixture library and a fixed clock.
/// Uses the same route structure as `main.rs`.
pub fn build_test_app() -> Router {
    build_test_app_with(fixture_library())
}

/// Build the full app router over `library`.
pub fn build_test_app_with(library: Library) -> Router {
    routes::router().with_state(AppState::new(fixed_clock(), library))
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

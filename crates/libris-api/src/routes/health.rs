//! Liveness endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status: `ok`, or `degraded` when the lending engine is
    /// unusable.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Number of loans currently outstanding. Absent when degraded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_loans: Option<usize>,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let version = env!("CARGO_PKG_VERSION");
    match state.with_library(|library| Ok(library.active_loans().len())) {
        Ok(active_loans) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                version,
                active_loans: Some(active_loans),
            }),
        ),
        Err(err) => {
            tracing::error!(error = %err, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "degraded",
                    version,
                    active_loans: None,
                }),
            )
        }
    }
}

/// Returns the health check router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

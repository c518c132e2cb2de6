//! Lending routes: checkout and return.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::post};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use libris_core::clock::Clock;
use libris_lending::application::query_handlers::{LoanView, ReturnView};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /checkout and POST /return.
#[derive(Debug, Deserialize)]
pub struct LendingRequest {
    /// The borrowing member.
    pub member_id: String,
    /// The book being lent or returned.
    pub isbn: String,
    /// Transaction date. Defaults to now.
    pub date: Option<DateTime<Utc>>,
}

/// POST /checkout
#[instrument(skip(state, request), fields(member_id = %request.member_id, isbn = %request.isbn))]
async fn checkout(
    State(state): State<AppState>,
    Json(request): Json<LendingRequest>,
) -> Result<(StatusCode, Json<LoanView>), ApiError> {
    let correlation_id = Uuid::new_v4();
    info!(%correlation_id, "handling checkout command");

    let current_date = state.clock.resolve(request.date);
    let loan = state.with_library(|library| {
        library.checkout(&request.member_id, &request.isbn, current_date)
    })?;

    Ok((StatusCode::CREATED, Json(LoanView::new(&loan, current_date))))
}

/// POST /return
#[instrument(skip(state, request), fields(member_id = %request.member_id, isbn = %request.isbn))]
async fn return_book(
    State(state): State<AppState>,
    Json(request): Json<LendingRequest>,
) -> Result<Json<ReturnView>, ApiError> {
    let correlation_id = Uuid::new_v4();
    info!(%correlation_id, "handling return command");

    let return_date = state.clock.resolve(request.date);
    let receipt = state.with_library(|library| {
        library.return_book(&request.member_id, &request.isbn, return_date)
    })?;

    Ok(Json(ReturnView::from(&receipt)))
}

/// Returns the router for lending transactions.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/checkout", post(checkout))
        .route("/return", post(return_book))
}

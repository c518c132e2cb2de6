//! Membership routes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::get, routing::post};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use libris_core::clock::Clock;
use libris_lending::application::query_handlers::{self, LoanView, MemberView};
use libris_lending::domain::member::Member;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct RegisterMemberRequest {
    /// Membership key.
    pub member_id: String,
    /// Display name.
    pub name: String,
}

/// Query string for GET /{member_id}/loans.
#[derive(Debug, Deserialize)]
pub struct LoansQuery {
    /// Instant to judge overdue status at. Defaults to now.
    pub as_of: Option<DateTime<Utc>>,
}

/// POST /
#[instrument(skip(state, request), fields(member_id = %request.member_id))]
async fn register_member(
    State(state): State<AppState>,
    Json(request): Json<RegisterMemberRequest>,
) -> Result<(StatusCode, Json<MemberView>), ApiError> {
    let correlation_id = Uuid::new_v4();
    info!(%correlation_id, "handling register_member command");

    let member_id = request.member_id.clone();
    let view = state.with_library(|library| {
        library.add_member(Member::new(request.member_id, request.name))?;
        query_handlers::get_member(library, &member_id)
    })?;

    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /{member_id}
#[instrument(skip(state))]
async fn get_member(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
) -> Result<Json<MemberView>, ApiError> {
    let view = state.with_library(|library| query_handlers::get_member(library, &member_id))?;
    Ok(Json(view))
}

/// GET /{member_id}/loans
#[instrument(skip(state, query))]
async fn get_member_loans(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
    Query(query): Query<LoansQuery>,
) -> Result<Json<Vec<LoanView>>, ApiError> {
    let as_of = state.clock.resolve(query.as_of);
    let views = state.with_library(|library| {
        query_handlers::get_member_loans(library, &member_id, as_of)
    })?;
    Ok(Json(views))
}

/// Returns the router for membership.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(register_member))
        .route("/{member_id}", get(get_member))
        .route("/{member_id}/loans", get(get_member_loans))
}

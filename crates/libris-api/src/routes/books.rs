//! Catalog routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::get, routing::post};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use libris_lending::application::query_handlers::{self, BookView};
use libris_lending::domain::book::Book;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct RegisterBookRequest {
    /// Catalog key.
    pub isbn: String,
    /// Genre.
    pub genre: String,
    /// Title.
    pub title: String,
    /// Author.
    pub author: String,
}

/// POST /
#[instrument(skip(state, request), fields(isbn = %request.isbn))]
async fn register_book(
    State(state): State<AppState>,
    Json(request): Json<RegisterBookRequest>,
) -> Result<(StatusCode, Json<BookView>), ApiError> {
    let correlation_id = Uuid::new_v4();
    info!(%correlation_id, "handling register_book command");

    let isbn = request.isbn.clone();
    let view = state.with_library(|library| {
        library.add_book(Book::new(
            request.isbn,
            request.genre,
            request.title,
            request.author,
        ))?;
        query_handlers::get_book(library, &isbn)
    })?;

    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /{isbn}
#[instrument(skip(state))]
async fn get_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> Result<Json<BookView>, ApiError> {
    let view = state.with_library(|library| query_handlers::get_book(library, &isbn))?;
    Ok(Json(view))
}

/// Returns the router for the catalog.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(register_book))
        .route("/{isbn}", get(get_book))
}

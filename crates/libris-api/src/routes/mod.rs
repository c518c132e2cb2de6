//! Route modules, one per resource.

pub mod books;
pub mod health;
pub mod loans;
pub mod members;

use axum::Router;

use crate::state::AppState;

/// Returns the full application router, without middleware layers.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/api/v1/books", books::router())
        .nest("/api/v1/members", members::router())
        .nest("/api/v1/loans", loans::router())
}

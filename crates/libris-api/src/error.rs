//! Libris — API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use libris_core::error::LendingError;
use serde::Serialize;
use thiserror::Error;

/// Startup errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The seed file could not be parsed.
    #[error("seed file error: {0}")]
    Seed(#[from] serde_yaml::Error),

    /// Registering seeded books or members failed.
    #[error("lending error: {0}")]
    Lending(#[from] LendingError),

    /// Network binding, file, or other I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `LendingError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub LendingError);

impl From<LendingError> for ApiError {
    fn from(err: LendingError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// The HTTP status for the wrapped error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            LendingError::BookNotFound(_) | LendingError::MemberNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            LendingError::AlreadyCheckedOut(_)
            | LendingError::RuleViolation { .. }
            | LendingError::NotBorrowed { .. }
            | LendingError::DuplicateBorrow { .. } => StatusCode::CONFLICT,
            LendingError::NegativeAmount(_) => StatusCode::BAD_REQUEST,
            LendingError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.0.code(),
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

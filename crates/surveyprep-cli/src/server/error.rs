//! API error types and handling.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use surveyprep::{ErrorKind, PrepError};

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Unknown session or column.
    NotFound(String),
    /// Malformed request.
    BadRequest(String),
    /// Stale `expected_version`.
    Conflict(String),
    /// Internal server error.
    Internal(String),
    /// Error from the surveyprep library.
    Prep(PrepError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal", msg),
            ApiError::Prep(e) => match e.kind() {
                ErrorKind::Ingestion => (StatusCode::BAD_REQUEST, "ingestion_error", e.to_string()),
                ErrorKind::Parameter => (StatusCode::BAD_REQUEST, "parameter_error", e.to_string()),
                ErrorKind::Schema => (StatusCode::NOT_FOUND, "schema_error", e.to_string()),
                ErrorKind::Internal => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "internal", e.to_string())
                }
            },
        };

        if status.is_server_error() {
            tracing::error!(%message, "request failed");
        }

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<PrepError> for ApiError {
    fn from(err: PrepError) -> Self {
        ApiError::Prep(err)
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("Worker task failed: {}", err))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
            ApiError::Prep(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ApiError {}

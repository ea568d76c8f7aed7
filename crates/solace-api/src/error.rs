use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use solace_portal::error::PortalError;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    /// The result row was written but the status transition failed; the
    /// assignment needs manual reconciliation. Kept separate from
    /// [`ApiError::Internal`] so the client can message it differently.
    Reconcile(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Reconcile(msg) => {
                tracing::error!("partially applied submit, needs reconciliation: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "submission partially saved; the clinic has been notified".to_string(),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<PortalError> for ApiError {
    fn from(e: PortalError) -> Self {
        match e {
            PortalError::InvalidReference
            | PortalError::IncompleteAnswers
            | PortalError::InvalidInput(_) => ApiError::BadRequest(e.to_string()),
            PortalError::NotFound => ApiError::NotFound(e.to_string()),
            PortalError::AlreadyCompleted => ApiError::Conflict(e.to_string()),
            PortalError::StatusUpdate(msg) => ApiError::Reconcile(msg),
            PortalError::Fetch(_) | PortalError::ResultWrite(_) | PortalError::Write(_) => {
                ApiError::Internal(e.to_string())
            }
        }
    }
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use oqim_core::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for the domain taxonomy and adds HTTP-specific
/// variants. Implements [`IntoResponse`] to produce consistent JSON error
/// bodies: `{"error": message, "code": CODE}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `oqim_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Shorthand for a 400 carrying a legacy wire message.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Core(CoreError::invalid(msg))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::InvalidInput(msg) => {
                    tracing::warn!(error = %msg, "Invalid input");
                    (StatusCode::BAD_REQUEST, "INVALID_INPUT", msg.clone())
                }
                CoreError::PayloadTooLarge => {
                    tracing::warn!(error = %core, "Payload too large");
                    (
                        StatusCode::PAYLOAD_TOO_LARGE,
                        "PAYLOAD_TOO_LARGE",
                        core.to_string(),
                    )
                }
                // The backend's message is surfaced as-is.
                CoreError::Processing(msg) => {
                    tracing::error!(error = %msg, "Processing error");
                    (StatusCode::INTERNAL_SERVER_ERROR, "PROCESSING_ERROR", msg.clone())
                }
            },

            AppError::BadRequest(msg) => {
                tracing::warn!(error = %msg, "Bad request");
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone())
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

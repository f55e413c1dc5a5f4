//! API error types and handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use dexa_screen::ScreenError;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from client.
    BadRequest(String),
    /// Error from the screening library.
    Screen(ScreenError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Screen(e @ (ScreenError::Io { .. } | ScreenError::Log { .. })) => {
                tracing::error!("Screening failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal", e.to_string())
            }
            ApiError::Screen(e @ ScreenError::MissingColumn { .. }) => {
                (StatusCode::BAD_REQUEST, "missing_column", e.to_string())
            }
            ApiError::Screen(e) => (StatusCode::BAD_REQUEST, "parse_error", e.to_string()),
        };

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

impl From<ScreenError> for ApiError {
    fn from(err: ScreenError) -> Self {
        ApiError::Screen(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Screen(e) => write!(f, "Screening error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}

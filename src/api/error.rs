//! API error types with HTTP response mapping.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::api::response::ApiResponse;
use crate::errors::Error;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// Error raised by the business layer.
    Core(Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Core(err) => core_error_to_response(&err),
        };

        ApiResponse::<()>::of(status, message, None).into_response()
    }
}

fn core_error_to_response(err: &Error) -> (StatusCode, String) {
    match err {
        Error::Validation { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
        Error::StockNotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        Error::ProductNumberConflict { .. } | Error::InsufficientStock { .. } => {
            (StatusCode::CONFLICT, err.to_string())
        }
        Error::Database(_)
        | Error::Config { .. }
        | Error::InvalidProductNumber { .. }
        | Error::TotalPriceOverflow { .. }
        | Error::Io(_) => {
            tracing::error!(error = %err, "internal server error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self::Core(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

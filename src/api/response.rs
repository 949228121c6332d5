//! Response envelope shared by every `/api` endpoint.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

/// `{ code, status, message, data }` wrapper around a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Numeric HTTP status
    pub code: u16,
    /// Status name, e.g. `"BAD_REQUEST"`
    pub status: String,
    /// Human-readable message
    pub message: String,
    /// Payload, `null` for errors
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Builds an envelope for an arbitrary status.
    pub fn of(status: StatusCode, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            code: status.as_u16(),
            status: status_name(status),
            message: message.into(),
            data,
        }
    }

    /// `200 OK` carrying `data`.
    pub fn ok(data: T) -> Self {
        Self::of(StatusCode::OK, status_name(StatusCode::OK), Some(data))
    }
}

/// Upper snake case reason phrase: `400` becomes `"BAD_REQUEST"`.
fn status_name(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("UNKNOWN")
        .to_uppercase()
        .replace([' ', '-'], "_")
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope() {
        let response = ApiResponse::ok(vec![1, 2]);
        assert_eq!(response.code, 200);
        assert_eq!(response.status, "OK");
        assert_eq!(response.message, "OK");
        assert_eq!(response.data, Some(vec![1, 2]));
    }

    #[test]
    fn test_error_envelope_has_no_data() {
        let response: ApiResponse<()> =
            ApiResponse::of(StatusCode::BAD_REQUEST, "Product name is required.", None);
        assert_eq!(response.code, 400);
        assert_eq!(response.status, "BAD_REQUEST");
        assert_eq!(response.message, "Product name is required.");
        assert!(response.data.is_none());
    }
}

//! Health check endpoint.

use axum::Json;
use serde::Serialize;

/// Body of `GET /health`.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the server answers
    pub status: &'static str,
}

/// GET /health - liveness probe.
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

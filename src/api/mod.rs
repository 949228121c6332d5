//! HTTP layer - axum router, shared state, and response envelope.
//!
//! Handlers validate the request body, call into [`crate::core`], and wrap
//! the result in an [`response::ApiResponse`].

pub mod error;
pub mod response;
pub mod routes;

use axum::Router;
use axum::routing::{get, post};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared data available to all handlers.
pub struct AppState {
    /// Database connection pool
    pub database: DatabaseConnection,
}

impl AppState {
    /// Creates the state around an open connection.
    #[must_use]
    pub const fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

/// Creates the application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(routes::health::check))
        .route("/api/v1/products/new", post(routes::products::create))
        .route("/api/v1/products/selling", get(routes::products::selling))
        .route("/api/v1/orders/new", post(routes::orders::create))
        .route("/api/v1/orders/{id}", get(routes::orders::get))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

//! Order placement endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use sea_orm::prelude::DateTime;
use serde::{Deserialize, Serialize};

use crate::api::AppState;
use crate::api::error::ApiError;
use crate::api::response::ApiResponse;
use crate::api::routes::products::ProductResponse;
use crate::core::order::{self, PlacedOrder};
use crate::errors::{Error, Result};

// -- Request types --

/// Body of `POST /api/v1/orders/new`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreateRequest {
    /// Numbers to order; a repeated number orders the product again
    pub product_numbers: Option<Vec<String>>,
}

impl OrderCreateRequest {
    /// Returns the requested numbers, rejecting a missing or empty list.
    pub fn into_product_numbers(self) -> Result<Vec<String>> {
        self.product_numbers
            .filter(|numbers| !numbers.is_empty())
            .ok_or_else(|| Error::validation("Product number list is required."))
    }
}

// -- Response types --

/// A placed order as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    /// Storage id
    pub id: i64,
    /// Sum of the product prices
    pub total_price: i64,
    /// When the order was registered
    pub registered_at: DateTime,
    /// Product behind each line item
    pub products: Vec<ProductResponse>,
}

impl From<PlacedOrder> for OrderResponse {
    fn from(placed: PlacedOrder) -> Self {
        Self {
            id: placed.order.id,
            total_price: placed.order.total_price,
            registered_at: placed.order.registered_at,
            products: placed
                .products
                .into_iter()
                .map(ProductResponse::from)
                .collect(),
        }
    }
}

// -- Handlers --

/// POST /api/v1/orders/new - place an order registered at the current time.
#[tracing::instrument(skip(state, payload))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<OrderCreateRequest>, JsonRejection>,
) -> std::result::Result<ApiResponse<OrderResponse>, ApiError> {
    let Json(request) = payload?;
    let product_numbers = request.into_product_numbers()?;

    let registered_at = chrono::Local::now().naive_local();
    let placed = order::create_order(&state.database, &product_numbers, registered_at).await?;
    Ok(ApiResponse::ok(placed.into()))
}

/// GET /api/v1/orders/{id} - load an order with its products.
#[tracing::instrument(skip(state, id))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> std::result::Result<ApiResponse<OrderResponse>, ApiError> {
    let Path(id) = id?;
    let placed = order::get_order(&state.database, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Order {id} not found")))?;

    Ok(ApiResponse::ok(placed.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_product_numbers() {
        let result = OrderCreateRequest::default().into_product_numbers();
        assert!(matches!(
            result,
            Err(Error::Validation { message }) if message == "Product number list is required."
        ));
    }

    #[test]
    fn test_empty_product_numbers() {
        let request = OrderCreateRequest {
            product_numbers: Some(Vec::new()),
        };
        assert!(matches!(
            request.into_product_numbers(),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn test_duplicates_are_kept() {
        let request = OrderCreateRequest {
            product_numbers: Some(vec!["001".to_string(), "001".to_string()]),
        };
        assert!(matches!(
            request.into_product_numbers(),
            Ok(numbers) if numbers.len() == 2
        ));
    }
}

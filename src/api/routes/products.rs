//! Product catalog endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};

use crate::api::AppState;
use crate::api::error::ApiError;
use crate::api::response::ApiResponse;
use crate::core::product::{self, MAX_PRICE, NewProduct};
use crate::entities::{ProductType, SellingStatus, product as product_entity};
use crate::errors::{Error, Result};

// -- Request types --

/// Body of `POST /api/v1/products/new`. Fields are optional so a missing
/// field surfaces as a validation message rather than a decode error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreateRequest {
    /// Product category
    #[serde(rename = "type")]
    pub product_type: Option<ProductType>,
    /// Initial selling status
    pub selling_status: Option<SellingStatus>,
    /// Display name, must not be blank
    pub name: Option<String>,
    /// Unit price, must be positive
    pub price: Option<i64>,
}

impl ProductCreateRequest {
    /// Checks the fields in declaration order and reports the first violation.
    pub fn into_new_product(self) -> Result<NewProduct> {
        let product_type = self
            .product_type
            .ok_or_else(|| Error::validation("Product type is required."))?;
        let selling_status = self
            .selling_status
            .ok_or_else(|| Error::validation("Product selling status is required."))?;
        let name = self
            .name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| Error::validation("Product name is required."))?;
        let price = self
            .price
            .filter(|price| *price > 0)
            .ok_or_else(|| Error::validation("Product price must be positive."))?;
        if price > MAX_PRICE {
            return Err(Error::validation(format!(
                "Product price must not exceed {MAX_PRICE}."
            )));
        }

        Ok(NewProduct {
            product_type,
            selling_status,
            name,
            price,
        })
    }
}

// -- Response types --

/// A catalog product as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    /// Storage id
    pub id: i64,
    /// Sequential business key
    pub product_number: String,
    /// Product category
    #[serde(rename = "type")]
    pub product_type: ProductType,
    /// Current selling status
    pub selling_status: SellingStatus,
    /// Display name
    pub name: String,
    /// Unit price
    pub price: i64,
}

impl From<product_entity::Model> for ProductResponse {
    fn from(product: product_entity::Model) -> Self {
        Self {
            id: product.id,
            product_number: product.product_number,
            product_type: product.product_type,
            selling_status: product.selling_status,
            name: product.name,
            price: product.price,
        }
    }
}

// -- Handlers --

/// POST /api/v1/products/new - register a product under the next number.
#[tracing::instrument(skip(state, payload))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<ProductCreateRequest>, JsonRejection>,
) -> std::result::Result<ApiResponse<ProductResponse>, ApiError> {
    let Json(request) = payload?;
    let new_product = request.into_new_product()?;

    let created = product::create_product(&state.database, new_product).await?;
    Ok(ApiResponse::ok(created.into()))
}

/// GET /api/v1/products/selling - products shown on the menu.
#[tracing::instrument(skip(state))]
pub async fn selling(
    State(state): State<Arc<AppState>>,
) -> std::result::Result<ApiResponse<Vec<ProductResponse>>, ApiError> {
    let products = product::get_sellable_products(&state.database).await?;
    Ok(ApiResponse::ok(
        products.into_iter().map(ProductResponse::from).collect(),
    ))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn valid_request() -> ProductCreateRequest {
        ProductCreateRequest {
            product_type: Some(ProductType::Handmade),
            selling_status: Some(SellingStatus::Selling),
            name: Some("Americano".to_string()),
            price: Some(4000),
        }
    }

    fn message_of(request: ProductCreateRequest) -> String {
        match request.into_new_product() {
            Err(Error::Validation { message }) => message,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_request() {
        let new_product = valid_request().into_new_product().unwrap();
        assert_eq!(new_product.name, "Americano");
        assert_eq!(new_product.price, 4000);
    }

    #[test]
    fn test_first_missing_field_wins() {
        assert_eq!(
            message_of(ProductCreateRequest::default()),
            "Product type is required."
        );

        let request = ProductCreateRequest {
            selling_status: None,
            name: None,
            ..valid_request()
        };
        assert_eq!(message_of(request), "Product selling status is required.");
    }

    #[test]
    fn test_blank_name_and_price() {
        let request = ProductCreateRequest {
            name: Some("  ".to_string()),
            ..valid_request()
        };
        assert_eq!(message_of(request), "Product name is required.");

        let request = ProductCreateRequest {
            price: Some(0),
            ..valid_request()
        };
        assert_eq!(message_of(request), "Product price must be positive.");

        let request = ProductCreateRequest {
            price: Some(MAX_PRICE + 1),
            ..valid_request()
        };
        assert_eq!(
            message_of(request),
            format!("Product price must not exceed {MAX_PRICE}.")
        );
    }

    #[test]
    fn test_request_uses_camel_case() {
        let request: ProductCreateRequest = serde_json::from_str(
            r#"{"type":"BOTTLE","sellingStatus":"HOLD","name":"Water","price":1000}"#,
        )
        .unwrap();
        let new_product = request.into_new_product().unwrap();
        assert_eq!(new_product.product_type, ProductType::Bottle);
        assert_eq!(new_product.selling_status, SellingStatus::Hold);
    }
}

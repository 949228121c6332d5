//! Shared test utilities for the kiosk backend.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::product::NewProduct,
    entities::{ProductType, SellingStatus, product},
    errors::Result,
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Builds a creation request with sensible defaults.
///
/// # Defaults
/// * `product_type`: Handmade
/// * `selling_status`: Selling
pub fn new_product(name: &str, price: i64) -> NewProduct {
    NewProduct {
        product_type: ProductType::Handmade,
        selling_status: SellingStatus::Selling,
        name: name.to_string(),
        price,
    }
}

/// Inserts a product with an explicit number, bypassing number assignment.
/// Use this to arrange a catalog before exercising the service functions.
pub async fn insert_product(
    db: &DatabaseConnection,
    product_number: &str,
    selling_status: SellingStatus,
    name: &str,
    price: i64,
) -> Result<product::Model> {
    let now = chrono::Utc::now().naive_utc();
    product::ActiveModel {
        product_number: Set(product_number.to_string()),
        product_type: Set(ProductType::Handmade),
        selling_status: Set(selling_status),
        name: Set(name.to_string()),
        price: Set(price),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Builds an unsaved product model for pure aggregate tests.
pub fn product_model(id: i64, product_number: &str, price: i64) -> product::Model {
    let now = chrono::Utc::now().naive_utc();
    product::Model {
        id,
        product_number: product_number.to_string(),
        product_type: ProductType::Handmade,
        selling_status: SellingStatus::Selling,
        name: "Menu item".to_string(),
        price,
        created_at: now,
        updated_at: now,
    }
}

//! Stock entity - Quantity on hand per product number.
//!
//! Stock rows share only the product number with the catalog; there is no
//! foreign key to `products`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Stock database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stocks")]
pub struct Model {
    /// Unique identifier for the stock row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Product number this quantity belongs to
    #[sea_orm(unique)]
    pub product_number: String,
    /// Units on hand, never negative
    pub quantity: i64,
    /// When the row was created
    pub created_at: DateTime,
    /// When the row was last modified
    pub updated_at: DateTime,
}

/// `Stock` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Returns true when fewer than `quantity` units are on hand.
    #[must_use]
    pub const fn is_quantity_less_than(&self, quantity: i64) -> bool {
        self.quantity < quantity
    }
}

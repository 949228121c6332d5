//! Product entity - Represents a catalog item offered by the kiosk.
//!
//! Each product has a generated id and a human-readable `product_number`
//! ("001", "002", ...) that is unique across the catalog. The type and
//! selling status are stored as upper-case strings.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Sequential business key, zero-padded to at least three digits
    #[sea_orm(unique)]
    pub product_number: String,
    /// Category of the product
    pub product_type: ProductType,
    /// Whether the product is currently offered
    pub selling_status: SellingStatus,
    /// Display name (e.g., "Americano")
    pub name: String,
    /// Unit price in the smallest currency unit
    pub price: i64,
    /// When the product was created
    pub created_at: DateTime,
    /// When the product was last modified
    pub updated_at: DateTime,
}

/// Products hold no navigable relations; line items point at them.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Product category.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductType {
    /// Beverage made to order
    #[sea_orm(string_value = "HANDMADE")]
    Handmade,
    /// Bottled beverage
    #[sea_orm(string_value = "BOTTLE")]
    Bottle,
    /// Baked goods
    #[sea_orm(string_value = "BAKERY")]
    Bakery,
}

impl ProductType {
    /// Human-readable label.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::Handmade => "Handmade beverage",
            Self::Bottle => "Bottled beverage",
            Self::Bakery => "Bakery",
        }
    }

    /// Whether products of this type are tracked in the stock ledger.
    #[must_use]
    pub const fn contains_stock_type(self) -> bool {
        matches!(self, Self::Bottle | Self::Bakery)
    }
}

/// Selling status of a product.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SellingStatus {
    /// On sale
    #[sea_orm(string_value = "SELLING")]
    Selling,
    /// Temporarily unavailable
    #[sea_orm(string_value = "HOLD")]
    Hold,
    /// Discontinued
    #[sea_orm(string_value = "STOP_SELLING")]
    StopSelling,
}

impl SellingStatus {
    /// Human-readable label.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::Selling => "Selling",
            Self::Hold => "On hold",
            Self::StopSelling => "Stopped selling",
        }
    }

    /// Statuses shown on the kiosk menu.
    #[must_use]
    pub const fn for_display() -> [Self; 2] {
        [Self::Selling, Self::Hold]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_stock_type() {
        assert!(!ProductType::Handmade.contains_stock_type());
        assert!(ProductType::Bottle.contains_stock_type());
        assert!(ProductType::Bakery.contains_stock_type());
    }

    #[test]
    fn test_for_display_excludes_stop_selling() {
        let statuses = SellingStatus::for_display();
        assert_eq!(statuses, [SellingStatus::Selling, SellingStatus::Hold]);
        assert!(!statuses.contains(&SellingStatus::StopSelling));
    }

    #[test]
    fn test_status_serializes_in_upper_snake_case() {
        let json = serde_json::to_string(&SellingStatus::StopSelling).unwrap_or_default();
        assert_eq!(json, "\"STOP_SELLING\"");
    }
}

//! Order entity - A placed order and its computed total.
//!
//! Line items live in [`super::order_product`]; an order and its line items
//! are always written in the same database transaction.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Sum of the line item prices at the time the order was placed
    pub total_price: i64,
    /// Processing state
    pub order_status: OrderStatus,
    /// Caller-supplied time the order was registered
    pub registered_at: DateTime,
    /// When the row was created
    pub created_at: DateTime,
    /// When the row was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One order has many line items
    #[sea_orm(has_many = "super::order_product::Entity")]
    OrderProducts,
}

impl Related<super::order_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderProducts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Order processing state. New orders always start in [`OrderStatus::Init`].
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Just placed
    #[sea_orm(string_value = "INIT")]
    Init,
    /// Canceled by the customer
    #[sea_orm(string_value = "CANCELED")]
    Canceled,
    /// Paid
    #[sea_orm(string_value = "PAYMENT_COMPLETED")]
    PaymentCompleted,
    /// Payment was declined
    #[sea_orm(string_value = "PAYMENT_FAILED")]
    PaymentFailed,
    /// Accepted by the counter
    #[sea_orm(string_value = "RECEIVED")]
    Received,
    /// Handed over
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
}

impl OrderStatus {
    /// Human-readable label.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::Init => "Order created",
            Self::Canceled => "Order canceled",
            Self::PaymentCompleted => "Payment completed",
            Self::PaymentFailed => "Payment failed",
            Self::Received => "Order received",
            Self::Completed => "Processing completed",
        }
    }
}

//! Unified error types for the kiosk backend.
//!
//! Every fallible operation in `core` and `config` returns [`Result`]. The HTTP
//! layer translates these into status codes in [`crate::api::error`].

use thiserror::Error;

/// Crate-wide error type
#[derive(Debug, Error)]
pub enum Error {
    /// Storage failure, propagated from `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Caller input failed validation; the message is shown to the client as-is
    #[error("{message}")]
    Validation {
        /// Message for the first violated field
        message: String,
    },

    /// A stored product number is not a decimal sequence value
    #[error("Invalid product number: {number}")]
    InvalidProductNumber {
        /// The offending number
        number: String,
    },

    /// Concurrent writers kept claiming the next product number
    #[error("Product number {number} was still taken after {attempts} attempts")]
    ProductNumberConflict {
        /// Last number tried
        number: String,
        /// Attempts made before giving up
        attempts: u32,
    },

    /// Summing the line item prices overflowed the total
    #[error("Order total overflows: {line_items} line items")]
    TotalPriceOverflow {
        /// Number of line items being priced
        line_items: usize,
    },

    /// No stock row exists for the product number
    #[error("Stock not found for product: {product_number}")]
    StockNotFound {
        /// Product number that was looked up
        product_number: String,
    },

    /// Decrement would take the quantity below zero
    #[error(
        "Insufficient stock for product {product_number}: available {available}, requested {requested}"
    )]
    InsufficientStock {
        /// Product number of the stock row
        product_number: String,
        /// Quantity on hand
        available: i64,
        /// Quantity asked for
        requested: i64,
    },

    /// I/O failure (socket bind, config file)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a [`Error::Validation`] with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

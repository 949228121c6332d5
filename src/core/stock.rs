//! Stock business logic - the per-product-number quantity ledger.
//!
//! Stock rows are keyed by product number. Decrements are applied with a
//! single conditional UPDATE so concurrent callers can never drive a
//! quantity below zero.

use crate::{
    entities::{Stock, stock},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, instrument};

/// Creates the stock row for a product number.
///
/// # Errors
/// Returns an error if the quantity is negative, a row already exists for the
/// product number, or the insert fails.
pub async fn create_stock<C>(db: &C, product_number: &str, quantity: i64) -> Result<stock::Model>
where
    C: ConnectionTrait,
{
    if quantity < 0 {
        return Err(Error::validation("Stock quantity cannot be negative."));
    }

    let now = chrono::Utc::now().naive_utc();
    let stock = stock::ActiveModel {
        product_number: Set(product_number.to_string()),
        quantity: Set(quantity),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    stock.insert(db).await.map_err(Into::into)
}

/// Retrieves the stock rows for the given product numbers.
///
/// Numbers without a stock row are absent from the result.
pub async fn find_by_product_numbers<C>(db: &C, numbers: &[String]) -> Result<Vec<stock::Model>>
where
    C: ConnectionTrait,
{
    if numbers.is_empty() {
        return Ok(Vec::new());
    }

    Stock::find()
        .filter(stock::Column::ProductNumber.is_in(numbers.iter().map(String::as_str)))
        .order_by_asc(stock::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Removes `quantity` units from the stock of a product.
///
/// # Errors
/// Returns an error if:
/// - `quantity` is negative
/// - No stock row exists for the product number
/// - Fewer than `quantity` units are on hand
/// - The database update fails
#[instrument(skip(db))]
pub async fn deduct_quantity<C>(db: &C, product_number: &str, quantity: i64) -> Result<stock::Model>
where
    C: ConnectionTrait,
{
    use sea_orm::sea_query::Expr;

    if quantity < 0 {
        return Err(Error::validation("Deducted quantity cannot be negative."));
    }

    let current = find_one(db, product_number).await?;
    if current.is_quantity_less_than(quantity) {
        return Err(insufficient(&current, quantity));
    }

    // Guarded update: only succeeds while enough units remain
    let result = Stock::update_many()
        .col_expr(
            stock::Column::Quantity,
            Expr::col(stock::Column::Quantity).sub(quantity),
        )
        .col_expr(
            stock::Column::UpdatedAt,
            Expr::value(chrono::Utc::now().naive_utc()),
        )
        .filter(stock::Column::Id.eq(current.id))
        .filter(stock::Column::Quantity.gte(quantity))
        .exec(db)
        .await?;

    let updated = find_one(db, product_number).await?;
    if result.rows_affected == 0 {
        return Err(insufficient(&updated, quantity));
    }

    debug!(remaining = updated.quantity, "Stock deducted");
    Ok(updated)
}

async fn find_one<C>(db: &C, product_number: &str) -> Result<stock::Model>
where
    C: ConnectionTrait,
{
    Stock::find()
        .filter(stock::Column::ProductNumber.eq(product_number))
        .one(db)
        .await?
        .ok_or_else(|| Error::StockNotFound {
            product_number: product_number.to_string(),
        })
}

fn insufficient(stock: &stock::Model, requested: i64) -> Error {
    Error::InsufficientStock {
        product_number: stock.product_number.clone(),
        available: stock.quantity,
        requested,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_find_by_product_numbers() -> Result<()> {
        let db = setup_test_db().await?;
        create_stock(&db, "001", 1).await?;
        create_stock(&db, "002", 2).await?;
        create_stock(&db, "003", 3).await?;

        let numbers = vec!["001".to_string(), "002".to_string()];
        let mut stocks: Vec<(String, i64)> = find_by_product_numbers(&db, &numbers)
            .await?
            .into_iter()
            .map(|s| (s.product_number, s.quantity))
            .collect();
        stocks.sort();

        assert_eq!(
            stocks,
            vec![("001".to_string(), 1), ("002".to_string(), 2)]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_find_by_product_numbers_omits_unknown() -> Result<()> {
        let db = setup_test_db().await?;
        create_stock(&db, "001", 1).await?;

        let stocks = find_by_product_numbers(&db, &["404".to_string()]).await?;
        assert!(stocks.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_is_quantity_less_than() -> Result<()> {
        let db = setup_test_db().await?;
        let stock = create_stock(&db, "001", 1).await?;

        assert!(stock.is_quantity_less_than(2));
        assert!(!stock.is_quantity_less_than(1));

        Ok(())
    }

    #[tokio::test]
    async fn test_deduct_quantity() -> Result<()> {
        let db = setup_test_db().await?;
        create_stock(&db, "001", 3).await?;

        let stock = deduct_quantity(&db, "001", 2).await?;
        assert_eq!(stock.quantity, 1);

        let stock = deduct_quantity(&db, "001", 1).await?;
        assert_eq!(stock.quantity, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_deduct_more_than_available() -> Result<()> {
        let db = setup_test_db().await?;
        create_stock(&db, "001", 1).await?;

        let result = deduct_quantity(&db, "001", 2).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InsufficientStock {
                available: 1,
                requested: 2,
                ..
            }
        ));

        // Quantity is untouched
        let stocks = find_by_product_numbers(&db, &["001".to_string()]).await?;
        assert_eq!(stocks[0].quantity, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_deduct_unknown_product() -> Result<()> {
        let db = setup_test_db().await?;

        let result = deduct_quantity(&db, "404", 1).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::StockNotFound { product_number } if product_number == "404"
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_stock_rejects_negative_quantity() -> Result<()> {
        let db = setup_test_db().await?;
        let result = create_stock(&db, "001", -1).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));
        Ok(())
    }
}

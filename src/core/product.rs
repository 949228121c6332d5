//! Product business logic - catalog queries, numbering, and creation.
//!
//! Product numbers are human-readable sequence values ("001", "002", ...).
//! The next number is derived from the most recently inserted product, and
//! the unique constraint on `product_number` turns a lost race into a retry
//! instead of a duplicate.

use crate::{
    config::catalog::ProductSeed,
    entities::{Product, ProductType, SellingStatus, product},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, QuerySelect, Set, SqlErr, prelude::*};
use tracing::{debug, info, instrument, warn};

/// Number handed out when the catalog is empty.
pub const FIRST_PRODUCT_NUMBER: &str = "001";

/// Highest accepted unit price.
pub const MAX_PRICE: i64 = i32::MAX as i64;

const PRODUCT_NUMBER_WIDTH: usize = 3;
const MAX_NUMBER_ATTEMPTS: u32 = 3;

/// Input for [`create_product`]; the number is assigned by the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    /// Product category
    pub product_type: ProductType,
    /// Initial selling status
    pub selling_status: SellingStatus,
    /// Display name
    pub name: String,
    /// Unit price, between 1 and [`MAX_PRICE`]
    pub price: i64,
}

/// Retrieves every product the kiosk shows on its menu (SELLING or HOLD).
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_sellable_products<C>(db: &C) -> Result<Vec<product::Model>>
where
    C: ConnectionTrait,
{
    find_by_selling_status_in(db, &SellingStatus::for_display()).await
}

/// Retrieves all products whose status is one of `statuses`, in id order.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn find_by_selling_status_in<C>(
    db: &C,
    statuses: &[SellingStatus],
) -> Result<Vec<product::Model>>
where
    C: ConnectionTrait,
{
    if statuses.is_empty() {
        return Ok(Vec::new());
    }

    Product::find()
        .filter(product::Column::SellingStatus.is_in(statuses.iter().copied()))
        .order_by_asc(product::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the products matching the given numbers.
///
/// Numbers with no product are simply absent from the result. Each product
/// appears once no matter how often its number is repeated in the input.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn find_by_product_numbers<C>(db: &C, numbers: &[String]) -> Result<Vec<product::Model>>
where
    C: ConnectionTrait,
{
    if numbers.is_empty() {
        return Ok(Vec::new());
    }

    Product::find()
        .filter(product::Column::ProductNumber.is_in(numbers.iter().map(String::as_str)))
        .order_by_asc(product::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Returns the number of the most recently inserted product, or `None` for an
/// empty catalog.
///
/// Insertion order (the id) decides, not string order, so "1000" follows "999".
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn find_latest_product_number<C>(db: &C) -> Result<Option<String>>
where
    C: ConnectionTrait,
{
    Product::find()
        .select_only()
        .column(product::Column::ProductNumber)
        .order_by_desc(product::Column::Id)
        .into_tuple::<String>()
        .one(db)
        .await
        .map_err(Into::into)
}

/// Computes the number that follows `latest`.
///
/// Numbers are zero-padded to three digits and widen past "999".
///
/// # Errors
/// Returns [`Error::InvalidProductNumber`] when `latest` is not a decimal number.
pub fn next_product_number(latest: Option<&str>) -> Result<String> {
    let Some(latest) = latest else {
        return Ok(FIRST_PRODUCT_NUMBER.to_string());
    };

    let current: u64 = latest
        .parse()
        .map_err(|_| Error::InvalidProductNumber {
            number: latest.to_string(),
        })?;
    let next = current
        .checked_add(1)
        .ok_or_else(|| Error::InvalidProductNumber {
            number: latest.to_string(),
        })?;

    Ok(format!("{next:0width$}", width = PRODUCT_NUMBER_WIDTH))
}

/// Creates a new product with the next product number.
///
/// # Errors
/// Returns an error if:
/// - The product name is empty or whitespace-only
/// - The price is not positive or exceeds [`MAX_PRICE`]
/// - The latest stored number is not numeric
/// - Concurrent writers claimed the next number on every attempt
/// - The database insert operation fails
#[instrument(skip(db))]
pub async fn create_product<C>(db: &C, new_product: NewProduct) -> Result<product::Model>
where
    C: ConnectionTrait,
{
    validate_new_product(&new_product)?;

    let name = new_product.name.trim().to_string();
    let latest = find_latest_product_number(db).await?;
    let mut number = next_product_number(latest.as_deref())?;

    for attempt in 1..=MAX_NUMBER_ATTEMPTS {
        if attempt > 1 {
            // The previous candidate is taken; move past it
            number = next_product_number(Some(number.as_str()))?;
        }
        debug!(%number, attempt, "Assigning product number");

        let now = chrono::Utc::now().naive_utc();
        let product = product::ActiveModel {
            product_number: Set(number.clone()),
            product_type: Set(new_product.product_type),
            selling_status: Set(new_product.selling_status),
            name: Set(name.clone()),
            price: Set(new_product.price),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        match product.insert(db).await {
            Ok(created) => {
                info!(product_number = %created.product_number, "Product created");
                return Ok(created);
            }
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                warn!(%number, attempt, "Product number already taken, retrying");
            }
            Err(err) => return Err(err.into()),
        }
    }

    Err(Error::ProductNumberConflict {
        number,
        attempts: MAX_NUMBER_ATTEMPTS,
    })
}

fn validate_new_product(new_product: &NewProduct) -> Result<()> {
    if new_product.name.trim().is_empty() {
        return Err(Error::validation("Product name is required."));
    }

    if new_product.price <= 0 {
        return Err(Error::validation("Product price must be positive."));
    }

    if new_product.price > MAX_PRICE {
        return Err(Error::validation(format!(
            "Product price must not exceed {MAX_PRICE}."
        )));
    }

    Ok(())
}

/// Seeds the catalog from configuration when no products exist yet.
///
/// Products are numbered in the order given. Seeds that carry a stock quantity
/// also get a stock row. Returns the number of products created.
///
/// # Errors
/// Returns an error if any seed fails validation or a database write fails;
/// all writes are rolled back in that case.
pub async fn seed_catalog(db: &DatabaseConnection, seeds: &[ProductSeed]) -> Result<usize> {
    use sea_orm::TransactionTrait;

    if seeds.is_empty() {
        return Ok(0);
    }

    let txn = db.begin().await?;

    if find_latest_product_number(&txn).await?.is_some() {
        info!("Catalog already populated, skipping seed");
        return Ok(0);
    }

    for seed in seeds {
        let created = create_product(
            &txn,
            NewProduct {
                product_type: seed.product_type,
                selling_status: seed.selling_status,
                name: seed.name.clone(),
                price: seed.price,
            },
        )
        .await?;

        if let Some(quantity) = seed.stock {
            crate::core::stock::create_stock(&txn, &created.product_number, quantity).await?;
        }
    }

    txn.commit().await?;

    info!(count = seeds.len(), "Catalog seeded");
    Ok(seeds.len())
}

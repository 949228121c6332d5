//! Order business logic - the order aggregate and order placement.
//!
//! [`NewOrder::create`] is pure: it prices a list of products and builds one
//! line item per product, without touching the clock or the database. The
//! total is summed with overflow checks.
//! [`create_order`] resolves product numbers against the catalog and writes
//! the order together with its line items in a single transaction.

use crate::{
    entities::{Order, OrderProduct, OrderStatus, Product, order, order_product, product},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use std::collections::HashMap;
use tracing::{info, instrument, warn};

/// An order that has been priced but not yet stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    /// Sum of the product prices
    pub total_price: i64,
    /// Always [`OrderStatus::Init`]
    pub status: OrderStatus,
    /// Time supplied by the caller
    pub registered_at: DateTime,
    /// One entry per input product, duplicates included
    pub line_items: Vec<NewOrderProduct>,
}

/// A line item owned by a [`NewOrder`]; the order id is assigned on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderProduct {
    /// Id of the ordered product
    pub product_id: i64,
}

impl NewOrder {
    /// Builds an order from the given products.
    ///
    /// An empty slice yields a valid order with a zero total and no line items.
    ///
    /// # Errors
    /// Returns [`Error::TotalPriceOverflow`] if the prices do not fit in an `i64`.
    pub fn create(products: &[product::Model], registered_at: DateTime) -> Result<Self> {
        Ok(Self {
            total_price: calculate_total_price(products)?,
            status: OrderStatus::Init,
            registered_at,
            line_items: products
                .iter()
                .map(|product| NewOrderProduct {
                    product_id: product.id,
                })
                .collect(),
        })
    }
}

fn calculate_total_price(products: &[product::Model]) -> Result<i64> {
    products
        .iter()
        .try_fold(0_i64, |total, product| total.checked_add(product.price))
        .ok_or(Error::TotalPriceOverflow {
            line_items: products.len(),
        })
}

/// A stored order with the products of its line items, in line item order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    /// The stored order row
    pub order: order::Model,
    /// Product behind each line item
    pub products: Vec<product::Model>,
}

/// Places an order for the given product numbers.
///
/// Each requested number becomes one line item, so repeating a number orders
/// the product again. Numbers that match no product are skipped.
///
/// # Errors
/// Returns an error if the total overflows or a database read or write fails;
/// in that case neither the order nor any of its line items are stored.
#[instrument(skip(db))]
pub async fn create_order(
    db: &DatabaseConnection,
    product_numbers: &[String],
    registered_at: DateTime,
) -> Result<PlacedOrder> {
    let products = find_products_by(db, product_numbers).await?;
    let new_order = NewOrder::create(&products, registered_at)?;

    let txn = db.begin().await?;
    let order = insert_order(&txn, &new_order).await?;
    txn.commit().await?;

    info!(
        order_id = order.id,
        total_price = order.total_price,
        line_items = new_order.line_items.len(),
        "Order created"
    );

    Ok(PlacedOrder { order, products })
}

/// Resolves each requested number to its product, keeping duplicates and the
/// requested order.
async fn find_products_by<C>(db: &C, product_numbers: &[String]) -> Result<Vec<product::Model>>
where
    C: ConnectionTrait,
{
    let found = crate::core::product::find_by_product_numbers(db, product_numbers).await?;
    let by_number: HashMap<&str, &product::Model> = found
        .iter()
        .map(|product| (product.product_number.as_str(), product))
        .collect();

    Ok(product_numbers
        .iter()
        .filter_map(|number| {
            let product = by_number.get(number.as_str()).copied().cloned();
            if product.is_none() {
                warn!(product_number = %number, "Skipping unknown product number");
            }
            product
        })
        .collect())
}

/// Writes an order and all of its line items.
///
/// Callers pass a transaction so the rows commit together.
pub async fn insert_order<C>(db: &C, new_order: &NewOrder) -> Result<order::Model>
where
    C: ConnectionTrait,
{
    let now = chrono::Utc::now().naive_utc();
    let order = order::ActiveModel {
        total_price: Set(new_order.total_price),
        order_status: Set(new_order.status),
        registered_at: Set(new_order.registered_at),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    for line_item in &new_order.line_items {
        order_product::ActiveModel {
            order_id: Set(order.id),
            product_id: Set(line_item.product_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    Ok(order)
}

/// Retrieves an order with the products of its line items.
///
/// Returns `None` if no order has the given id.
pub async fn get_order<C>(db: &C, order_id: i64) -> Result<Option<PlacedOrder>>
where
    C: ConnectionTrait,
{
    let Some(order) = Order::find_by_id(order_id).one(db).await? else {
        return Ok(None);
    };

    let products = find_order_lines(db, order_id)
        .await?
        .into_iter()
        .map(|(_, product)| product)
        .collect();

    Ok(Some(PlacedOrder { order, products }))
}

/// Joins the line items of an order to their products, in line item order.
pub async fn find_order_lines<C>(
    db: &C,
    order_id: i64,
) -> Result<Vec<(order_product::Model, product::Model)>>
where
    C: ConnectionTrait,
{
    let rows = OrderProduct::find()
        .filter(order_product::Column::OrderId.eq(order_id))
        .order_by_asc(order_product::Column::Id)
        .find_also_related(Product)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(line_item, product)| product.map(|product| (line_item, product)))
        .collect())
}

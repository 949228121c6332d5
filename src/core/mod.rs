//! Core business logic - framework-agnostic catalog, order, and stock operations.
//!
//! Functions here take a `SeaORM` connection (or transaction) and return plain
//! entity models or small result structs; the HTTP layer shapes the responses.

pub mod order;
pub mod product;
pub mod stock;

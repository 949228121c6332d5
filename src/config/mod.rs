/// Catalog seed loading from config.toml
pub mod catalog;

/// Database configuration and connection management
pub mod database;

/// HTTP bind address from environment variables
pub mod server;

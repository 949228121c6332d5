//! Catalog seed loading from a TOML file.
//!
//! The products defined in the seed file are inserted on startup when the
//! catalog is still empty. A product may carry an initial stock quantity.

use crate::entities::{ProductType, SellingStatus};
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Configuration structure representing the entire seed file
#[derive(Debug, Default, Deserialize)]
pub struct CatalogConfig {
    /// Products to seed, numbered in file order
    #[serde(default)]
    pub products: Vec<ProductSeed>,
}

/// Configuration for a single seeded product
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ProductSeed {
    /// Display name
    pub name: String,
    /// Product category
    #[serde(rename = "type")]
    pub product_type: ProductType,
    /// Initial selling status
    pub selling_status: SellingStatus,
    /// Unit price
    pub price: i64,
    /// Initial stock quantity; no stock row is created when absent
    #[serde(default)]
    pub stock: Option<i64>,
}

/// Loads the catalog seed from a TOML file
///
/// # Errors
/// Returns [`Error::Config`] if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CatalogConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read catalog file {:?}: {e}", path.as_ref()),
    })?;

    parse_config(&contents)
}

/// Loads the seed file if it exists; a missing file yields an empty catalog.
///
/// # Errors
/// Returns [`Error::Config`] if the file exists but cannot be read or parsed.
pub fn load_optional_config<P: AsRef<Path>>(path: P) -> Result<CatalogConfig> {
    if path.as_ref().exists() {
        load_config(path)
    } else {
        info!("No catalog file at {:?}, skipping seed", path.as_ref());
        Ok(CatalogConfig::default())
    }
}

fn parse_config(contents: &str) -> Result<CatalogConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse catalog file: {e}"),
    })
}

/// Returns the seed file path from `CATALOG_CONFIG`, defaulting to `./config.toml`.
#[must_use]
pub fn get_catalog_path() -> String {
    std::env::var("CATALOG_CONFIG").unwrap_or_else(|_| "config.toml".to_string())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_catalog_config() {
        let toml_str = r#"
            [[products]]
            name = "Americano"
            type = "HANDMADE"
            selling_status = "SELLING"
            price = 4000

            [[products]]
            name = "Croissant"
            type = "BAKERY"
            selling_status = "HOLD"
            price = 3500
            stock = 10
        "#;

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.products.len(), 2);
        assert_eq!(config.products[0].name, "Americano");
        assert_eq!(config.products[0].product_type, ProductType::Handmade);
        assert_eq!(config.products[0].stock, None);

        assert_eq!(config.products[1].selling_status, SellingStatus::Hold);
        assert_eq!(config.products[1].stock, Some(10));
    }

    #[test]
    fn test_unknown_status_is_config_error() {
        let toml_str = r#"
            [[products]]
            name = "Americano"
            type = "HANDMADE"
            selling_status = "SOLD_OUT"
            price = 4000
        "#;

        assert!(matches!(
            parse_config(toml_str),
            Err(Error::Config { message: _ })
        ));
    }

    #[test]
    fn test_shipped_catalog_seeds_americano() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config.toml");
        let config = load_config(path).unwrap();

        let americano = config
            .products
            .iter()
            .find(|p| p.name == "Americano")
            .unwrap();
        assert_eq!(americano.product_type, ProductType::Handmade);
        assert_eq!(americano.price, 4000);
    }

    #[test]
    fn test_missing_file_yields_empty_catalog() {
        let config = load_optional_config("does/not/exist.toml").unwrap();
        assert!(config.products.is_empty());
    }
}

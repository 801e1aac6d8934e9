//! Fixtures
//!
//! YAML catalogs for tests, demos and seeding.

use std::{fs, path::PathBuf};

use rusty_money::iso::Currency;
use thiserror::Error;

use crate::catalog::{Catalog, CatalogError};

pub mod products;

pub use products::{ProductFixture, ProductsFixture, parse_currency, parse_price};

/// The till's default showroom catalog.
pub const SHOWROOM_CATALOG: &str = include_str!("../../fixtures/products/showroom.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between the fixture and a product
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Catalog construction failed
    #[error("Failed to build catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Fixture loader rooted at a base directory.
#[derive(Debug, Clone)]
pub struct Fixture {
    base_path: PathBuf,
}

impl Fixture {
    /// Create a loader with the default base path
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a loader with a custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Load `products/{name}.yml` as a catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or the products don't form a valid
    /// catalog.
    pub fn load_catalog(&self, name: &str) -> Result<Catalog<'static>, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;

        catalog_from_yaml(&contents)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a products fixture document into a catalog.
///
/// # Errors
///
/// Returns an error if the YAML is invalid, a price can't be parsed, or the products don't form a
/// valid catalog.
pub fn catalog_from_yaml(contents: &str) -> Result<Catalog<'static>, FixtureError> {
    let fixture: ProductsFixture = serde_norway::from_str(contents)?;
    let currency: &'static Currency = parse_currency(&fixture.currency)?;

    let products = fixture
        .products
        .into_iter()
        .map(|product| product.into_product(currency))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Catalog::with_products(products, currency)?)
}

/// The default showroom catalog.
///
/// # Errors
///
/// Returns an error if the bundled fixture is invalid.
pub fn showroom_catalog() -> Result<Catalog<'static>, FixtureError> {
    catalog_from_yaml(SHOWROOM_CATALOG)
}

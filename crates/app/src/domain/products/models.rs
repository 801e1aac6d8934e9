//! Product Models

use fernwood::{
    money::STORE_CURRENCY,
    products::{Product as CatalogProduct, ProductId, StockStatus},
};
use rusty_money::Money;
use serde::{Deserialize, Serialize};

use crate::listing::SortOrder;

/// Product Model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub sku: String,

    /// Category slug
    pub category: String,

    /// Unit price in minor units
    pub price: u64,

    pub stock: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Product {
    /// Stock status against the store's low stock threshold.
    #[must_use]
    pub fn status(&self, low_stock_threshold: u32) -> StockStatus {
        StockStatus::from_stock(self.stock, low_stock_threshold)
    }

    /// The till's view of this product.
    ///
    /// # Errors
    ///
    /// Returns an error if the price doesn't fit in signed minor units.
    pub fn to_catalog_product(&self) -> Result<CatalogProduct<'static>, std::num::TryFromIntError> {
        Ok(CatalogProduct::new(
            self.id.clone(),
            self.name.clone(),
            self.sku.clone(),
            Money::from_minor(i64::try_from(self.price)?, STORE_CURRENCY),
            self.stock,
        ))
    }
}

/// New Product Model
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub sku: String,
    pub category: String,
    pub price: u64,
    pub stock: u32,
    pub image_url: Option<String>,
}

/// Product Update Model
///
/// Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub category: Option<String>,
    pub price: Option<u64>,
    pub stock: Option<u32>,
    pub image_url: Option<String>,
}

/// Column to sort products by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    #[default]
    Name,
    Price,
    Stock,
}

/// Product listing filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Matched against name and SKU, ignoring case
    pub search: Option<String>,

    /// Category slug
    pub category: Option<String>,

    pub status: Option<StockStatus>,
    pub sort: ProductSort,
    pub order: SortOrder,
}

//! Products

use std::fmt;

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};

/// Stock level at or below which a product counts as running low.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 5;

/// Product identifier, e.g. `PROD-000001`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Wrap an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Catalog entry as seen by the till.
#[derive(Debug, Clone, PartialEq)]
pub struct Product<'a> {
    /// Product identifier
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Stock keeping unit
    pub sku: String,

    /// Unit price
    pub price: Money<'a, Currency>,

    /// Units on hand. Advisory only: the till checks it but never decrements it.
    pub stock: u32,
}

impl<'a> Product<'a> {
    /// Create a new product.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        sku: impl Into<String>,
        price: Money<'a, Currency>,
        stock: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sku: sku.into(),
            price,
            stock,
        }
    }

    /// Stock status using the default low stock threshold.
    #[must_use]
    pub fn stock_status(&self) -> StockStatus {
        StockStatus::from_stock(self.stock, DEFAULT_LOW_STOCK_THRESHOLD)
    }
}

/// Stock status shown next to a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    /// More than the low stock threshold on hand.
    InStock,

    /// Some stock, but at or below the threshold.
    LowStock,

    /// Nothing on hand.
    OutOfStock,
}

impl StockStatus {
    /// Derive the status from a stock level and a low stock threshold.
    #[must_use]
    pub const fn from_stock(stock: u32, threshold: u32) -> Self {
        if stock == 0 {
            Self::OutOfStock
        } else if stock <= threshold {
            Self::LowStock
        } else {
            Self::InStock
        }
    }

    /// Stable lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InStock => "in_stock",
            Self::LowStock => "low_stock",
            Self::OutOfStock => "out_of_stock",
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::money::STORE_CURRENCY;

    use super::*;

    #[test]
    fn stock_status_boundaries() {
        assert_eq!(StockStatus::from_stock(0, 5), StockStatus::OutOfStock);
        assert_eq!(StockStatus::from_stock(1, 5), StockStatus::LowStock);
        assert_eq!(StockStatus::from_stock(5, 5), StockStatus::LowStock);
        assert_eq!(StockStatus::from_stock(6, 5), StockStatus::InStock);
    }

    #[test]
    fn zero_threshold_only_flags_empty_stock() {
        assert_eq!(StockStatus::from_stock(1, 0), StockStatus::InStock);
        assert_eq!(StockStatus::from_stock(0, 0), StockStatus::OutOfStock);
    }

    #[test]
    fn product_uses_default_threshold() {
        let product = Product::new(
            "TBL-001",
            "Coffee Table",
            "TBL-001",
            Money::from_minor(24_999, STORE_CURRENCY),
            2,
        );

        assert_eq!(product.stock_status(), StockStatus::LowStock);
    }
}

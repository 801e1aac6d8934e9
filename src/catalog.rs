//! Catalog

use rusty_money::iso::Currency;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::products::{Product, ProductId};

/// Errors raised while building a catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Two entries share an identifier.
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),

    /// A product is priced in a different currency from the catalog.
    #[error("product {product} has currency {found}, but catalog has currency {expected}")]
    CurrencyMismatch {
        /// Offending product
        product: ProductId,
        /// Product currency
        found: &'static str,
        /// Catalog currency
        expected: &'static str,
    },
}

/// Products available to the till, in display order.
#[derive(Debug, Clone)]
pub struct Catalog<'a> {
    products: Vec<Product<'a>>,
    index: FxHashMap<ProductId, usize>,
    currency: &'static Currency,
}

impl<'a> Catalog<'a> {
    /// Create an empty catalog.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            products: Vec::new(),
            index: FxHashMap::default(),
            currency,
        }
    }

    /// Create a catalog from a list of products, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] on duplicate ids or mixed currencies.
    pub fn with_products(
        products: impl IntoIterator<Item = Product<'a>>,
        currency: &'static Currency,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new(currency);

        for product in products {
            catalog.insert(product)?;
        }

        Ok(catalog)
    }

    /// Append a product.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the id is taken or the currency differs.
    pub fn insert(&mut self, product: Product<'a>) -> Result<(), CatalogError> {
        let product_currency = product.price.currency();

        if product_currency != self.currency {
            return Err(CatalogError::CurrencyMismatch {
                product: product.id,
                found: product_currency.iso_alpha_code,
                expected: self.currency.iso_alpha_code,
            });
        }

        if self.index.contains_key(&product.id) {
            return Err(CatalogError::DuplicateId(product.id));
        }

        self.index.insert(product.id.clone(), self.products.len());
        self.products.push(product);

        Ok(())
    }

    /// Look up a product by id.
    pub fn get(&self, id: &ProductId) -> Option<&Product<'a>> {
        self.index
            .get(id)
            .and_then(|&position| self.products.get(position))
    }

    /// Products whose name or SKU contains `query`, ignoring case.
    ///
    /// A blank query returns the whole catalog. Results keep catalog order.
    pub fn filter(&self, query: &str) -> Vec<&Product<'a>> {
        let needle = query.trim().to_lowercase();

        self.products
            .iter()
            .filter(|product| needle.is_empty() || matches_query(product, &needle))
            .collect()
    }

    /// Iterate over the products in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Product<'a>> {
        self.products.iter()
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Catalog currency.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

/// Whether a product's name or SKU contains an already-lowercased needle.
pub fn matches_query(product: &Product<'_>, needle: &str) -> bool {
    product.name.to_lowercase().contains(needle) || product.sku.to_lowercase().contains(needle)
}

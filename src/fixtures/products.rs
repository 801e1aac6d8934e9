//! Product Fixtures

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, GHS, USD},
};
use serde::Deserialize;

use crate::{fixtures::FixtureError, products::Product};

/// Products document in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Catalog currency code (e.g. `GHS`)
    pub currency: String,

    /// Products in display order
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product identifier
    pub id: String,

    /// Product name
    pub name: String,

    /// Stock keeping unit
    pub sku: String,

    /// Product price (e.g., "1299.99 GHS")
    pub price: String,

    /// Units on hand
    #[serde(default)]
    pub stock: u32,
}

impl ProductFixture {
    /// Convert into a product, checking the price is in the catalog currency.
    ///
    /// # Errors
    ///
    /// Returns an error if the price can't be parsed or is in another currency.
    pub fn into_product(
        self,
        currency: &'static Currency,
    ) -> Result<Product<'static>, FixtureError> {
        let (minor_units, price_currency) = parse_price(&self.price)?;

        if price_currency != currency {
            return Err(FixtureError::CurrencyMismatch(
                currency.iso_alpha_code.to_string(),
                price_currency.iso_alpha_code.to_string(),
            ));
        }

        Ok(Product::new(
            self.id,
            self.name,
            self.sku,
            Money::from_minor(minor_units, currency),
            self.stock,
        ))
    }
}

/// Parse price string (e.g., "2.99 GHS") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let amount = parts
        .first()
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency_code = parts
        .get(1)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, parse_currency(currency_code)?))
}

/// Resolve a supported currency code.
///
/// # Errors
///
/// Returns [`FixtureError::UnknownCurrency`] for anything else.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    match code {
        "GHS" => Ok(GHS),
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        other => Err(FixtureError::UnknownCurrency(other.to_string())),
    }
}

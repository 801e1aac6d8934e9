//! Money

use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use thiserror::Error;

/// Currency every amount in the store is denominated in.
pub const STORE_CURRENCY: &Currency = iso::GHS;

/// Errors raised while turning user input into an amount.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    /// The text was not a decimal number.
    #[error("amount is not a number: {0}")]
    NotANumber(String),

    /// Amounts entered at the till can't be negative.
    #[error("amount cannot be negative: {0}")]
    Negative(String),

    /// More fractional digits than the currency has minor units for.
    #[error("amount has too many decimal places: {0}")]
    TooPrecise(String),

    /// The amount doesn't fit in minor units.
    #[error("amount is too large: {0}")]
    Overflow(String),
}

/// Parse a user-entered decimal string (e.g. `"1299.99"`) into money.
///
/// # Errors
///
/// Returns an [`AmountError`] when the text is not a non-negative number with at most as many
/// decimal places as the currency allows.
pub fn parse_amount<'a>(
    text: &str,
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, AmountError> {
    let trimmed = text.trim();

    let value = trimmed
        .parse::<Decimal>()
        .map_err(|_err| AmountError::NotANumber(trimmed.to_string()))?;

    if value.is_sign_negative() && !value.is_zero() {
        return Err(AmountError::Negative(trimmed.to_string()));
    }

    if value.normalize().scale() > currency.exponent {
        return Err(AmountError::TooPrecise(trimmed.to_string()));
    }

    let minor = decimal_to_minor(value, currency)
        .ok_or_else(|| AmountError::Overflow(trimmed.to_string()))?;

    Ok(Money::from_minor(minor, currency))
}

/// Convert a major-unit decimal into minor units, rounding half away from zero.
pub fn decimal_to_minor(value: Decimal, currency: &Currency) -> Option<i64> {
    value
        .checked_mul(minor_unit_factor(currency)?)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// Convert a floating point major-unit amount into minor units.
///
/// Only used when reading legacy data that stored prices as floats.
pub fn float_to_minor(value: f64, currency: &Currency) -> Option<i64> {
    decimal_to_minor(Decimal::from_f64(value)?, currency)
}

/// Major-unit decimal for a minor-unit amount (e.g. `129999` -> `1299.99`).
#[must_use]
pub fn minor_to_decimal(minor: i64, currency: &Currency) -> Decimal {
    Decimal::new(minor, currency.exponent)
}

fn minor_unit_factor(currency: &Currency) -> Option<Decimal> {
    10_i64
        .checked_pow(currency.exponent)
        .and_then(Decimal::from_i64)
}

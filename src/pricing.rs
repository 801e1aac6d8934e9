//! Pricing

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    discounts::{DiscountError, percent_of_minor},
};

/// Errors that can occur while pricing a cart.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// A line couldn't be priced.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Tax couldn't be calculated.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// Tax rates are percentage points between 0 and 100.
    #[error("tax rate must be between 0 and 100, got {0}")]
    TaxRateOutOfRange(Decimal),

    /// Cart totals overflowed minor units.
    #[error("cart total overflowed")]
    Overflow,
}

/// Flat sales tax rate applied to the discounted amount.
#[derive(Debug, Clone, Copy)]
pub struct TaxRate(Percentage);

impl TaxRate {
    /// Build a rate from percentage points (e.g. `15` for 15%).
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::TaxRateOutOfRange`] outside 0..=100.
    pub fn from_percent_points(points: Decimal) -> Result<Self, PricingError> {
        if points < Decimal::ZERO || points > Decimal::ONE_HUNDRED {
            return Err(PricingError::TaxRateOutOfRange(points));
        }

        Ok(Self(Percentage::from(points / Decimal::ONE_HUNDRED)))
    }

    /// Rate as percentage points.
    #[must_use]
    pub fn percent_points(&self) -> Decimal {
        (self.0 * Decimal::ONE_HUNDRED).normalize()
    }

    /// Tax owed on a minor unit amount, rounded half away from zero.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if the result can't be represented in minor units.
    pub fn tax_on_minor(&self, minor: i64) -> Result<i64, DiscountError> {
        percent_of_minor(&self.0, minor)
    }
}

impl Default for TaxRate {
    /// 15%
    fn default() -> Self {
        Self(Percentage::from(Decimal::new(15, 2)))
    }
}

/// Derived totals for a cart.
///
/// `total == subtotal - discount + tax` holds exactly, in minor units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartTotals<'a> {
    /// Σ unit price × quantity
    pub subtotal: Money<'a, Currency>,

    /// Σ effective line discounts
    pub discount: Money<'a, Currency>,

    /// `subtotal - discount`, the amount tax is charged on
    pub taxable: Money<'a, Currency>,

    /// Tax on the taxable amount
    pub tax: Money<'a, Currency>,

    /// Amount due
    pub total: Money<'a, Currency>,

    /// Units across all lines
    pub item_count: u64,
}

impl<'a> CartTotals<'a> {
    /// Totals for an empty cart.
    #[must_use]
    pub fn zero(currency: &'a Currency) -> Self {
        let zero = Money::from_minor(0, currency);

        Self {
            subtotal: zero,
            discount: zero,
            taxable: zero,
            tax: zero,
            total: zero,
            item_count: 0,
        }
    }
}

/// Price a cart.
///
/// Lines are summed in minor units and tax is rounded once, on the discounted amount.
///
/// # Errors
///
/// Returns a [`PricingError`] if any line can't be priced or the sums overflow.
pub fn price_cart<'a>(cart: &Cart<'a>, tax_rate: TaxRate) -> Result<CartTotals<'a>, PricingError> {
    let currency = cart.currency();
    let mut subtotal: i64 = 0;
    let mut discount: i64 = 0;

    for line in cart.iter() {
        subtotal = subtotal
            .checked_add(line.subtotal()?.to_minor_units())
            .ok_or(PricingError::Overflow)?;

        discount = discount
            .checked_add(line.discount_amount()?.to_minor_units())
            .ok_or(PricingError::Overflow)?;
    }

    let taxable = subtotal
        .checked_sub(discount)
        .ok_or(PricingError::Overflow)?;

    let tax = tax_rate.tax_on_minor(taxable)?;
    let total = taxable.checked_add(tax).ok_or(PricingError::Overflow)?;

    Ok(CartTotals {
        subtotal: Money::from_minor(subtotal, currency),
        discount: Money::from_minor(discount, currency),
        taxable: Money::from_minor(taxable, currency),
        tax: Money::from_minor(tax, currency),
        total: Money::from_minor(total, currency),
        item_count: cart.item_count(),
    })
}

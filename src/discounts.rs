//! Discounts
//!
//! A cart line carries at most one discount: a percentage of the line subtotal or a fixed amount
//! off it. Cart-wide requests are spread over every line.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;

use crate::products::ProductId;

/// Errors specific to discount calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiscountError {
    /// Percent discounts are entered as points between 0 and 100.
    #[error("discount percentage must be between 0 and 100, got {0}")]
    PercentOutOfRange(Decimal),

    /// Fixed discounts can't be negative.
    #[error("discount amount cannot be negative")]
    NegativeAmount,

    /// Fixed discount and line are priced in different currencies.
    #[error("discount is in {found}, but the line is in {expected}")]
    CurrencyMismatch {
        /// Discount currency
        found: &'static str,
        /// Line currency
        expected: &'static str,
    },

    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// Too many lines to share a discount between.
    #[error("discount split overflowed")]
    Overflow,
}

/// Discount held by a single cart line.
#[derive(Debug, Clone, Copy, Default)]
pub enum Discount<'a> {
    /// Full price.
    #[default]
    None,

    /// Percentage of the line subtotal.
    Percent(Percentage),

    /// Fixed amount off the line subtotal, never more than the subtotal itself.
    Fixed(Money<'a, Currency>),
}

impl Discount<'_> {
    /// Whether the line is at full price.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Percentage points for a percent discount (e.g. `10` for 10%).
    #[must_use]
    pub fn percent_points(&self) -> Option<Decimal> {
        match self {
            Self::Percent(percent) => Some((*percent * Decimal::ONE_HUNDRED).normalize()),
            Self::None | Self::Fixed(_) => None,
        }
    }
}

/// Discount as entered by the cashier, before validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiscountRequest<'a> {
    /// Percentage points, 0 to 100 inclusive.
    Percent(Decimal),

    /// Fixed amount.
    Fixed(Money<'a, Currency>),
}

impl<'a> DiscountRequest<'a> {
    /// Validate the request and turn it into a line discount.
    ///
    /// Zero values clear the discount.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::PercentOutOfRange`] or [`DiscountError::NegativeAmount`].
    pub fn validate(self) -> Result<Discount<'a>, DiscountError> {
        match self {
            DiscountRequest::Percent(points) => {
                if points < Decimal::ZERO || points > Decimal::ONE_HUNDRED {
                    return Err(DiscountError::PercentOutOfRange(points));
                }

                if points.is_zero() {
                    return Ok(Discount::None);
                }

                Ok(Discount::Percent(Percentage::from(
                    points / Decimal::ONE_HUNDRED,
                )))
            }
            DiscountRequest::Fixed(amount) => match amount.to_minor_units() {
                minor if minor < 0 => Err(DiscountError::NegativeAmount),
                0 => Ok(Discount::None),
                _ => Ok(Discount::Fixed(amount)),
            },
        }
    }
}

/// What a discount request applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscountScope {
    /// A single cart line.
    Line(ProductId),

    /// Every line in the cart.
    Cart,
}

/// Amount taken off a line with the given subtotal.
///
/// Fixed amounts are clamped to the subtotal here rather than when they are applied, so lowering
/// the quantity later can never push a line below zero.
///
/// # Errors
///
/// Returns a [`DiscountError`] if the percentage can't be represented in minor units or the fixed
/// amount is in another currency.
pub fn line_discount<'a>(
    discount: &Discount<'a>,
    subtotal: Money<'a, Currency>,
) -> Result<Money<'a, Currency>, DiscountError> {
    let currency = subtotal.currency();
    let subtotal_minor = subtotal.to_minor_units();

    let minor = match discount {
        Discount::None => 0,
        Discount::Percent(percent) => percent_of_minor(percent, subtotal_minor)?,
        Discount::Fixed(amount) => {
            let amount_currency = amount.currency();

            if amount_currency != currency {
                return Err(DiscountError::CurrencyMismatch {
                    found: amount_currency.iso_alpha_code,
                    expected: currency.iso_alpha_code,
                });
            }

            amount.to_minor_units()
        }
    };

    Ok(Money::from_minor(minor.clamp(0, subtotal_minor.max(0)), currency))
}

/// Split a cart-wide fixed amount evenly over lines with the given subtotals.
///
/// Shares are whole minor units; leftover units go one each to the earliest lines. Each share is
/// capped at its line subtotal, and whatever the caps cut off is not redistributed.
///
/// # Errors
///
/// Returns [`DiscountError::NegativeAmount`] for a negative amount and
/// [`DiscountError::Overflow`] when the line count doesn't fit the arithmetic.
pub fn split_fixed<'a>(
    amount: Money<'a, Currency>,
    subtotals: &[Money<'a, Currency>],
) -> Result<SmallVec<[Money<'a, Currency>; 8]>, DiscountError> {
    let total = amount.to_minor_units();

    if total < 0 {
        return Err(DiscountError::NegativeAmount);
    }

    let line_count = line_count(subtotals.len())?;

    if line_count == 0 {
        return Ok(SmallVec::new());
    }

    let share = total / line_count;
    let remainder = usize::try_from(total % line_count).unwrap_or_default();

    Ok(subtotals
        .iter()
        .enumerate()
        .map(|(position, subtotal)| {
            let extra = i64::from(position < remainder);
            let minor = (share + extra).min(subtotal.to_minor_units().max(0));

            Money::from_minor(minor, amount.currency())
        })
        .collect())
}

fn line_count(lines: usize) -> Result<i64, DiscountError> {
    i64::try_from(lines).map_err(|_| DiscountError::Overflow)
}

/// Calculate the discount amount in minor units based on a percentage and a minor unit amount.
///
/// Rounds half away from zero.
///
/// # Errors
///
/// Returns an error if:
/// - The percentage calculation overflows or cannot be safely represented
///   (`DiscountError::PercentConversion`).
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, DiscountError> {
    let minor = Decimal::from_i64(minor).ok_or(DiscountError::PercentConversion)?;

    ((*percent) * Decimal::ONE) // decimal_percentage doesn't expose the underlying Decimal
        .checked_mul(minor)
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::PercentConversion)
}

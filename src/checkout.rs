//! Checkout
//!
//! Payment settlement for a priced cart:
//!
//! ```text
//! Idle -> SelectingMethod -> EnteringAmount (cash) -> Processing -> Settled
//!                         -> Confirming (other)    ->
//! ```
//!
//! Cash can't be processed until the tendered amount covers the total. Processing is guarded: a
//! second `process` while one is pending is rejected.

use std::{fmt, str::FromStr};

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pricing::CartTotals;

/// Errors raised by checkout transitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// Nothing to pay for.
    #[error("cannot check out an empty cart")]
    EmptyCart,

    /// A payment is already in flight.
    #[error("payment is already being processed")]
    AlreadyProcessing,

    /// The payment already went through.
    #[error("checkout has already been settled")]
    AlreadySettled,

    /// The action doesn't apply in the current state.
    #[error("cannot {action} while checkout is {state}")]
    InvalidTransition {
        /// Attempted action
        action: &'static str,
        /// Current state name
        state: &'static str,
    },

    /// Cash tendered doesn't cover the total (minor units).
    #[error("tendered {tendered} is less than the total {total}")]
    InsufficientTender {
        /// Tendered amount in minor units
        tendered: i64,
        /// Amount due in minor units
        total: i64,
    },

    /// Tendered amount below zero.
    #[error("tendered amount cannot be negative")]
    NegativeTender,

    /// Tendered amount in a different currency (found, expected).
    #[error("tendered amount is in {0}, but the total is in {1}")]
    CurrencyMismatch(&'static str, &'static str),

    /// Unknown payment method label.
    #[error("unknown payment method: {0}")]
    UnknownMethod(String),
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash, with change.
    Cash,

    /// Card terminal.
    Card,

    /// Mobile money.
    MobileMoney,

    /// Bank transfer.
    BankTransfer,
}

impl PaymentMethod {
    /// Every method, in till display order.
    pub const ALL: [Self; 4] = [Self::Cash, Self::Card, Self::MobileMoney, Self::BankTransfer];

    /// Whether the cashier has to enter a tendered amount.
    #[must_use]
    pub const fn requires_tender(self) -> bool {
        matches!(self, Self::Cash)
    }

    /// Stable snake case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Card => "card",
            Self::MobileMoney => "mobile_money",
            Self::BankTransfer => "bank_transfer",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cash => "Cash",
            Self::Card => "Card",
            Self::MobileMoney => "Mobile Money",
            Self::BankTransfer => "Bank Transfer",
        })
    }
}

impl FromStr for PaymentMethod {
    type Err = CheckoutError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(Self::Cash),
            "card" => Ok(Self::Card),
            "momo" | "mobile_money" => Ok(Self::MobileMoney),
            "bank" | "bank_transfer" => Ok(Self::BankTransfer),
            other => Err(CheckoutError::UnknownMethod(other.to_string())),
        }
    }
}

/// Outcome of a completed payment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settlement<'a> {
    /// Method used
    pub method: PaymentMethod,

    /// Amount charged
    pub total: Money<'a, Currency>,

    /// Cash handed over, for cash payments
    pub tendered: Option<Money<'a, Currency>>,

    /// Change given back, for cash payments
    pub change: Option<Money<'a, Currency>>,
}

/// Checkout state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CheckoutState<'a> {
    /// Payment dialog closed.
    Idle,

    /// Waiting for a payment method.
    SelectingMethod,

    /// Cash chosen; waiting for the tendered amount.
    EnteringAmount {
        /// Amount entered so far
        tendered: Option<Money<'a, Currency>>,
    },

    /// Non-cash method chosen; waiting for confirmation.
    Confirming {
        /// Chosen method
        method: PaymentMethod,
    },

    /// Payment in flight.
    Processing {
        /// Chosen method
        method: PaymentMethod,
        /// Cash tendered, if any
        tendered: Option<Money<'a, Currency>>,
    },

    /// Payment complete.
    Settled(Settlement<'a>),
}

impl CheckoutState<'_> {
    /// Stable snake case name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::SelectingMethod => "selecting_method",
            Self::EnteringAmount { .. } => "entering_amount",
            Self::Confirming { .. } => "confirming",
            Self::Processing { .. } => "processing",
            Self::Settled(_) => "settled",
        }
    }
}

/// Payment settlement for one priced cart.
#[derive(Debug, Clone)]
pub struct Checkout<'a> {
    total: Money<'a, Currency>,
    item_count: u64,
    state: CheckoutState<'a>,
}

impl<'a> Checkout<'a> {
    /// Start an idle checkout for the given totals.
    #[must_use]
    pub fn new(totals: &CartTotals<'a>) -> Self {
        Self {
            total: totals.total,
            item_count: totals.item_count,
            state: CheckoutState::Idle,
        }
    }

    /// Open the payment dialog.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] when there's nothing to pay for, or a transition error
    /// when the checkout isn't idle.
    pub fn begin(&mut self) -> Result<(), CheckoutError> {
        self.guard()?;

        if !matches!(self.state, CheckoutState::Idle) {
            return Err(self.invalid("begin checkout"));
        }

        if self.item_count == 0 {
            return Err(CheckoutError::EmptyCart);
        }

        self.state = CheckoutState::SelectingMethod;

        Ok(())
    }

    /// Choose (or switch) the payment method.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] when the dialog isn't open or a payment is in flight.
    pub fn select_method(&mut self, method: PaymentMethod) -> Result<(), CheckoutError> {
        self.guard()?;

        match self.state {
            CheckoutState::SelectingMethod
            | CheckoutState::EnteringAmount { .. }
            | CheckoutState::Confirming { .. } => {
                self.state = if method.requires_tender() {
                    CheckoutState::EnteringAmount { tendered: None }
                } else {
                    CheckoutState::Confirming { method }
                };

                Ok(())
            }
            _ => Err(self.invalid("select a payment method")),
        }
    }

    /// Record the cash handed over and preview the change.
    ///
    /// Returns `None` while the amount is still short of the total.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] outside the cash entry step or for negative amounts.
    pub fn tender(
        &mut self,
        tendered: Money<'a, Currency>,
    ) -> Result<Option<Money<'a, Currency>>, CheckoutError> {
        self.guard()?;

        if !matches!(self.state, CheckoutState::EnteringAmount { .. }) {
            return Err(self.invalid("enter a tendered amount"));
        }

        let tendered_currency = tendered.currency();
        let total_currency = self.total.currency();

        if tendered_currency != total_currency {
            return Err(CheckoutError::CurrencyMismatch(
                tendered_currency.iso_alpha_code,
                total_currency.iso_alpha_code,
            ));
        }

        if tendered.to_minor_units() < 0 {
            return Err(CheckoutError::NegativeTender);
        }

        self.state = CheckoutState::EnteringAmount {
            tendered: Some(tendered),
        };

        Ok(change_due(tendered, self.total))
    }

    /// Start processing the payment.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::InsufficientTender`] for cash below the total.
    /// - [`CheckoutError::AlreadyProcessing`] if a payment is already in flight.
    /// - [`CheckoutError::InvalidTransition`] before a method is chosen.
    pub fn process(&mut self) -> Result<PaymentMethod, CheckoutError> {
        self.guard()?;

        match self.state {
            CheckoutState::EnteringAmount { tendered } => {
                let tendered_minor = tendered.map_or(0, |amount| amount.to_minor_units());
                let total_minor = self.total.to_minor_units();

                if tendered_minor < total_minor {
                    return Err(CheckoutError::InsufficientTender {
                        tendered: tendered_minor,
                        total: total_minor,
                    });
                }

                self.state = CheckoutState::Processing {
                    method: PaymentMethod::Cash,
                    tendered,
                };

                Ok(PaymentMethod::Cash)
            }
            CheckoutState::Confirming { method } => {
                self.state = CheckoutState::Processing {
                    method,
                    tendered: None,
                };

                Ok(method)
            }
            _ => Err(self.invalid("process payment")),
        }
    }

    /// Finish a payment that is processing.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] unless a payment is in flight.
    pub fn complete(&mut self) -> Result<Settlement<'a>, CheckoutError> {
        let CheckoutState::Processing { method, tendered } = self.state else {
            if let CheckoutState::Settled(_) = self.state {
                return Err(CheckoutError::AlreadySettled);
            }

            return Err(self.invalid("complete payment"));
        };

        let settlement = Settlement {
            method,
            total: self.total,
            tendered,
            change: tendered.and_then(|amount| change_due(amount, self.total)),
        };

        self.state = CheckoutState::Settled(settlement);

        Ok(settlement)
    }

    /// Close the payment dialog without paying.
    ///
    /// # Errors
    ///
    /// A payment in flight or already settled can't be cancelled.
    pub fn cancel(&mut self) -> Result<(), CheckoutError> {
        self.guard()?;

        self.state = CheckoutState::Idle;

        Ok(())
    }

    /// Current state.
    pub fn state(&self) -> &CheckoutState<'a> {
        &self.state
    }

    /// Amount due.
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Whether a payment is in flight.
    #[must_use]
    pub fn is_processing(&self) -> bool {
        matches!(self.state, CheckoutState::Processing { .. })
    }

    fn guard(&self) -> Result<(), CheckoutError> {
        match self.state {
            CheckoutState::Processing { .. } => Err(CheckoutError::AlreadyProcessing),
            CheckoutState::Settled(_) => Err(CheckoutError::AlreadySettled),
            _ => Ok(()),
        }
    }

    fn invalid(&self, action: &'static str) -> CheckoutError {
        CheckoutError::InvalidTransition {
            action,
            state: self.state.name(),
        }
    }
}

/// Change owed for a cash payment, only once the tendered amount covers the total.
pub fn change_due<'a>(
    tendered: Money<'a, Currency>,
    total: Money<'a, Currency>,
) -> Option<Money<'a, Currency>> {
    let tendered_minor = tendered.to_minor_units();
    let total_minor = total.to_minor_units();

    (tendered_minor >= total_minor)
        .then(|| Money::from_minor(tendered_minor - total_minor, total.currency()))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::money::STORE_CURRENCY;

    use super::*;

    fn ghs(minor: i64) -> Money<'static, Currency> {
        Money::from_minor(minor, STORE_CURRENCY)
    }

    fn checkout_for(total: i64) -> Checkout<'static> {
        let mut totals = CartTotals::zero(STORE_CURRENCY);

        totals.total = ghs(total);
        totals.item_count = 1;

        Checkout::new(&totals)
    }

    fn cash_checkout(total: i64) -> Result<Checkout<'static>, CheckoutError> {
        let mut checkout = checkout_for(total);

        checkout.begin()?;
        checkout.select_method(PaymentMethod::Cash)?;

        Ok(checkout)
    }

    #[test]
    fn cash_short_of_total_is_rejected() -> TestResult {
        let mut checkout = cash_checkout(10_350)?;

        assert_eq!(checkout.tender(ghs(10_000))?, None);
        assert_eq!(
            checkout.process(),
            Err(CheckoutError::InsufficientTender {
                tendered: 10_000,
                total: 10_350
            })
        );
        assert!(!checkout.is_processing());

        Ok(())
    }

    #[test]
    fn cash_without_tender_is_rejected() -> TestResult {
        let mut checkout = cash_checkout(500)?;

        assert!(matches!(
            checkout.process(),
            Err(CheckoutError::InsufficientTender { tendered: 0, .. })
        ));

        Ok(())
    }

    #[test]
    fn exact_cash_gives_zero_change() -> TestResult {
        let mut checkout = cash_checkout(10_350)?;

        assert_eq!(checkout.tender(ghs(10_350))?, Some(ghs(0)));
        assert_eq!(checkout.process()?, PaymentMethod::Cash);

        let settlement = checkout.complete()?;

        assert_eq!(settlement.change, Some(ghs(0)));
        assert_eq!(settlement.tendered, Some(ghs(10_350)));

        Ok(())
    }

    #[test]
    fn overpaying_by_five_gives_five_change() -> TestResult {
        let mut checkout = cash_checkout(10_350)?;

        checkout.tender(ghs(10_850))?;
        checkout.process()?;

        assert_eq!(checkout.complete()?.change, Some(ghs(500)));

        Ok(())
    }

    #[test]
    fn non_cash_confirms_without_tender() -> TestResult {
        let mut checkout = checkout_for(4_200);

        checkout.begin()?;
        checkout.select_method(PaymentMethod::MobileMoney)?;

        assert!(matches!(
            checkout.state(),
            CheckoutState::Confirming {
                method: PaymentMethod::MobileMoney
            }
        ));
        assert_eq!(checkout.process()?, PaymentMethod::MobileMoney);

        let settlement = checkout.complete()?;

        assert_eq!(settlement.tendered, None);
        assert_eq!(settlement.change, None);
        assert_eq!(settlement.total, ghs(4_200));

        Ok(())
    }

    #[test]
    fn second_process_while_processing_is_rejected() -> TestResult {
        let mut checkout = checkout_for(4_200);

        checkout.begin()?;
        checkout.select_method(PaymentMethod::Card)?;
        checkout.process()?;

        assert_eq!(checkout.process(), Err(CheckoutError::AlreadyProcessing));
        assert_eq!(checkout.cancel(), Err(CheckoutError::AlreadyProcessing));
        assert_eq!(
            checkout.select_method(PaymentMethod::Cash),
            Err(CheckoutError::AlreadyProcessing)
        );

        Ok(())
    }

    #[test]
    fn settled_checkout_is_final() -> TestResult {
        let mut checkout = checkout_for(4_200);

        checkout.begin()?;
        checkout.select_method(PaymentMethod::BankTransfer)?;
        checkout.process()?;
        checkout.complete()?;

        assert_eq!(checkout.complete(), Err(CheckoutError::AlreadySettled));
        assert_eq!(checkout.process(), Err(CheckoutError::AlreadySettled));

        Ok(())
    }

    #[test]
    fn switching_method_resets_tender() -> TestResult {
        let mut checkout = cash_checkout(1_000)?;

        checkout.tender(ghs(2_000))?;
        checkout.select_method(PaymentMethod::Card)?;
        checkout.select_method(PaymentMethod::Cash)?;

        assert_eq!(
            checkout.state(),
            &CheckoutState::EnteringAmount { tendered: None }
        );

        Ok(())
    }

    #[test]
    fn empty_cart_cannot_begin() {
        let mut checkout = Checkout::new(&CartTotals::zero(STORE_CURRENCY));

        assert_eq!(checkout.begin(), Err(CheckoutError::EmptyCart));
    }

    #[test]
    fn actions_out_of_order_are_rejected() -> TestResult {
        let mut checkout = checkout_for(1_000);

        assert!(matches!(
            checkout.select_method(PaymentMethod::Cash),
            Err(CheckoutError::InvalidTransition { state: "idle", .. })
        ));

        checkout.begin()?;

        assert!(matches!(
            checkout.tender(ghs(1_000)),
            Err(CheckoutError::InvalidTransition {
                state: "selecting_method",
                ..
            })
        ));

        assert!(matches!(
            checkout.process(),
            Err(CheckoutError::InvalidTransition { .. })
        ));

        Ok(())
    }

    #[test]
    fn cancel_returns_to_idle() -> TestResult {
        let mut checkout = cash_checkout(1_000)?;

        checkout.cancel()?;

        assert_eq!(checkout.state(), &CheckoutState::Idle);

        Ok(())
    }

    #[test]
    fn negative_tender_is_rejected() -> TestResult {
        let mut checkout = cash_checkout(1_000)?;

        assert_eq!(
            checkout.tender(ghs(-1)),
            Err(CheckoutError::NegativeTender)
        );

        Ok(())
    }

    #[test]
    fn change_due_only_when_covered() {
        assert_eq!(change_due(ghs(999), ghs(1_000)), None);
        assert_eq!(change_due(ghs(1_000), ghs(1_000)), Some(ghs(0)));
        assert_eq!(change_due(ghs(1_500), ghs(1_000)), Some(ghs(500)));
    }

    #[test]
    fn payment_method_labels_parse() -> TestResult {
        assert_eq!("momo".parse::<PaymentMethod>()?, PaymentMethod::MobileMoney);
        assert_eq!("Bank".parse::<PaymentMethod>()?, PaymentMethod::BankTransfer);
        assert!("cheque".parse::<PaymentMethod>().is_err());

        Ok(())
    }
}

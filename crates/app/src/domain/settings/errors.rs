//! Settings service errors.

use fernwood::pricing::PricingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsServiceError {
    #[error(transparent)]
    TaxRate(#[from] PricingError),

    #[error("at least one payment method must stay enabled")]
    NoPaymentMethods,

    #[error("the store trades in {expected}, not {found}")]
    UnsupportedCurrency {
        expected: &'static str,
        found: String,
    },

    #[error("missing required field: {0}")]
    MissingRequiredData(&'static str),
}

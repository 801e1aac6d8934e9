//! Money typed in at the till or back office.

use fernwood::money::{STORE_CURRENCY, parse_amount};
use salvo::prelude::StatusError;

/// Parse a decimal amount in cedis (e.g. `"1299.99"`) into pesewas, answering 400 for anything
/// that isn't a non-negative amount with at most two decimal places.
pub(crate) fn parse_pesewas(field: &str, text: &str) -> Result<u64, StatusError> {
    let amount = parse_amount(text, STORE_CURRENCY)
        .map_err(|error| StatusError::bad_request().brief(format!("invalid {field}: {error}")))?;

    u64::try_from(amount.to_minor_units())
        .map_err(|_ignored| StatusError::bad_request().brief(format!("invalid {field}: {text}")))
}

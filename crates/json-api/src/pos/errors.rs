//! POS Errors

use fernwood::{cart::CartError, checkout::CheckoutError, pricing::PricingError};
use fernwood_app::domain::pos::PosServiceError;
use salvo::http::StatusError;
use tracing::error;

use crate::{customers, products, transactions};

pub(crate) fn into_status_error(error: PosServiceError) -> StatusError {
    match error {
        PosServiceError::CheckoutInProgress | PosServiceError::NoCheckout => {
            StatusError::conflict().brief(error.to_string())
        }
        PosServiceError::MethodDisabled(_) | PosServiceError::InvalidAmount(_) => {
            StatusError::bad_request().brief(error.to_string())
        }
        PosServiceError::Cart(source) => cart_error(source),
        PosServiceError::Checkout(source) => checkout_error(source),
        PosServiceError::Pricing(source) => pricing_error(source),
        PosServiceError::Products(source) => products::into_status_error(source),
        PosServiceError::Customers(source) => customers::into_status_error(source),
        PosServiceError::Transactions(source) => transactions::into_status_error(source),
        PosServiceError::Receipt(_)
        | PosServiceError::Settings(_)
        | PosServiceError::Settlement(_) => {
            error!("till failure: {error}");

            StatusError::internal_server_error()
        }
    }
}

fn cart_error(error: CartError) -> StatusError {
    match error {
        CartError::OutOfStock(_) | CartError::StockCeiling { .. } => {
            StatusError::conflict().brief(error.to_string())
        }
        CartError::LineNotFound(_) => StatusError::not_found().brief(error.to_string()),
        CartError::CurrencyMismatch(..) | CartError::Overflow | CartError::Discount(_) => {
            StatusError::bad_request().brief(error.to_string())
        }
    }
}

fn checkout_error(error: CheckoutError) -> StatusError {
    match error {
        CheckoutError::EmptyCart
        | CheckoutError::AlreadyProcessing
        | CheckoutError::AlreadySettled
        | CheckoutError::InvalidTransition { .. } => {
            StatusError::conflict().brief(error.to_string())
        }
        CheckoutError::InsufficientTender { .. }
        | CheckoutError::NegativeTender
        | CheckoutError::CurrencyMismatch(..)
        | CheckoutError::UnknownMethod(_) => StatusError::bad_request().brief(error.to_string()),
    }
}

fn pricing_error(error: PricingError) -> StatusError {
    match error {
        PricingError::Cart(source) => cart_error(source),
        PricingError::Discount(_) | PricingError::Overflow => {
            StatusError::bad_request().brief(error.to_string())
        }
        PricingError::TaxRateOutOfRange(_) => {
            error!("till failure: {error}");

            StatusError::internal_server_error()
        }
    }
}

//! POS service errors.

use std::num::TryFromIntError;

use fernwood::{
    cart::CartError,
    checkout::{CheckoutError, PaymentMethod},
    pricing::PricingError,
    receipt::ReceiptError,
};
use thiserror::Error;

use crate::domain::{
    customers::CustomersServiceError, products::ProductsServiceError,
    settings::SettingsServiceError, transactions::TransactionsServiceError,
};

#[derive(Debug, Error)]
pub enum PosServiceError {
    #[error("finish or cancel the checkout before changing the cart")]
    CheckoutInProgress,

    #[error("no checkout is open")]
    NoCheckout,

    #[error("{0} payments are turned off")]
    MethodDisabled(PaymentMethod),

    #[error("amount is out of range")]
    InvalidAmount(#[from] TryFromIntError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("failed to print receipt")]
    Receipt(#[from] ReceiptError),

    #[error(transparent)]
    Products(#[from] ProductsServiceError),

    #[error(transparent)]
    Customers(#[from] CustomersServiceError),

    #[error(transparent)]
    Settings(#[from] SettingsServiceError),

    #[error(transparent)]
    Transactions(#[from] TransactionsServiceError),

    #[error("payment settlement was interrupted")]
    Settlement(#[from] tokio::task::JoinError),
}

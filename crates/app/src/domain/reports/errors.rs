//! Reports service errors.

use thiserror::Error;

use crate::domain::{products::ProductsServiceError, transactions::TransactionsServiceError};

#[derive(Debug, Error)]
pub enum ReportsServiceError {
    #[error(transparent)]
    Products(#[from] ProductsServiceError),

    #[error(transparent)]
    Transactions(#[from] TransactionsServiceError),
}

//! Returns service errors.

use thiserror::Error;

use crate::domain::transactions::TransactionsServiceError;

#[derive(Debug, Error)]
pub enum ReturnsServiceError {
    #[error("enter a transaction id")]
    MissingTransactionId,

    #[error(transparent)]
    Transactions(#[from] TransactionsServiceError),
}

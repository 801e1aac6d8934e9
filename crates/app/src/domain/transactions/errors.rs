//! Transactions service errors.

use thiserror::Error;

use crate::domain::transactions::models::TransactionStatus;

#[derive(Debug, Error)]
pub enum TransactionsServiceError {
    #[error("transaction not found")]
    NotFound,

    #[error("transaction is {0} and cannot be refunded")]
    NotRefundable(TransactionStatus),

    #[error("transaction has no lines")]
    NoLines,
}

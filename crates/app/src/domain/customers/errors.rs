//! Customers service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CustomersServiceError {
    #[error("customer not found")]
    NotFound,

    #[error("a customer with this email already exists")]
    EmailTaken,

    #[error("missing required field: {0}")]
    MissingRequiredData(&'static str),
}

//! Suppliers service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SuppliersServiceError {
    #[error("supplier not found")]
    NotFound,

    #[error("missing required field: {0}")]
    MissingRequiredData(&'static str),
}

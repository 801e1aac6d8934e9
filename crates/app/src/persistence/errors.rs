//! Persistence errors.

use thiserror::Error;

use fernwood::products::ProductId;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("state file could not be read or written")]
    Io(#[from] std::io::Error),

    #[error("state is not valid JSON")]
    Json(#[from] serde_json::Error),

    #[error("state has unsupported version {0}")]
    UnsupportedVersion(u64),

    #[error("state has an unrecognised shape: {0}")]
    InvalidFormat(&'static str),

    #[error("product {0} has an invalid price")]
    InvalidPrice(ProductId),
}

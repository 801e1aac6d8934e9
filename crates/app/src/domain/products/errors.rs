//! Products service errors.

use std::num::TryFromIntError;

use fernwood::catalog::CatalogError;
use thiserror::Error;

use crate::persistence::PersistenceError;

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("a product with this SKU already exists")]
    AlreadyExists,

    #[error("product not found")]
    NotFound,

    #[error("missing required field: {0}")]
    MissingRequiredData(&'static str),

    #[error("invalid price value")]
    InvalidPrice(#[from] TryFromIntError),

    #[error("catalog could not be built")]
    Catalog(#[from] CatalogError),

    #[error("storage error")]
    Storage(#[from] PersistenceError),
}

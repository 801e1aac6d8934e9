//! Categories service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CategoriesServiceError {
    #[error("category not found")]
    NotFound,

    #[error("slug {0} is already in use")]
    SlugTaken(String),

    #[error("missing required field: {0}")]
    MissingRequiredData(&'static str),
}

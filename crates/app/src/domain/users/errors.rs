//! Users service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UsersServiceError {
    #[error("user not found")]
    NotFound,

    #[error("a user with this email already exists")]
    EmailTaken,

    #[error("missing required field: {0}")]
    MissingRequiredData(&'static str),
}

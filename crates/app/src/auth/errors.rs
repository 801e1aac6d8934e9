//! Auth service errors.

use thiserror::Error;

use crate::{auth::SessionTokenError, domain::users::UsersServiceError};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("session not found")]
    NotFound,

    #[error("session has expired")]
    Expired,

    #[error("account is not active")]
    AccountDisabled,

    #[error("password must be at least {0} characters")]
    WeakPassword(usize),

    #[error("session token processing error")]
    Token(#[from] SessionTokenError),

    #[error("user lookup failed")]
    Users(#[from] UsersServiceError),

    #[error("session expiry out of range")]
    Time(#[from] jiff::Error),
}

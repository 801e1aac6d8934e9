//! Auth Errors

use fernwood_app::auth::AuthServiceError;
use salvo::http::StatusError;
use tracing::{debug, error};

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid email or password")
        }
        AuthServiceError::NotFound => StatusError::unauthorized().brief("Invalid session token"),
        AuthServiceError::Expired => StatusError::unauthorized().brief("Session has expired"),
        AuthServiceError::AccountDisabled => {
            StatusError::forbidden().brief("Account is not active")
        }
        AuthServiceError::WeakPassword(_) => StatusError::bad_request().brief(error.to_string()),
        AuthServiceError::Token(source) => {
            debug!("rejected session token: {source}");

            StatusError::unauthorized().brief("Invalid session token")
        }
        AuthServiceError::Users(source) => {
            error!("failed to look up session user: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Time(source) => {
            error!("failed to compute session expiry: {source}");

            StatusError::internal_server_error()
        }
    }
}

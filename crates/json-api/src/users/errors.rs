//! User Errors

use fernwood_app::domain::users::UsersServiceError;
use salvo::http::StatusError;

pub(crate) fn into_status_error(error: UsersServiceError) -> StatusError {
    match error {
        UsersServiceError::NotFound => StatusError::not_found().brief("User not found"),
        UsersServiceError::EmailTaken => {
            StatusError::conflict().brief("A user with that email already exists")
        }
        UsersServiceError::MissingRequiredData(field) => {
            StatusError::bad_request().brief(format!("User {field} is required"))
        }
    }
}

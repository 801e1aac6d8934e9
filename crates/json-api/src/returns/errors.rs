//! Return Errors

use fernwood_app::domain::returns::ReturnsServiceError;
use salvo::http::StatusError;

use crate::transactions;

pub(crate) fn into_status_error(error: ReturnsServiceError) -> StatusError {
    match error {
        ReturnsServiceError::MissingTransactionId => {
            StatusError::bad_request().brief("Enter a transaction id")
        }
        ReturnsServiceError::Transactions(source) => transactions::into_status_error(source),
    }
}

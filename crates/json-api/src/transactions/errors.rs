//! Transaction Errors

use fernwood_app::domain::transactions::TransactionsServiceError;
use salvo::http::StatusError;
use tracing::error;

pub(crate) fn into_status_error(error: TransactionsServiceError) -> StatusError {
    match error {
        TransactionsServiceError::NotFound => {
            StatusError::not_found().brief("Transaction not found")
        }
        TransactionsServiceError::NotRefundable(status) => StatusError::conflict()
            .brief(format!("Transaction is {status} and cannot be refunded")),
        TransactionsServiceError::NoLines => {
            error!("refused to record a sale with no lines");

            StatusError::internal_server_error()
        }
    }
}

//! Supplier Errors

use fernwood_app::domain::suppliers::SuppliersServiceError;
use salvo::http::StatusError;

pub(crate) fn into_status_error(error: SuppliersServiceError) -> StatusError {
    match error {
        SuppliersServiceError::NotFound => StatusError::not_found().brief("Supplier not found"),
        SuppliersServiceError::MissingRequiredData(field) => {
            StatusError::bad_request().brief(format!("Supplier {field} is required"))
        }
    }
}

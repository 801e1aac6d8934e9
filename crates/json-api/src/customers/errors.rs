//! Customer Errors

use fernwood_app::domain::customers::CustomersServiceError;
use salvo::http::StatusError;

pub(crate) fn into_status_error(error: CustomersServiceError) -> StatusError {
    match error {
        CustomersServiceError::NotFound => StatusError::not_found().brief("Customer not found"),
        CustomersServiceError::EmailTaken => {
            StatusError::conflict().brief("A customer with that email already exists")
        }
        CustomersServiceError::MissingRequiredData(field) => {
            StatusError::bad_request().brief(format!("Customer {field} is required"))
        }
    }
}

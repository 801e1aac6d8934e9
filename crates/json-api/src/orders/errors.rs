//! Order Errors

use fernwood_app::domain::orders::OrdersServiceError;
use salvo::http::StatusError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::Closed(status) => {
            StatusError::conflict().brief(format!("Order is {status} and can no longer change"))
        }
    }
}

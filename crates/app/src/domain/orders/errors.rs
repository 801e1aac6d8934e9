//! Orders service errors.

use thiserror::Error;

use crate::domain::orders::models::OrderStatus;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order not found")]
    NotFound,

    #[error("order is {0} and can no longer change")]
    Closed(OrderStatus),
}

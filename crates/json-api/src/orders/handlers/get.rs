//! Get Order Handler

use std::sync::Arc;

use fernwood_app::domain::orders::models::Order;
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// e.g. `ORD-1001`
    pub id: String,

    pub customer: String,
    pub date: String,

    /// `pending`, `processing`, `shipped`, `delivered` or `cancelled`
    pub status: String,

    /// Order total in pesewas
    pub total: u64,

    pub items: u32,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            status: order.status.as_str().to_string(),
            date: order.date.to_string(),
            id: order.id,
            customer: order.customer,
            total: order.total,
            items: order.items,
        }
    }
}

/// Get Order Handler
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state
        .app
        .orders
        .get_order(&order.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}

//! Update Order Status Handler

use std::sync::Arc;

use fernwood_app::domain::orders::models::OrderStatus;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

/// Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderStatusRequest {
    pub status: String,
}

/// Update Order Status Handler
///
/// Delivered and cancelled orders are closed.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Order is closed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<String>,
    json: JsonBody<UpdateOrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let status: OrderStatus = parse_label("order status", &json.into_inner().status)?;

    let order = state
        .app
        .orders
        .update_status(&order.into_inner(), status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}

//! Order Index Handler

use std::sync::Arc;

use fernwood_app::{domain::orders::models::OrderFilter, listing::Page};
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
    pagination::{PageMeta, pagination},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    pub orders: Vec<OrderResponse>,
    pub pagination: PageMeta,
}

/// Order Index Handler
///
/// Newest first. Search matches the order id or customer name.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    search: QueryParam<String, false>,
    status: QueryParam<String, false>,
    page: QueryParam<usize, false>,
    per_page: QueryParam<usize, false>,
    depot: &mut Depot,
) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = OrderFilter {
        search: search.into_inner(),
        status: status
            .into_inner()
            .map(|status| parse_label("order status", &status))
            .transpose()?,
    };

    let matching = state
        .app
        .orders
        .list_orders(&filter)
        .await
        .map_err(into_status_error)?;

    let (rows, meta) = PageMeta::split(Page::from_items(matching, pagination(page, per_page)));

    Ok(Json(OrdersResponse {
        orders: rows.into_iter().map(Into::into).collect(),
        pagination: meta,
    }))
}

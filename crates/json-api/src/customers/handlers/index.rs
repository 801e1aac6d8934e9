//! Customer Index Handler

use std::sync::Arc;

use fernwood_app::{domain::customers::models::CustomerFilter, listing::Page};
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    customers::{errors::into_status_error, get::CustomerResponse},
    extensions::*,
    pagination::{PageMeta, pagination},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomersResponse {
    pub customers: Vec<CustomerResponse>,
    pub pagination: PageMeta,
}

/// Customer Index Handler
///
/// Search matches name, email or phone.
#[endpoint(
    tags("customers"),
    summary = "List Customers",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    search: QueryParam<String, false>,
    status: QueryParam<String, false>,
    page: QueryParam<usize, false>,
    per_page: QueryParam<usize, false>,
    depot: &mut Depot,
) -> Result<Json<CustomersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = CustomerFilter {
        search: search.into_inner(),
        status: status
            .into_inner()
            .map(|status| parse_label("customer status", &status))
            .transpose()?,
    };

    let matching = state
        .app
        .customers
        .list_customers(&filter)
        .await
        .map_err(into_status_error)?;

    let (rows, meta) = PageMeta::split(Page::from_items(matching, pagination(page, per_page)));

    Ok(Json(CustomersResponse {
        customers: rows.into_iter().map(Into::into).collect(),
        pagination: meta,
    }))
}

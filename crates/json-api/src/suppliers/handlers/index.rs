//! Supplier Index Handler

use std::sync::Arc;

use fernwood_app::{domain::suppliers::models::SupplierFilter, listing::Page};
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    pagination::{PageMeta, pagination},
    state::State,
    suppliers::{errors::into_status_error, get::SupplierResponse},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SuppliersResponse {
    pub suppliers: Vec<SupplierResponse>,
    pub pagination: PageMeta,
}

/// Supplier Index Handler
#[endpoint(
    tags("suppliers"),
    summary = "List Suppliers",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    search: QueryParam<String, false>,
    status: QueryParam<String, false>,
    page: QueryParam<usize, false>,
    per_page: QueryParam<usize, false>,
    depot: &mut Depot,
) -> Result<Json<SuppliersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = SupplierFilter {
        search: search.into_inner(),
        status: status
            .into_inner()
            .map(|status| parse_label("supplier status", &status))
            .transpose()?,
    };

    let matching = state
        .app
        .suppliers
        .list_suppliers(&filter)
        .await
        .map_err(into_status_error)?;

    let (rows, meta) = PageMeta::split(Page::from_items(matching, pagination(page, per_page)));

    Ok(Json(SuppliersResponse {
        suppliers: rows.into_iter().map(Into::into).collect(),
        pagination: meta,
    }))
}

//! Transaction Index Handler

use std::sync::Arc;

use fernwood_app::{domain::transactions::models::TransactionFilter, listing::Page};
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    pagination::{PageMeta, pagination},
    state::State,
    transactions::{TransactionResponse, errors::into_status_error},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TransactionsResponse {
    pub transactions: Vec<TransactionResponse>,
    pub pagination: PageMeta,
}

/// Build a filter from the query parameters shared by the index and summary.
pub(crate) fn transaction_filter(
    search: QueryParam<String, false>,
    range: QueryParam<String, false>,
    method: QueryParam<String, false>,
    status: QueryParam<String, false>,
) -> Result<TransactionFilter, StatusError> {
    Ok(TransactionFilter {
        search: search.into_inner(),
        range: range
            .into_inner()
            .map(|range| parse_label("range", &range))
            .transpose()?
            .unwrap_or_default(),
        method: method
            .into_inner()
            .map(|method| parse_label("payment method", &method))
            .transpose()?,
        status: status
            .into_inner()
            .map(|status| parse_label("transaction status", &status))
            .transpose()?,
    })
}

/// Transaction Index Handler
///
/// Newest first. `range` is `today`, `yesterday`, `last7days` or `all`, in UTC days up to `at`.
#[endpoint(
    tags("transactions"),
    summary = "List Transactions",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    search: QueryParam<String, false>,
    range: QueryParam<String, false>,
    method: QueryParam<String, false>,
    status: QueryParam<String, false>,
    at: QueryParam<String, false>,
    page: QueryParam<usize, false>,
    per_page: QueryParam<usize, false>,
    depot: &mut Depot,
) -> Result<Json<TransactionsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let filter = transaction_filter(search, range, method, status)?;

    let matching = state
        .app
        .transactions
        .list_transactions(&filter, at.into_point_in_time()?)
        .await
        .map_err(into_status_error)?;

    let (rows, meta) = PageMeta::split(Page::from_items(matching, pagination(page, per_page)));

    Ok(Json(TransactionsResponse {
        transactions: rows.into_iter().map(Into::into).collect(),
        pagination: meta,
    }))
}

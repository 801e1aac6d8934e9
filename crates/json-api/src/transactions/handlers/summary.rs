//! Transaction Summary Handler

use std::sync::Arc;

use fernwood_app::domain::transactions::models::TransactionSummary;
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    state::State,
    transactions::{errors::into_status_error, index::transaction_filter},
};

/// Completed sales matching the filter. Amounts are pesewas.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TransactionSummaryResponse {
    pub total: u64,
    pub count: u64,
    pub average: u64,
}

impl From<TransactionSummary> for TransactionSummaryResponse {
    fn from(summary: TransactionSummary) -> Self {
        Self {
            total: summary.total,
            count: summary.count,
            average: summary.average,
        }
    }
}

/// Transaction Summary Handler
///
/// Takes the same filters as the transaction index.
#[endpoint(
    tags("transactions"),
    summary = "Summarise Transactions",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    search: QueryParam<String, false>,
    range: QueryParam<String, false>,
    method: QueryParam<String, false>,
    status: QueryParam<String, false>,
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<TransactionSummaryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let filter = transaction_filter(search, range, method, status)?;

    let summary = state
        .app
        .transactions
        .summary(&filter, at.into_point_in_time()?)
        .await
        .map_err(into_status_error)?;

    Ok(Json(summary.into()))
}

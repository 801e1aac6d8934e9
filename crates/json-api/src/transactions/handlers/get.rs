//! Get Transaction Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    extensions::*,
    state::State,
    transactions::{TransactionResponse, errors::into_status_error},
};

/// Get Transaction Handler
#[endpoint(
    tags("transactions"),
    summary = "Get Transaction",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Transaction"),
        (status_code = StatusCode::NOT_FOUND, description = "Transaction not found"),
    ),
)]
pub(crate) async fn handler(
    transaction: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<TransactionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let transaction = state
        .app
        .transactions
        .get_transaction(&transaction.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(transaction.into()))
}

//! Process Return Handler

use std::sync::Arc;

use fernwood_app::domain::returns::models::NewReturn;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    returns::{ReturnResponse, errors::into_status_error},
    state::State,
};

/// Process Return Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProcessReturnRequest {
    pub transaction_id: String,

    #[serde(default)]
    pub reason: String,
}

/// Process Return Handler
///
/// Refunds a completed transaction in full.
#[endpoint(
    tags("returns"),
    summary = "Process Return",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Return processed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing transaction id"),
        (status_code = StatusCode::NOT_FOUND, description = "Transaction not found"),
        (status_code = StatusCode::CONFLICT, description = "Transaction cannot be refunded"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ProcessReturnRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ReturnResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let cashier = depot.auth_user_or_401()?;
    let request = json.into_inner();

    let record = state
        .app
        .returns
        .process_return(
            NewReturn {
                transaction_id: request.transaction_id,
                reason: request.reason,
            },
            &cashier.name,
        )
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(record.into()))
}

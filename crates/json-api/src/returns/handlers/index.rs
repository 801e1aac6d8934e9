//! Return Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    returns::{ReturnResponse, errors::into_status_error},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReturnsResponse {
    /// Newest first
    pub returns: Vec<ReturnResponse>,
}

/// Return Index Handler
#[endpoint(
    tags("returns"),
    summary = "List Returns",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ReturnsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let returns = state
        .app
        .returns
        .list_returns()
        .await
        .map_err(into_status_error)?;

    Ok(Json(ReturnsResponse {
        returns: returns.into_iter().map(Into::into).collect(),
    }))
}

//! POS Catalog Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    pos::{CatalogItemResponse, errors::into_status_error},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CatalogResponse {
    pub products: Vec<CatalogItemResponse>,
}

/// POS Catalog Handler
///
/// Products whose name or SKU contains `q`, ignoring case. A blank query lists everything.
#[endpoint(
    tags("pos"),
    summary = "Search Till Catalog",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    q: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<CatalogResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let items = state
        .app
        .pos
        .catalog(q.into_inner().as_deref().unwrap_or_default())
        .await
        .map_err(into_status_error)?;

    Ok(Json(CatalogResponse {
        products: items.into_iter().map(Into::into).collect(),
    }))
}

//! Delete Category Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{categories::errors::into_status_error, extensions::*, state::State};

/// Delete Category Handler
#[endpoint(
    tags("categories"),
    summary = "Delete Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Category deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
    ),
)]
pub(crate) async fn handler(
    category: PathParam<String>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .categories
        .delete_category(&category.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

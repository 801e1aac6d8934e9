//! Delete Customer Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{customers::errors::into_status_error, extensions::*, state::State};

/// Delete Customer Handler
#[endpoint(
    tags("customers"),
    summary = "Delete Customer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Customer deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Customer not found"),
    ),
)]
pub(crate) async fn handler(
    customer: PathParam<String>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .customers
        .delete_customer(&customer.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

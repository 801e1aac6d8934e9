//! Logout Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    auth::{into_status_error, middleware::extract_bearer_token},
    extensions::*,
    state::State,
};

/// Logout Handler
///
/// Ends the session the request was made with.
#[endpoint(
    tags("auth"),
    summary = "Log Out",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Session ended"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unknown session"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let token = extract_bearer_token(req).ok_or_else(|| {
        StatusError::unauthorized().brief("Missing or invalid Authorization header")
    })?;

    state
        .app
        .auth
        .logout(token)
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

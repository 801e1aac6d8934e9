//! Set User Password Handler

use std::sync::Arc;

use fernwood_app::{auth::AuthServiceError, domain::users::models::UserUuid};
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{auth, extensions::*, state::State};

/// Set Password Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SetPasswordRequest {
    pub password: String,
}

/// Set User Password Handler
///
/// Replaces the user's password and ends all of their sessions.
#[endpoint(
    tags("users"),
    summary = "Set User Password",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Password changed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Password too short"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
    ),
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    json: JsonBody<SetPasswordRequest>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .auth
        .set_password(UserUuid::from(user.into_inner()), &json.into_inner().password)
        .await
        .map_err(|error| match error {
            AuthServiceError::NotFound => StatusError::not_found().brief("User not found"),
            other => auth::into_status_error(other),
        })?;

    Ok(StatusCode::NO_CONTENT)
}

//! Delete User Handler

use std::sync::Arc;

use fernwood_app::domain::users::models::UserUuid;
use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State, users::errors::into_status_error};

/// Delete User Handler
///
/// Admins cannot delete their own account.
#[endpoint(
    tags("users"),
    summary = "Delete User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "User deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::CONFLICT, description = "Cannot delete yourself"),
    ),
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = UserUuid::from(user.into_inner());

    if depot.auth_user_or_401()?.uuid == user {
        return Err(StatusError::conflict().brief("You cannot delete your own account"));
    }

    state
        .app
        .users
        .delete_user(user)
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

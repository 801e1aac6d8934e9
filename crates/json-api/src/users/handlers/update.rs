//! Update User Handler

use std::sync::Arc;

use fernwood_app::domain::users::models::{UserUpdate, UserUuid};
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    users::{errors::into_status_error, get::UserResponse},
};

/// Update User Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
    pub avatar_url: Option<String>,
}

impl TryFrom<UpdateUserRequest> for UserUpdate {
    type Error = StatusError;

    fn try_from(request: UpdateUserRequest) -> Result<Self, Self::Error> {
        Ok(UserUpdate {
            role: request
                .role
                .map(|role| parse_label("role", &role))
                .transpose()?,
            status: request
                .status
                .map(|status| parse_label("user status", &status))
                .transpose()?,
            name: request.name,
            email: request.email,
            avatar_url: request.avatar_url,
        })
    }
}

/// Update User Handler
#[endpoint(
    tags("users"),
    summary = "Update User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "User updated"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::CONFLICT, description = "Email already in use"),
    ),
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    json: JsonBody<UpdateUserRequest>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let user = state
        .app
        .users
        .update_user(
            UserUuid::from(user.into_inner()),
            json.into_inner().try_into()?,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}

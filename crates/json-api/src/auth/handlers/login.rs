//! Login Handler

use std::sync::Arc;

use fernwood_app::auth::home_for;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{handlers::AuthUserResponse, into_status_error},
    extensions::*,
    state::State,
};

/// Login Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginResponse {
    /// Bearer token for subsequent requests; shown once
    pub token: String,

    /// When the session lapses (RFC 3339)
    pub expires_at: String,

    pub user: AuthUserResponse,

    /// Landing page for the user's role
    pub home: String,
}

/// Login Handler
#[endpoint(
    tags("auth"),
    summary = "Log In",
    responses(
        (status_code = StatusCode::OK, description = "Session issued"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid email or password"),
        (status_code = StatusCode::FORBIDDEN, description = "Account is not active"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<LoginResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let session = state
        .app
        .auth
        .login(&request.email, &request.password)
        .await
        .map_err(into_status_error)?;

    Ok(Json(LoginResponse {
        token: session.token,
        expires_at: session.expires_at.to_string(),
        home: home_for(session.user.role).to_string(),
        user: session.user.into(),
    }))
}

//! Create User Handler

use std::sync::Arc;

use fernwood_app::domain::users::models::NewUser;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    state::State,
    users::{errors::into_status_error, get::UserResponse},
};

/// Create User Request
///
/// New accounts cannot sign in until a password is set.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub role: String,

    /// Defaults to `active`
    #[serde(default)]
    pub status: Option<String>,
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = StatusError;

    fn try_from(request: CreateUserRequest) -> Result<Self, Self::Error> {
        Ok(NewUser {
            role: parse_label("role", &request.role)?,
            status: request
                .status
                .map(|status| parse_label("user status", &status))
                .transpose()?
                .unwrap_or_default(),
            name: request.name,
            email: request.email,
        })
    }
}

/// Create User Handler
#[endpoint(
    tags("users"),
    summary = "Create User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "User created"),
        (status_code = StatusCode::CONFLICT, description = "Email already in use"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateUserRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let user = state
        .app
        .users
        .create_user(json.into_inner().try_into()?)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/users/{}", user.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use fernwood_app::{auth::Role, domain::users::UsersServiceError};
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{ADMIN, Mocks};

    use super::{super::tests::make_user, *};

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(ADMIN, Router::with_path("users").post(handler))
    }

    #[tokio::test]
    async fn test_create_user_success() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .users
            .expect_create_user()
            .once()
            .withf(|new| new.role == Role::Manager && new.email == "ama.owusu@example.com")
            .return_once(|_| Ok(make_user(8, "Ama Owusu", Role::Manager)));

        let mut res = TestClient::post("http://example.com/users")
            .json(&json!({
                "name": "Ama Owusu",
                "email": "ama.owusu@example.com",
                "role": "manager"
            }))
            .send(&make_service(mocks))
            .await;

        let response: UserResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(response.role, "manager");

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_email_returns_409() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .users
            .expect_create_user()
            .once()
            .return_once(|_| Err(UsersServiceError::EmailTaken));

        let res = TestClient::post("http://example.com/users")
            .json(&json!({
                "name": "Admin Again",
                "email": "ADMIN@example.com",
                "role": "admin"
            }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}

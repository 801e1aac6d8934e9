//! Get User Handler

use std::sync::Arc;

use fernwood_app::domain::users::models::{User, UserUuid};
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{extensions::*, state::State, users::errors::into_status_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    pub uuid: Uuid,
    pub name: String,
    pub email: String,

    /// `admin`, `manager`, `cashier` or `staff`
    pub role: String,

    /// `active`, `inactive` or `suspended`
    pub status: String,

    pub last_active: Option<String>,
    pub join_date: String,
    pub avatar_url: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            uuid: user.uuid.into(),
            role: user.role.as_str().to_string(),
            status: user.status.label(),
            last_active: user.last_active.map(|at| at.to_string()),
            join_date: user.join_date.to_string(),
            name: user.name,
            email: user.email,
            avatar_url: user.avatar_url,
        }
    }
}

/// Get User Handler
#[endpoint(
    tags("users"),
    summary = "Get User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "User"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
    ),
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let user = state
        .app
        .users
        .get_user(UserUuid::from(user.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use fernwood_app::{auth::Role, domain::users::UsersServiceError};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{ADMIN, Mocks};

    use super::{super::tests::make_user, *};

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(ADMIN, Router::with_path("users/{user}").get(handler))
    }

    #[tokio::test]
    async fn test_get_user_success() -> TestResult {
        let mut mocks = Mocks::default();
        let user = make_user(7, "Emily Davis", Role::Staff);
        let uuid = user.uuid;

        mocks
            .users
            .expect_get_user()
            .once()
            .withf(move |requested| *requested == uuid)
            .return_once(move |_| Ok(user));

        let response: UserResponse = TestClient::get(format!("http://example.com/users/{uuid}"))
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert_eq!(response.role, "staff");
        assert_eq!(response.join_date, "2024-01-15");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_user_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .users
            .expect_get_user()
            .once()
            .return_once(|_| Err(UsersServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/users/{}", Uuid::nil()))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_uuid_returns_400() -> TestResult {
        let res = TestClient::get("http://example.com/users/not-a-uuid")
            .send(&make_service(Mocks::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}

//! Auth Handlers

pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod me;
pub(crate) mod navigation;

use fernwood_app::auth::AuthUser;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

/// Signed in user
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AuthUserResponse {
    /// User UUID
    pub uuid: String,

    pub email: String,
    pub name: String,

    /// `admin`, `manager`, `cashier` or `staff`
    pub role: String,
}

impl From<AuthUser> for AuthUserResponse {
    fn from(user: AuthUser) -> Self {
        Self {
            uuid: user.uuid.to_string(),
            email: user.email,
            name: user.name,
            role: user.role.as_str().to_string(),
        }
    }
}

//! Current User Handler

use salvo::prelude::*;

use crate::{auth::handlers::AuthUserResponse, extensions::*};

/// Current User Handler
#[endpoint(tags("auth"), summary = "Current User", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<AuthUserResponse>, StatusError> {
    let user = depot.auth_user_or_401()?;

    Ok(Json(user.clone().into()))
}

//! User Index Handler

use std::sync::Arc;

use fernwood_app::{auth::Role, domain::users::models::UserFilter, listing::Page};
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    pagination::{PageMeta, pagination},
    state::State,
    users::{errors::into_status_error, get::UserResponse},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UsersResponse {
    pub users: Vec<UserResponse>,
    pub pagination: PageMeta,
}

/// User Index Handler
#[endpoint(
    tags("users"),
    summary = "List Users",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    search: QueryParam<String, false>,
    role: QueryParam<String, false>,
    status: QueryParam<String, false>,
    page: QueryParam<usize, false>,
    per_page: QueryParam<usize, false>,
    depot: &mut Depot,
) -> Result<Json<UsersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = UserFilter {
        search: search.into_inner(),
        role: role
            .into_inner()
            .map(|role| parse_label::<Role>("role", &role))
            .transpose()?,
        status: status
            .into_inner()
            .map(|status| parse_label("user status", &status))
            .transpose()?,
    };

    let matching = state
        .app
        .users
        .list_users(&filter)
        .await
        .map_err(into_status_error)?;

    let (rows, meta) = PageMeta::split(Page::from_items(matching, pagination(page, per_page)));

    Ok(Json(UsersResponse {
        users: rows.into_iter().map(Into::into).collect(),
        pagination: meta,
    }))
}

//! Navigation Handler

use fernwood_app::auth::{NavItem, RouteAccess, active_item, guard_route, home_for, navigation_for};
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::extensions::*;

/// Sidebar entry
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct NavItemResponse {
    pub name: String,
    pub href: String,
}

impl From<NavItem> for NavItemResponse {
    fn from(item: NavItem) -> Self {
        Self {
            name: item.name.to_string(),
            href: item.href.to_string(),
        }
    }
}

/// Navigation Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct NavigationResponse {
    /// Sidebar entries visible to the user's role
    pub items: Vec<NavItemResponse>,

    /// Landing page for the user's role
    pub home: String,

    /// Entry to highlight for `path`, when one was given
    pub active: Option<NavItemResponse>,

    /// Where to send the user instead of `path`; absent when `path` is allowed or not given
    pub redirect: Option<String>,
}

/// Navigation Handler
///
/// Returns the sidebar for the signed in user. Pass `path` to also resolve the active entry and
/// whether the screen at that path should redirect.
#[endpoint(tags("auth"), summary = "Navigation", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    path: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<NavigationResponse>, StatusError> {
    let role = depot.auth_user_or_401()?.role;
    let path = path.into_inner();

    let (active, redirect) = match path.as_deref() {
        Some(path) => (
            active_item(role, path).map(Into::into),
            match guard_route(Some(role), path) {
                RouteAccess::Allowed => None,
                RouteAccess::Redirect(to) => Some(to.to_string()),
            },
        ),
        None => (None, None),
    };

    Ok(Json(NavigationResponse {
        items: navigation_for(role).into_iter().map(Into::into).collect(),
        home: home_for(role).to_string(),
        active,
        redirect,
    }))
}

//! Get Settings Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    settings::{SettingsResponse, errors::into_status_error},
    state::State,
};

/// Get Settings Handler
#[endpoint(
    tags("settings"),
    summary = "Get Settings",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<SettingsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let settings = state
        .app
        .settings
        .get_settings()
        .await
        .map_err(into_status_error)?;

    Ok(Json(settings.into()))
}

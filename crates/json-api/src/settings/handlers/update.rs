//! Update Settings Handler

use std::{str::FromStr, sync::Arc};

use fernwood_app::domain::settings::models::SettingsUpdate;
use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    settings::{
        NotificationsBody, PaymentsBody, SettingsResponse, StoreProfileBody,
        errors::into_status_error,
    },
    state::State,
};

/// Update Settings Request
///
/// Sections left out stay as they are.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct UpdateSettingsRequest {
    pub store: Option<StoreProfileBody>,
    pub payments: Option<PaymentsBody>,
    pub notifications: Option<NotificationsBody>,

    /// Percentage points as a decimal string, e.g. `"12.5"`
    pub tax_rate: Option<String>,
}

impl TryFrom<UpdateSettingsRequest> for SettingsUpdate {
    type Error = StatusError;

    fn try_from(request: UpdateSettingsRequest) -> Result<Self, Self::Error> {
        Ok(SettingsUpdate {
            tax_rate: request
                .tax_rate
                .map(|rate| Decimal::from_str(rate.trim()))
                .transpose()
                .or_400("tax_rate must be a decimal number")?,
            store: request.store.map(Into::into),
            payments: request.payments.map(Into::into),
            notifications: request.notifications.map(Into::into),
        })
    }
}

/// Update Settings Handler
#[endpoint(
    tags("settings"),
    summary = "Update Settings",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Settings updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid settings"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateSettingsRequest>,
    depot: &mut Depot,
) -> Result<Json<SettingsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let settings = state
        .app
        .settings
        .update_settings(json.into_inner().try_into()?)
        .await
        .map_err(into_status_error)?;

    Ok(Json(settings.into()))
}

//! Cancel Checkout Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    pos::{CartResponse, errors::into_status_error},
    state::State,
};

/// Cancel Checkout Handler
///
/// The cart keeps its lines and can be edited again.
#[endpoint(
    tags("pos"),
    summary = "Cancel Checkout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Checkout cancelled"),
        (status_code = StatusCode::CONFLICT, description = "Checkout cannot be cancelled"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let cashier = depot.auth_user_or_401()?;

    let cart = state
        .app
        .pos
        .cancel_checkout(cashier.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

//! Begin Checkout Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    pos::{CartResponse, errors::into_status_error},
    state::State,
};

/// Begin Checkout Handler
///
/// Prices the cart at the current tax rate and locks it until the sale settles or is cancelled.
#[endpoint(
    tags("pos"),
    summary = "Begin Checkout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Checkout opened"),
        (status_code = StatusCode::CONFLICT, description = "Cart is empty or already checking out"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let cashier = depot.auth_user_or_401()?;

    let cart = state
        .app
        .pos
        .begin_checkout(cashier.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

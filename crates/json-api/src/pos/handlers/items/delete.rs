//! Remove Cart Item Handler

use std::sync::Arc;

use fernwood::products::ProductId;
use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    extensions::*,
    pos::{CartResponse, errors::into_status_error},
    state::State,
};

/// Remove Cart Item Handler
#[endpoint(
    tags("pos"),
    summary = "Remove Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Item removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not in cart"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let cashier = depot.auth_user_or_401()?;

    let cart = state
        .app
        .pos
        .remove_item(cashier.uuid, &ProductId::from(product.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

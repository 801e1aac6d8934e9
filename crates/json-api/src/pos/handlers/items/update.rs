//! Update Cart Item Handler

use std::sync::Arc;

use fernwood::products::ProductId;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    pos::{CartResponse, errors::into_status_error},
    state::State,
};

/// Update Quantity Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateQuantityRequest {
    /// Zero removes the line
    pub quantity: u32,
}

/// Update Cart Item Handler
#[endpoint(
    tags("pos"),
    summary = "Set Cart Item Quantity",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Quantity updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not in cart"),
        (status_code = StatusCode::CONFLICT, description = "Not enough stock"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<String>,
    json: JsonBody<UpdateQuantityRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let cashier = depot.auth_user_or_401()?;

    let cart = state
        .app
        .pos
        .update_quantity(
            cashier.uuid,
            &ProductId::from(product.into_inner()),
            json.into_inner().quantity,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

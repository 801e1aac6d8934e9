//! Remove Discount Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    pos::{CartResponse, errors::into_status_error},
    state::State,
};

use super::scope;

/// Remove Discount Handler
///
/// Clears the discount on `product_id`, or on every line when it is omitted.
#[endpoint(
    tags("pos"),
    summary = "Remove Discount",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    product_id: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let cashier = depot.auth_user_or_401()?;

    let cart = state
        .app
        .pos
        .remove_discount(cashier.uuid, scope(product_id.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

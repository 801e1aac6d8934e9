//! Apply Discount Handler

use std::{str::FromStr, sync::Arc};

use fernwood::discounts::DiscountScope;
use fernwood_app::domain::pos::models::DiscountInput;
use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    pos::{CartResponse, errors::into_status_error},
    state::State,
};

use super::scope;

/// Apply Discount Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ApplyDiscountRequest {
    /// Line to discount; the whole cart when omitted
    #[serde(default)]
    pub product_id: Option<String>,

    /// `percent` or `fixed`
    pub kind: String,

    /// Percentage points (e.g. `"10"`) or cedis (e.g. `"5.00"`)
    pub value: String,
}

impl ApplyDiscountRequest {
    fn into_discount(self) -> Result<(DiscountScope, DiscountInput), StatusError> {
        let value = self.value.trim();

        let input = match self.kind.trim().to_ascii_lowercase().as_str() {
            "percent" => DiscountInput::Percent(
                Decimal::from_str(value).or_400("percent discounts take a decimal value")?,
            ),
            "fixed" => DiscountInput::Fixed(parse_pesewas("fixed discount", value)?),
            other => {
                return Err(
                    StatusError::bad_request().brief(format!("unknown discount kind: {other}"))
                );
            }
        };

        Ok((scope(self.product_id), input))
    }
}

/// Apply Discount Handler
///
/// Replaces any discount already on the targeted lines. A cart discount spreads over every line in
/// proportion to its subtotal.
#[endpoint(
    tags("pos"),
    summary = "Apply Discount",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Discount applied"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid discount"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not in cart"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ApplyDiscountRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let cashier = depot.auth_user_or_401()?;
    let (target, discount) = json.into_inner().into_discount()?;

    let cart = state
        .app
        .pos
        .apply_discount(cashier.uuid, target, discount)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

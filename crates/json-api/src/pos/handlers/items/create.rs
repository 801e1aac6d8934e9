//! Add Cart Item Handler

use std::sync::Arc;

use fernwood::products::ProductId;
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

/// Add Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddItemRequest {
    pub product_id: String,
}

/// Add Cart Item Handler
///
/// Adds one unit, or bumps the line if the product is already in the cart.
#[endpoint(
    tags("pos"),
    summary = "Add Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Item added"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "Not enough stock"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let cashier = depot.auth_user_or_401()?;

    let cart = state
        .app
        .pos
        .add_item(cashier.uuid, &ProductId::from(json.into_inner().product_id))
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use fernwood::cart::CartError;
    use fernwood_app::domain::pos::PosServiceError;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        pos::handlers::tests::make_cart,
        test_helpers::{CASHIER, Mocks},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(CASHIER, Router::with_path("pos/cart/items").post(handler))
    }

    #[tokio::test]
    async fn test_add_item_success() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .pos
            .expect_add_item()
            .once()
            .withf(|cashier, product| {
                *cashier == CASHIER.uuid && product.as_str() == "PROD-000001"
            })
            .return_once(|_, _| Ok(make_cart()));

        let response: CartResponse = TestClient::post("http://example.com/pos/cart/items")
            .json(&json!({ "product_id": "PROD-000001" }))
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert_eq!(response.item_count, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_out_of_stock_returns_409() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.pos.expect_add_item().once().return_once(|_, product| {
            Err(PosServiceError::Cart(CartError::OutOfStock(product.clone())))
        });

        let res = TestClient::post("http://example.com/pos/cart/items")
            .json(&json!({ "product_id": "PROD-000005" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}

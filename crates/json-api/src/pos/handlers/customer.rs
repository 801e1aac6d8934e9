//! Attach Customer Handler

use std::sync::Arc;

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

/// Attach Customer Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AttachCustomerRequest {
    /// Customer to attach; `null` walks the sale in as a guest
    #[serde(default)]
    pub customer_id: Option<String>,
}

/// Attach Customer Handler
#[endpoint(
    tags("pos"),
    summary = "Attach Customer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Customer attached"),
        (status_code = StatusCode::NOT_FOUND, description = "Customer not found"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AttachCustomerRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let cashier = depot.auth_user_or_401()?;

    let cart = state
        .app
        .pos
        .attach_customer(cashier.uuid, json.into_inner().customer_id)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use fernwood_app::domain::{
        customers::errors::CustomersServiceError,
        pos::{
            PosServiceError,
            models::{CartView, CustomerRef},
        },
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        pos::handlers::tests::make_cart,
        test_helpers::{CASHIER, Mocks},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(CASHIER, Router::with_path("pos/cart/customer").put(handler))
    }

    #[tokio::test]
    async fn test_attach_customer() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .pos
            .expect_attach_customer()
            .once()
            .withf(|_, customer| customer.as_deref() == Some("1"))
            .return_once(|_, _| {
                Ok(CartView {
                    customer: Some(CustomerRef {
                        id: "1".to_string(),
                        name: "John Smith".to_string(),
                    }),
                    ..make_cart()
                })
            });

        let response: CartResponse = TestClient::put("http://example.com/pos/cart/customer")
            .json(&json!({ "customer_id": "1" }))
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        let customer = response.customer.ok_or("expected a customer")?;

        assert_eq!(customer.name, "John Smith");

        Ok(())
    }

    #[tokio::test]
    async fn test_detach_customer() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .pos
            .expect_attach_customer()
            .once()
            .withf(|_, customer| customer.is_none())
            .return_once(|_, _| Ok(make_cart()));

        let response: CartResponse = TestClient::put("http://example.com/pos/cart/customer")
            .json(&json!({ "customer_id": null }))
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert!(response.customer.is_none(), "expected a guest sale");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_customer_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .pos
            .expect_attach_customer()
            .once()
            .return_once(|_, _| Err(PosServiceError::Customers(CustomersServiceError::NotFound)));

        let res = TestClient::put("http://example.com/pos/cart/customer")
            .json(&json!({ "customer_id": "99" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}

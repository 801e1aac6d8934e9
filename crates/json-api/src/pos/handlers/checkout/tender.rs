//! Tender Cash Handler

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

/// Tender Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TenderRequest {
    /// Cash handed over in cedis, e.g. `"200.00"`
    pub amount: String,
}

/// Tender Cash Handler
///
/// Records the cash handed over and the change due. A short tender is accepted here with no change
/// due; processing the payment refuses it.
#[endpoint(
    tags("pos"),
    summary = "Tender Cash",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Amount recorded"),
        (status_code = StatusCode::BAD_REQUEST, description = "Amount is not a valid sum of cedis"),
        (status_code = StatusCode::CONFLICT, description = "Checkout is not taking cash"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<TenderRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let cashier = depot.auth_user_or_401()?;
    let amount = parse_pesewas("amount", &json.into_inner().amount)?;

    let cart = state
        .app
        .pos
        .tender(cashier.uuid, amount)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use fernwood::checkout::{CheckoutError, PaymentMethod};
    use fernwood_app::domain::pos::{PosServiceError, models::CheckoutView};
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        pos::handlers::tests::make_checkout_cart,
        test_helpers::{CASHIER, Mocks},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(CASHIER, Router::with_path("pos/checkout/tender").put(handler))
    }

    #[tokio::test]
    async fn test_tender_reports_change() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .pos
            .expect_tender()
            .once()
            .withf(|_, amount| *amount == 20_000)
            .return_once(|_, _| {
                let mut cart = make_checkout_cart("confirming", Some(PaymentMethod::Cash));

                cart.checkout = cart.checkout.map(|checkout| CheckoutView {
                    tendered: Some(20_000),
                    change: Some(9_650),
                    ..checkout
                });

                Ok(cart)
            });

        let response: CartResponse = TestClient::put("http://example.com/pos/checkout/tender")
            .json(&json!({ "amount": "200.00" }))
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        let checkout = response.checkout.ok_or("expected an open checkout")?;

        assert_eq!(checkout.tendered, Some(20_000));
        assert_eq!(checkout.change, Some(9_650));

        Ok(())
    }

    #[tokio::test]
    async fn test_short_tender_has_no_change() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .pos
            .expect_tender()
            .once()
            .withf(|_, amount| *amount == 10_000)
            .return_once(|_, _| {
                let mut cart = make_checkout_cart("entering_amount", Some(PaymentMethod::Cash));

                cart.checkout = cart.checkout.map(|checkout| CheckoutView {
                    tendered: Some(10_000),
                    change: None,
                    ..checkout
                });

                Ok(cart)
            });

        let response: CartResponse = TestClient::put("http://example.com/pos/checkout/tender")
            .json(&json!({ "amount": "100" }))
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        let checkout = response.checkout.ok_or("expected an open checkout")?;

        assert_eq!(checkout.tendered, Some(10_000));
        assert_eq!(checkout.change, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_tender_outside_cash_returns_409() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.pos.expect_tender().once().return_once(|_, _| {
            Err(PosServiceError::Checkout(CheckoutError::InvalidTransition {
                action: "tender",
                state: "confirming",
            }))
        });

        let res = TestClient::put("http://example.com/pos/checkout/tender")
            .json(&json!({ "amount": "100" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_bad_amounts_are_rejected() -> TestResult {
        for amount in ["-5", "abc", "10.001"] {
            let res = TestClient::put("http://example.com/pos/checkout/tender")
                .json(&json!({ "amount": amount }))
                .send(&make_service(Mocks::default()))
                .await;

            assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST), "{amount}");
        }

        Ok(())
    }
}

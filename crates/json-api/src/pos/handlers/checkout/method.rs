//! Select Payment Method Handler

use std::sync::Arc;

use fernwood::checkout::PaymentMethod;
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

/// Select Method Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SelectMethodRequest {
    /// `cash`, `card`, `mobile_money` or `bank_transfer`
    pub method: String,
}

/// Select Payment Method Handler
///
/// Cash moves on to tendering; other methods go straight to confirmation.
#[endpoint(
    tags("pos"),
    summary = "Select Payment Method",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Method selected"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown or disabled method"),
        (status_code = StatusCode::CONFLICT, description = "No checkout open"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<SelectMethodRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let cashier = depot.auth_user_or_401()?;
    let method = parse_label::<PaymentMethod>("method", &json.into_inner().method)?;

    let cart = state
        .app
        .pos
        .select_method(cashier.uuid, method)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use fernwood_app::domain::pos::PosServiceError;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        pos::handlers::tests::make_checkout_cart,
        test_helpers::{CASHIER, Mocks},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(CASHIER, Router::with_path("pos/checkout/method").put(handler))
    }

    #[tokio::test]
    async fn test_select_mobile_money() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .pos
            .expect_select_method()
            .once()
            .withf(|_, method| *method == PaymentMethod::MobileMoney)
            .return_once(|_, method| Ok(make_checkout_cart("confirming", Some(method))));

        let response: CartResponse = TestClient::put("http://example.com/pos/checkout/method")
            .json(&json!({ "method": "mobile_money" }))
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        let checkout = response.checkout.ok_or("expected an open checkout")?;

        assert_eq!(checkout.state, "confirming");
        assert_eq!(checkout.method.as_deref(), Some("mobile_money"));

        Ok(())
    }

    #[tokio::test]
    async fn test_disabled_method_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .pos
            .expect_select_method()
            .once()
            .return_once(|_, method| Err(PosServiceError::MethodDisabled(method)));

        let res = TestClient::put("http://example.com/pos/checkout/method")
            .json(&json!({ "method": "bank_transfer" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_method_returns_400() -> TestResult {
        let res = TestClient::put("http://example.com/pos/checkout/method")
            .json(&json!({ "method": "cheque" }))
            .send(&make_service(Mocks::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}

//! Get Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    pos::{CartResponse, errors::into_status_error},
    state::State,
};

/// Get Cart Handler
///
/// The signed in cashier's cart.
#[endpoint(
    tags("pos"),
    summary = "Get Cart",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let cashier = depot.auth_user_or_401()?;

    let cart = state
        .app
        .pos
        .cart(cashier.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        pos::handlers::tests::make_cart,
        test_helpers::{CASHIER, Mocks},
    };

    use super::*;

    #[tokio::test]
    async fn test_get_cart_for_signed_in_cashier() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .pos
            .expect_cart()
            .once()
            .withf(|cashier| *cashier == CASHIER.uuid)
            .return_once(|_| Ok(make_cart()));

        let response: CartResponse = TestClient::get("http://example.com/pos/cart")
            .send(&mocks.service(CASHIER, Router::with_path("pos/cart").get(handler)))
            .await
            .take_json()
            .await?;

        assert_eq!(response.total, 10_350);
        assert_eq!(response.tax_rate, "15");
        assert_eq!(
            response
                .lines
                .first()
                .and_then(|line| line.discount_percent.as_deref()),
            Some("10")
        );

        Ok(())
    }
}

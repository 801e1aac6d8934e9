//! Clear Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    pos::{CartResponse, errors::into_status_error},
    state::State,
};

/// Clear Cart Handler
///
/// Empties the cart and detaches the customer.
#[endpoint(
    tags("pos"),
    summary = "Clear Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart cleared"),
        (status_code = StatusCode::CONFLICT, description = "Checkout in progress"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let cashier = depot.auth_user_or_401()?;

    let cart = state
        .app
        .pos
        .clear_cart(cashier.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use fernwood_app::domain::pos::PosServiceError;
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::{CASHIER, Mocks};

    use super::*;

    #[tokio::test]
    async fn test_clear_during_checkout_returns_409() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .pos
            .expect_clear_cart()
            .once()
            .return_once(|_| Err(PosServiceError::CheckoutInProgress));

        let res = TestClient::delete("http://example.com/pos/cart")
            .send(&mocks.service(CASHIER, Router::with_path("pos/cart").delete(handler)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}

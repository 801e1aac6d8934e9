//! Delete Product Handler

use std::sync::Arc;

use fernwood::products::ProductId;
use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Delete Product Handler
#[endpoint(
    tags("products"),
    summary = "Delete Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Product deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<String>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .products
        .delete_product(&ProductId::from(product.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use fernwood_app::domain::products::ProductsServiceError;
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::{ADMIN, Mocks};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(ADMIN, Router::with_path("products/{product}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_product_success() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .products
            .expect_delete_product()
            .once()
            .withf(|id| id.as_str() == "PROD-000002")
            .return_once(|_| Ok(()));

        let res = TestClient::delete("http://example.com/products/PROD-000002")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_product_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .products
            .expect_delete_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::NotFound));

        let res = TestClient::delete("http://example.com/products/PROD-999999")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}

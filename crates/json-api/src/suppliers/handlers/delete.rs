//! Delete Supplier Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{extensions::*, state::State, suppliers::errors::into_status_error};

/// Delete Supplier Handler
#[endpoint(
    tags("suppliers"),
    summary = "Delete Supplier",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Supplier deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Supplier not found"),
    ),
)]
pub(crate) async fn handler(
    supplier: PathParam<String>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .suppliers
        .delete_supplier(&supplier.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use fernwood_app::domain::suppliers::SuppliersServiceError;
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::{ADMIN, Mocks};

    use super::*;

    #[tokio::test]
    async fn test_delete_missing_supplier_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .suppliers
            .expect_delete_supplier()
            .once()
            .return_once(|_| Err(SuppliersServiceError::NotFound));

        let res = TestClient::delete("http://example.com/suppliers/SUP-404")
            .send(&mocks.service(
                ADMIN,
                Router::with_path("suppliers/{supplier}").delete(handler),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}

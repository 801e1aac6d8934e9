//! Update Supplier Handler

use std::sync::Arc;

use fernwood_app::domain::suppliers::models::SupplierUpdate;
use jiff::civil::Date;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    state::State,
    suppliers::{errors::into_status_error, get::SupplierResponse},
};

/// Update Supplier Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct UpdateSupplierRequest {
    pub name: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub products: Option<u32>,
    pub status: Option<String>,

    /// ISO date, e.g. `2025-03-01`
    pub last_order: Option<String>,
}

impl TryFrom<UpdateSupplierRequest> for SupplierUpdate {
    type Error = StatusError;

    fn try_from(request: UpdateSupplierRequest) -> Result<Self, Self::Error> {
        Ok(SupplierUpdate {
            status: request
                .status
                .map(|status| parse_label("supplier status", &status))
                .transpose()?,
            last_order: request
                .last_order
                .map(|on| on.parse::<Date>())
                .transpose()
                .or_400("last_order must be an ISO date")?,
            name: request.name,
            contact_person: request.contact_person,
            email: request.email,
            phone: request.phone,
            address: request.address,
            products: request.products,
        })
    }
}

/// Update Supplier Handler
#[endpoint(
    tags("suppliers"),
    summary = "Update Supplier",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Supplier updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Supplier not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    supplier: PathParam<String>,
    json: JsonBody<UpdateSupplierRequest>,
    depot: &mut Depot,
) -> Result<Json<SupplierResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let supplier = state
        .app
        .suppliers
        .update_supplier(&supplier.into_inner(), json.into_inner().try_into()?)
        .await
        .map_err(into_status_error)?;

    Ok(Json(supplier.into()))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{ADMIN, Mocks};

    use super::{super::tests::make_supplier, *};

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(ADMIN, Router::with_path("suppliers/{supplier}").put(handler))
    }

    #[tokio::test]
    async fn test_update_records_last_order() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .suppliers
            .expect_update_supplier()
            .once()
            .withf(|id, update| {
                id == "SUP-002"
                    && *update
                        == SupplierUpdate {
                            last_order: Some(date(2025, 3, 1)),
                            ..SupplierUpdate::default()
                        }
            })
            .return_once(|_, _| {
                let mut supplier = make_supplier("SUP-002", "Tema Upholstery");
                supplier.last_order = Some(date(2025, 3, 1));

                Ok(supplier)
            });

        let response: SupplierResponse = TestClient::put("http://example.com/suppliers/SUP-002")
            .json(&json!({ "last_order": "2025-03-01" }))
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert_eq!(response.last_order.as_deref(), Some("2025-03-01"));

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_date_returns_400() -> TestResult {
        let res = TestClient::put("http://example.com/suppliers/SUP-002")
            .json(&json!({ "last_order": "last tuesday" }))
            .send(&make_service(Mocks::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}

//! Create Supplier Handler

use std::sync::Arc;

use fernwood_app::domain::suppliers::models::NewSupplier;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    state::State,
    suppliers::{errors::into_status_error, get::SupplierResponse},
};

/// Create Supplier Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct CreateSupplierRequest {
    pub name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub address: String,

    /// Defaults to `active`
    pub status: Option<String>,
}

impl TryFrom<CreateSupplierRequest> for NewSupplier {
    type Error = StatusError;

    fn try_from(request: CreateSupplierRequest) -> Result<Self, Self::Error> {
        Ok(NewSupplier {
            status: request
                .status
                .map(|status| parse_label("supplier status", &status))
                .transpose()?
                .unwrap_or_default(),
            name: request.name,
            contact_person: request.contact_person,
            email: request.email,
            phone: request.phone,
            address: request.address,
        })
    }
}

/// Create Supplier Handler
#[endpoint(
    tags("suppliers"),
    summary = "Create Supplier",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Supplier created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateSupplierRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SupplierResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let supplier = state
        .app
        .suppliers
        .create_supplier(json.into_inner().try_into()?)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/suppliers/{}", supplier.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(supplier.into()))
}

#[cfg(test)]
mod tests {
    use fernwood_app::domain::suppliers::SuppliersServiceError;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{ADMIN, Mocks};

    use super::{super::tests::make_supplier, *};

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(ADMIN, Router::with_path("suppliers").post(handler))
    }

    #[tokio::test]
    async fn test_create_supplier_success() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .suppliers
            .expect_create_supplier()
            .once()
            .withf(|new| new.name == "Kumasi Cane Co.")
            .return_once(|_| Ok(make_supplier("SUP-005", "Kumasi Cane Co.")));

        let mut res = TestClient::post("http://example.com/suppliers")
            .json(&json!({ "name": "Kumasi Cane Co.", "contact_person": "Kwame Asante" }))
            .send(&make_service(mocks))
            .await;

        let response: SupplierResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(response.id, "SUP-005");

        Ok(())
    }

    #[tokio::test]
    async fn test_blank_name_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .suppliers
            .expect_create_supplier()
            .once()
            .return_once(|_| Err(SuppliersServiceError::MissingRequiredData("name")));

        let res = TestClient::post("http://example.com/suppliers")
            .json(&json!({ "email": "hello@example.com" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}

//! Create Customer Handler

use std::sync::Arc;

use fernwood_app::domain::customers::models::NewCustomer;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    customers::{errors::into_status_error, get::CustomerResponse},
    extensions::*,
    state::State,
};

/// Create Customer Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCustomerRequest {
    pub name: String,
    pub email: String,

    #[serde(default)]
    pub phone: String,

    /// Defaults to `new`
    #[serde(default)]
    pub status: Option<String>,
}

impl TryFrom<CreateCustomerRequest> for NewCustomer {
    type Error = StatusError;

    fn try_from(request: CreateCustomerRequest) -> Result<Self, Self::Error> {
        Ok(NewCustomer {
            status: request
                .status
                .map(|status| parse_label("customer status", &status))
                .transpose()?
                .unwrap_or_default(),
            name: request.name,
            email: request.email,
            phone: request.phone,
        })
    }
}

/// Create Customer Handler
#[endpoint(
    tags("customers"),
    summary = "Create Customer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Customer created"),
        (status_code = StatusCode::CONFLICT, description = "Email already in use"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCustomerRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CustomerResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let customer = state
        .app
        .customers
        .create_customer(json.into_inner().try_into()?)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/customers/{}", customer.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(customer.into()))
}

#[cfg(test)]
mod tests {
    use fernwood_app::domain::customers::{CustomersServiceError, models::CustomerStatus};
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{ADMIN, Mocks};

    use super::{super::tests::make_customer, *};

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(ADMIN, Router::with_path("customers").post(handler))
    }

    #[tokio::test]
    async fn test_create_customer_defaults_to_new() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .customers
            .expect_create_customer()
            .once()
            .withf(|new| new.status == CustomerStatus::New && new.phone.is_empty())
            .return_once(|_| Ok(make_customer("5", "Kofi Boateng", CustomerStatus::New)));

        let mut res = TestClient::post("http://example.com/customers")
            .json(&json!({ "name": "Kofi Boateng", "email": "kofi.boateng@example.com" }))
            .send(&make_service(mocks))
            .await;

        let response: CustomerResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(response.status, "new");

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_email_returns_409() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .customers
            .expect_create_customer()
            .once()
            .return_once(|_| Err(CustomersServiceError::EmailTaken));

        let res = TestClient::post("http://example.com/customers")
            .json(&json!({ "name": "John Smith", "email": "john.smith@example.com" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}

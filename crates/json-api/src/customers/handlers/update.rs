//! Update Customer Handler

use std::sync::Arc;

use fernwood_app::domain::customers::models::CustomerUpdate;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    customers::{errors::into_status_error, get::CustomerResponse},
    extensions::*,
    state::State,
};

/// Update Customer Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct UpdateCustomerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<String>,
}

impl TryFrom<UpdateCustomerRequest> for CustomerUpdate {
    type Error = StatusError;

    fn try_from(request: UpdateCustomerRequest) -> Result<Self, Self::Error> {
        Ok(CustomerUpdate {
            status: request
                .status
                .map(|status| parse_label("customer status", &status))
                .transpose()?,
            name: request.name,
            email: request.email,
            phone: request.phone,
        })
    }
}

/// Update Customer Handler
#[endpoint(
    tags("customers"),
    summary = "Update Customer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Customer updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Customer not found"),
        (status_code = StatusCode::CONFLICT, description = "Email already in use"),
    ),
)]
pub(crate) async fn handler(
    customer: PathParam<String>,
    json: JsonBody<UpdateCustomerRequest>,
    depot: &mut Depot,
) -> Result<Json<CustomerResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let customer = state
        .app
        .customers
        .update_customer(&customer.into_inner(), json.into_inner().try_into()?)
        .await
        .map_err(into_status_error)?;

    Ok(Json(customer.into()))
}

//! Get Customer Handler

use std::sync::Arc;

use fernwood_app::domain::customers::models::Customer;
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{customers::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,

    /// Completed purchases
    pub orders: u32,

    /// Lifetime spend in pesewas
    pub total_spent: u64,

    pub loyalty_points: u64,

    /// ISO date, e.g. `2025-03-14`
    pub last_purchase: Option<String>,

    /// `active`, `inactive`, `vip` or `new`
    pub status: String,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            status: customer.status.label(),
            id: customer.id,
            name: customer.name,
            email: customer.email,
            phone: customer.phone,
            orders: customer.orders,
            total_spent: customer.total_spent,
            loyalty_points: customer.loyalty_points,
            last_purchase: customer.last_purchase.map(|on| on.to_string()),
        }
    }
}

/// Get Customer Handler
#[endpoint(
    tags("customers"),
    summary = "Get Customer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Customer"),
        (status_code = StatusCode::NOT_FOUND, description = "Customer not found"),
    ),
)]
pub(crate) async fn handler(
    customer: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<CustomerResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let customer = state
        .app
        .customers
        .get_customer(&customer.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(customer.into()))
}

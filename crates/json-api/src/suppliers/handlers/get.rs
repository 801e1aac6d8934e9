//! Get Supplier Handler

use std::sync::Arc;

use fernwood_app::domain::suppliers::models::Supplier;
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, state::State, suppliers::errors::into_status_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SupplierResponse {
    /// e.g. `SUP-001`
    pub id: String,

    pub name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub products: u32,

    /// `active` or `inactive`
    pub status: String,

    pub last_order: Option<String>,
}

impl From<Supplier> for SupplierResponse {
    fn from(supplier: Supplier) -> Self {
        Self {
            status: supplier.status.label(),
            last_order: supplier.last_order.map(|on| on.to_string()),
            id: supplier.id,
            name: supplier.name,
            contact_person: supplier.contact_person,
            email: supplier.email,
            phone: supplier.phone,
            address: supplier.address,
            products: supplier.products,
        }
    }
}

/// Get Supplier Handler
#[endpoint(
    tags("suppliers"),
    summary = "Get Supplier",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Supplier"),
        (status_code = StatusCode::NOT_FOUND, description = "Supplier not found"),
    ),
)]
pub(crate) async fn handler(
    supplier: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<SupplierResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let supplier = state
        .app
        .suppliers
        .get_supplier(&supplier.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(supplier.into()))
}

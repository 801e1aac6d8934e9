//! Get Product Handler

use std::sync::Arc;

use fernwood::products::ProductId;
use fernwood_app::domain::products::models::Product;
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, products::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// Product identifier, e.g. `PROD-000001`
    pub id: String,

    pub name: String,
    pub sku: String,
    pub category: String,

    /// Unit price in pesewas
    pub price: u64,

    /// Units on hand
    pub stock: u32,

    /// `in_stock`, `low_stock` or `out_of_stock`
    pub status: String,

    pub image_url: Option<String>,
}

impl ProductResponse {
    pub(crate) fn new(product: Product, low_stock_threshold: u32) -> Self {
        Self {
            status: product.status(low_stock_threshold).label(),
            id: product.id.to_string(),
            name: product.name,
            sku: product.sku,
            category: product.category,
            price: product.price,
            stock: product.stock,
            image_url: product.image_url,
        }
    }
}

/// Get Product Handler
#[endpoint(
    tags("products"),
    summary = "Get Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let products = &state.app.products;

    let product = products
        .get_product(&ProductId::from(product.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductResponse::new(
        product,
        products.low_stock_threshold(),
    )))
}

//! Update Product Stock Handler

use std::sync::Arc;

use fernwood::products::ProductId;
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
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Stock Adjustment Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateStockRequest {
    /// New units on hand
    pub stock: u32,
}

/// Update Product Stock Handler
#[endpoint(
    tags("products"),
    summary = "Set Product Stock",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Stock updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<String>,
    json: JsonBody<UpdateStockRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let products = &state.app.products;

    let product = products
        .update_stock(
            &ProductId::from(product.into_inner()),
            json.into_inner().stock,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductResponse::new(
        product,
        products.low_stock_threshold(),
    )))
}

//! Update Product Handler

use std::sync::Arc;

use fernwood::products::ProductId;
use fernwood_app::domain::products::models::ProductUpdate;
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

/// Update Product Request
///
/// Omitted fields are left unchanged.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct UpdateProductRequest {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub category: Option<String>,

    /// Unit price in cedis, e.g. `"1199.99"`
    pub price: Option<String>,
    pub stock: Option<u32>,
    pub image_url: Option<String>,
}

impl TryFrom<UpdateProductRequest> for ProductUpdate {
    type Error = StatusError;

    fn try_from(request: UpdateProductRequest) -> Result<Self, Self::Error> {
        Ok(ProductUpdate {
            name: request.name,
            sku: request.sku,
            category: request.category,
            price: request
                .price
                .map(|price| parse_pesewas("price", &price))
                .transpose()?,
            stock: request.stock,
            image_url: request.image_url,
        })
    }
}

/// Update Product Handler
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "SKU already in use"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<String>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let products = &state.app.products;
    let update = ProductUpdate::try_from(json.into_inner())?;

    let product = products
        .update_product(&ProductId::from(product.into_inner()), update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductResponse::new(
        product,
        products.low_stock_threshold(),
    )))
}

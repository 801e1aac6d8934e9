//! Create Product Handler

use std::sync::Arc;

use fernwood_app::domain::products::models::NewProduct;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    pub name: String,
    pub sku: String,
    pub category: String,

    /// Unit price in cedis, e.g. `"1299.99"`
    pub price: String,

    #[serde(default)]
    pub stock: u32,

    #[serde(default)]
    pub image_url: Option<String>,
}

impl TryFrom<CreateProductRequest> for NewProduct {
    type Error = StatusError;

    fn try_from(request: CreateProductRequest) -> Result<Self, Self::Error> {
        Ok(NewProduct {
            price: parse_pesewas("price", &request.price)?,
            name: request.name,
            sku: request.sku,
            category: request.category,
            stock: request.stock,
            image_url: request.image_url,
        })
    }
}

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::CONFLICT, description = "SKU already in use"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let products = &state.app.products;
    let product = NewProduct::try_from(json.into_inner())?;

    let product = products
        .create_product(product)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/products/{}", product.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(ProductResponse::new(
        product,
        products.low_stock_threshold(),
    )))
}

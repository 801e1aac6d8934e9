//! Get Category Handler

use std::sync::Arc;

use fernwood_app::domain::categories::models::Category;
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{categories::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub product_count: u32,

    /// `active` or `archived`
    pub status: String,

    pub featured: bool,
    pub image_url: Option<String>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            status: category.status.label(),
            id: category.id,
            name: category.name,
            slug: category.slug,
            description: category.description,
            product_count: category.product_count,
            featured: category.featured,
            image_url: category.image_url,
        }
    }
}

/// Get Category Handler
#[endpoint(
    tags("categories"),
    summary = "Get Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Category"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
    ),
)]
pub(crate) async fn handler(
    category: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<CategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let category = state
        .app
        .categories
        .get_category(&category.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(category.into()))
}

//! Update Category Handler

use std::sync::Arc;

use fernwood_app::domain::categories::models::CategoryUpdate;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    categories::{errors::into_status_error, get::CategoryResponse},
    extensions::*,
    state::State,
};

/// Update Category Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub featured: Option<bool>,
    pub image_url: Option<String>,
}

impl TryFrom<UpdateCategoryRequest> for CategoryUpdate {
    type Error = StatusError;

    fn try_from(request: UpdateCategoryRequest) -> Result<Self, Self::Error> {
        Ok(CategoryUpdate {
            status: request
                .status
                .map(|status| parse_label("category status", &status))
                .transpose()?,
            name: request.name,
            slug: request.slug,
            description: request.description,
            featured: request.featured,
            image_url: request.image_url,
        })
    }
}

/// Update Category Handler
#[endpoint(
    tags("categories"),
    summary = "Update Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Category updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
        (status_code = StatusCode::CONFLICT, description = "Slug already in use"),
    ),
)]
pub(crate) async fn handler(
    category: PathParam<String>,
    json: JsonBody<UpdateCategoryRequest>,
    depot: &mut Depot,
) -> Result<Json<CategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let category = state
        .app
        .categories
        .update_category(&category.into_inner(), json.into_inner().try_into()?)
        .await
        .map_err(into_status_error)?;

    Ok(Json(category.into()))
}

#[cfg(test)]
mod tests {
    use fernwood_app::domain::categories::models::CategoryStatus;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{ADMIN, Mocks};

    use super::{super::tests::make_category, *};

    #[tokio::test]
    async fn test_archive_category() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .categories
            .expect_update_category()
            .once()
            .withf(|id, update| {
                id == "3"
                    && *update
                        == CategoryUpdate {
                            status: Some(CategoryStatus::Archived),
                            ..CategoryUpdate::default()
                        }
            })
            .return_once(|_, _| {
                let mut category = make_category("3", "Office", "office");
                category.status = CategoryStatus::Archived;

                Ok(category)
            });

        let response: CategoryResponse = TestClient::put("http://example.com/categories/3")
            .json(&json!({ "status": "archived" }))
            .send(&mocks.service(
                ADMIN,
                Router::with_path("categories/{category}").put(handler),
            ))
            .await
            .take_json()
            .await?;

        assert_eq!(response.status, "archived");

        Ok(())
    }
}

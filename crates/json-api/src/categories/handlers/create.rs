//! Create Category Handler

use std::sync::Arc;

use fernwood_app::domain::categories::models::NewCategory;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    categories::{errors::into_status_error, get::CategoryResponse},
    extensions::*,
    state::State,
};

/// Create Category Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCategoryRequest {
    pub name: String,

    /// Generated from the name when omitted
    #[serde(default)]
    pub slug: Option<String>,

    #[serde(default)]
    pub description: String,

    /// `active` or `archived`
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub featured: bool,

    #[serde(default)]
    pub image_url: Option<String>,
}

impl TryFrom<CreateCategoryRequest> for NewCategory {
    type Error = StatusError;

    fn try_from(request: CreateCategoryRequest) -> Result<Self, Self::Error> {
        Ok(NewCategory {
            status: request
                .status
                .map(|status| parse_label("category status", &status))
                .transpose()?
                .unwrap_or_default(),
            name: request.name,
            slug: request.slug,
            description: request.description,
            featured: request.featured,
            image_url: request.image_url,
        })
    }
}

/// Create Category Handler
#[endpoint(
    tags("categories"),
    summary = "Create Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Category created"),
        (status_code = StatusCode::CONFLICT, description = "Slug already in use"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCategoryRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let category = state
        .app
        .categories
        .create_category(json.into_inner().try_into()?)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/categories/{}", category.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(category.into()))
}

#[cfg(test)]
mod tests {
    use fernwood_app::domain::categories::CategoriesServiceError;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{ADMIN, Mocks};

    use super::{super::tests::make_category, *};

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(ADMIN, Router::with_path("categories").post(handler))
    }

    #[tokio::test]
    async fn test_create_category_success() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .categories
            .expect_create_category()
            .once()
            .withf(|new| new.name == "Outdoor Living" && new.slug.is_none())
            .return_once(|_| Ok(make_category("6", "Outdoor Living", "outdoor-living")));

        let mut res = TestClient::post("http://example.com/categories")
            .json(&json!({ "name": "Outdoor Living" }))
            .send(&make_service(mocks))
            .await;

        let response: CategoryResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(response.slug, "outdoor-living");

        Ok(())
    }

    #[tokio::test]
    async fn test_taken_slug_returns_409() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .categories
            .expect_create_category()
            .once()
            .return_once(|_| Err(CategoriesServiceError::SlugTaken("bedroom".to_string())));

        let res = TestClient::post("http://example.com/categories")
            .json(&json!({ "name": "Bedroom" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_returns_400() -> TestResult {
        let res = TestClient::post("http://example.com/categories")
            .json(&json!({ "name": "Patio", "status": "hidden" }))
            .send(&make_service(Mocks::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}

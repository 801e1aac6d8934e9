//! Category Index Handler

use std::sync::Arc;

use fernwood_app::{domain::categories::models::CategoryFilter, listing::Page};
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    categories::{errors::into_status_error, get::CategoryResponse},
    extensions::*,
    pagination::{PageMeta, pagination},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoriesResponse {
    pub categories: Vec<CategoryResponse>,
    pub pagination: PageMeta,
}

/// Category Index Handler
#[endpoint(
    tags("categories"),
    summary = "List Categories",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    search: QueryParam<String, false>,
    status: QueryParam<String, false>,
    page: QueryParam<usize, false>,
    per_page: QueryParam<usize, false>,
    depot: &mut Depot,
) -> Result<Json<CategoriesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = CategoryFilter {
        search: search.into_inner(),
        status: status
            .into_inner()
            .map(|status| parse_label("category status", &status))
            .transpose()?,
    };

    let matching = state
        .app
        .categories
        .list_categories(&filter)
        .await
        .map_err(into_status_error)?;

    let (rows, meta) = PageMeta::split(Page::from_items(matching, pagination(page, per_page)));

    Ok(Json(CategoriesResponse {
        categories: rows.into_iter().map(Into::into).collect(),
        pagination: meta,
    }))
}

#[cfg(test)]
mod tests {
    use fernwood_app::domain::categories::models::CategoryStatus;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{ADMIN, Mocks};

    use super::{super::tests::make_category, *};

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(ADMIN, Router::with_path("categories").get(handler))
    }

    #[tokio::test]
    async fn test_index_filters_by_status() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .categories
            .expect_list_categories()
            .once()
            .withf(|filter| {
                *filter
                    == CategoryFilter {
                        search: Some("room".to_string()),
                        status: Some(CategoryStatus::Archived),
                    }
            })
            .return_once(|_| {
                let mut category = make_category("5", "Dining Room", "dining-room");
                category.status = CategoryStatus::Archived;

                Ok(vec![category])
            });

        let response: CategoriesResponse =
            TestClient::get("http://example.com/categories?search=room&status=archived")
                .send(&make_service(mocks))
                .await
                .take_json()
                .await?;

        assert_eq!(response.pagination.total, 1);
        assert_eq!(
            response
                .categories
                .first()
                .map(|category| category.status.as_str()),
            Some("archived")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_returns_400() -> TestResult {
        let res = TestClient::get("http://example.com/categories?status=deleted")
            .send(&make_service(Mocks::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}

//! Product Index Handler

use std::sync::Arc;

use fernwood_app::{
    domain::products::models::{ProductFilter, ProductSort},
    listing::{Page, SortOrder},
};
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    pagination::{PageMeta, pagination},
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// Products on this page
    pub products: Vec<ProductResponse>,

    pub pagination: PageMeta,
}

/// Product Index Handler
///
/// Search matches name or SKU. `status` is one of `in_stock`, `low_stock`, `out_of_stock`;
/// `sort` is `name`, `price` or `stock`; `order` is `asc` or `desc`.
#[endpoint(
    tags("products"),
    summary = "List Products",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    search: QueryParam<String, false>,
    category: QueryParam<String, false>,
    status: QueryParam<String, false>,
    sort: QueryParam<String, false>,
    order: QueryParam<String, false>,
    page: QueryParam<usize, false>,
    per_page: QueryParam<usize, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let products = &state.app.products;

    let filter = ProductFilter {
        search: search.into_inner(),
        category: category.into_inner(),
        status: status
            .into_inner()
            .map(|status| parse_label("stock status", &status))
            .transpose()?,
        sort: sort
            .into_inner()
            .map(|sort| parse_label::<ProductSort>("sort", &sort))
            .transpose()?
            .unwrap_or_default(),
        order: order
            .into_inner()
            .map(|order| parse_label::<SortOrder>("order", &order))
            .transpose()?
            .unwrap_or_default(),
    };

    let matching = products
        .list_products(&filter)
        .await
        .map_err(into_status_error)?;

    let threshold = products.low_stock_threshold();
    let (rows, meta) = PageMeta::split(Page::from_items(matching, pagination(page, per_page)));

    Ok(Json(ProductsResponse {
        products: rows
            .into_iter()
            .map(|product| ProductResponse::new(product, threshold))
            .collect(),
        pagination: meta,
    }))
}

#[cfg(test)]
mod tests {
    use fernwood::products::StockStatus;
    use fernwood_app::{domain::products::ProductsServiceError, persistence::PersistenceError};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{ADMIN, Mocks};

    use super::{super::tests::make_product, *};

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(ADMIN, Router::with_path("products").get(handler))
    }

    #[tokio::test]
    async fn test_index_forwards_filters() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .products
            .expect_list_products()
            .once()
            .withf(|filter| {
                *filter
                    == ProductFilter {
                        search: Some("sofa".to_string()),
                        category: None,
                        status: Some(StockStatus::OutOfStock),
                        sort: ProductSort::Price,
                        order: SortOrder::Desc,
                    }
            })
            .return_once(|_| Ok(vec![make_product("PROD-000003", 0)]));

        mocks.products.expect_low_stock_threshold().return_const(5_u32);

        let response: ProductsResponse = TestClient::get(
            "http://example.com/products?search=sofa&status=out_of_stock&sort=price&order=desc",
        )
        .send(&make_service(mocks))
        .await
        .take_json()
        .await?;

        assert_eq!(response.pagination.total, 1);
        assert_eq!(
            response
                .products
                .first()
                .map(|product| product.status.as_str()),
            Some("out_of_stock")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_index_pages_results() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.products.expect_list_products().once().return_once(|_| {
            Ok((1..=12)
                .map(|n| make_product(&format!("PROD-{n:06}"), 20))
                .collect())
        });

        mocks.products.expect_low_stock_threshold().return_const(5_u32);

        let response: ProductsResponse =
            TestClient::get("http://example.com/products?page=2&per_page=5")
                .send(&make_service(mocks))
                .await
                .take_json()
                .await?;

        let ids: Vec<&str> = response
            .products
            .iter()
            .map(|product| product.id.as_str())
            .collect();

        assert_eq!(
            ids,
            [
                "PROD-000006",
                "PROD-000007",
                "PROD-000008",
                "PROD-000009",
                "PROD-000010"
            ]
        );
        assert_eq!(response.pagination.total_pages, 3);

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_returns_400() -> TestResult {
        let res = TestClient::get("http://example.com/products?status=discontinued")
            .send(&make_service(Mocks::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_error_returns_500() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .products
            .expect_list_products()
            .once()
            .return_once(|_| {
                Err(ProductsServiceError::Storage(
                    PersistenceError::InvalidFormat("expected an object"),
                ))
            });

        let res = TestClient::get("http://example.com/products")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}

//! Report Summary Handler

use std::sync::Arc;

use fernwood_app::domain::{
    reports::models::{MethodRevenue, ProductRevenue, ReportSummary, StockCounts},
    transactions::models::DateRange,
};
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, reports::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MethodRevenueResponse {
    pub method: String,
    pub transactions: u64,
    pub revenue: u64,
}

impl From<MethodRevenue> for MethodRevenueResponse {
    fn from(entry: MethodRevenue) -> Self {
        Self {
            method: entry.method.label(),
            transactions: entry.transactions,
            revenue: entry.revenue,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductRevenueResponse {
    pub product_id: String,
    pub name: String,
    pub quantity: u64,
    pub revenue: u64,
}

impl From<ProductRevenue> for ProductRevenueResponse {
    fn from(entry: ProductRevenue) -> Self {
        Self {
            product_id: entry.product_id,
            name: entry.name,
            quantity: entry.quantity,
            revenue: entry.revenue,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StockCountsResponse {
    pub in_stock: u64,
    pub low_stock: u64,
    pub out_of_stock: u64,
}

impl From<StockCounts> for StockCountsResponse {
    fn from(counts: StockCounts) -> Self {
        Self {
            in_stock: counts.in_stock,
            low_stock: counts.low_stock,
            out_of_stock: counts.out_of_stock,
        }
    }
}

/// Sales summary over completed transactions. Amounts are pesewas.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReportSummaryResponse {
    pub range: String,
    pub revenue: u64,
    pub transactions: u64,
    pub average_sale: u64,
    pub items_sold: u64,
    pub by_method: Vec<MethodRevenueResponse>,
    pub top_products: Vec<ProductRevenueResponse>,
    pub stock: StockCountsResponse,
}

impl ReportSummaryResponse {
    fn new(range: DateRange, summary: ReportSummary) -> Self {
        Self {
            range: range.label(),
            revenue: summary.revenue,
            transactions: summary.transactions,
            average_sale: summary.average_sale,
            items_sold: summary.items_sold,
            by_method: summary.by_method.into_iter().map(Into::into).collect(),
            top_products: summary.top_products.into_iter().map(Into::into).collect(),
            stock: summary.stock.into(),
        }
    }
}

/// Report Summary Handler
///
/// `range` is `today`, `yesterday`, `last7days` or `all` (default), measured in UTC days up to
/// `at` (default now).
#[endpoint(
    tags("reports"),
    summary = "Sales Summary",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    range: QueryParam<String, false>,
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ReportSummaryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let range = range
        .into_inner()
        .map(|range| parse_label::<DateRange>("range", &range))
        .transpose()?
        .unwrap_or_default();

    let summary = state
        .app
        .reports
        .summary(range, at.into_point_in_time()?)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ReportSummaryResponse::new(range, summary)))
}

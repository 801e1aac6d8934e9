//! Reports service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::domain::{
    products::{ProductsService, models::ProductFilter},
    reports::{
        errors::ReportsServiceError,
        models::{ReportSummary, StockCounts},
    },
    transactions::{
        TransactionsService,
        models::{DateRange, TransactionFilter},
    },
};

pub struct LiveReportsService {
    products: Arc<dyn ProductsService>,
    transactions: Arc<dyn TransactionsService>,
}

impl LiveReportsService {
    #[must_use]
    pub fn new(
        products: Arc<dyn ProductsService>,
        transactions: Arc<dyn TransactionsService>,
    ) -> Self {
        Self {
            products,
            transactions,
        }
    }
}

impl std::fmt::Debug for LiveReportsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveReportsService").finish_non_exhaustive()
    }
}

#[async_trait]
impl ReportsService for LiveReportsService {
    #[tracing::instrument(skip(self))]
    async fn summary(
        &self,
        range: DateRange,
        now: Timestamp,
    ) -> Result<ReportSummary, ReportsServiceError> {
        let transactions = self
            .transactions
            .list_transactions(
                &TransactionFilter {
                    range,
                    ..TransactionFilter::default()
                },
                now,
            )
            .await?;

        let threshold = self.products.low_stock_threshold();

        let products = self
            .products
            .list_products(&ProductFilter::default())
            .await?;

        let stock = StockCounts::tally(products.iter().map(|product| product.status(threshold)));

        Ok(ReportSummary::from_sales(&transactions, stock))
    }
}

#[automock]
#[async_trait]
pub trait ReportsService: Send + Sync {
    /// Sales and stock summary for the dashboard.
    async fn summary(
        &self,
        range: DateRange,
        now: Timestamp,
    ) -> Result<ReportSummary, ReportsServiceError>;
}

#[cfg(test)]
mod tests {
    use fernwood::checkout::PaymentMethod;
    use testresult::TestResult;

    use crate::{
        domain::{
            products::MockProductsService,
            transactions::{
                MockTransactionsService,
                models::{Transaction, TransactionLine, TransactionStatus},
            },
        },
        test::TestContext,
    };

    use super::*;

    fn sale(id: &str, status: TransactionStatus, lines: Vec<TransactionLine>) -> Transaction {
        let total = lines.iter().map(|line| line.total).sum();

        Transaction {
            id: id.to_string(),
            created_at: Timestamp::UNIX_EPOCH,
            cashier: "Cashier User".to_string(),
            cashier_id: None,
            customer: None,
            customer_id: None,
            items: lines.iter().map(|line| line.quantity).sum(),
            lines,
            subtotal: total,
            discount: 0,
            tax: 0,
            total,
            payment_method: PaymentMethod::Card,
            tendered: None,
            change: None,
            status,
        }
    }

    fn line(product_id: &str, quantity: u32, total: u64) -> TransactionLine {
        TransactionLine {
            product_id: product_id.to_string(),
            name: format!("Product {product_id}"),
            sku: format!("SKU-{product_id}"),
            unit_price: total / u64::from(quantity),
            quantity,
            discount: 0,
            total,
        }
    }

    #[tokio::test]
    async fn seeded_summary_counts_completed_sales_and_stock() -> TestResult {
        let ctx = TestContext::new().await?;

        let summary = ctx.reports.summary(DateRange::All, Timestamp::now()).await?;

        assert_eq!(summary.transactions, 3);
        assert_eq!(summary.revenue, 495_049);
        assert_eq!(summary.items_sold, 9);
        assert_eq!(summary.by_method.len(), 4);
        assert_eq!(summary.stock.in_stock, 2);
        assert_eq!(summary.stock.low_stock, 2);
        assert_eq!(summary.stock.out_of_stock, 1);

        Ok(())
    }

    #[tokio::test]
    async fn top_products_rank_by_line_revenue() -> TestResult {
        let mut transactions = MockTransactionsService::new();

        transactions.expect_list_transactions().returning(|_, _| {
            Ok(vec![
                sale(
                    "TXN-1",
                    TransactionStatus::Completed,
                    vec![line("A", 1, 10_000), line("B", 2, 30_000)],
                ),
                sale(
                    "TXN-2",
                    TransactionStatus::Completed,
                    vec![line("A", 3, 30_000)],
                ),
                sale(
                    "TXN-3",
                    TransactionStatus::Refunded,
                    vec![line("C", 1, 90_000)],
                ),
            ])
        });

        let mut products = MockProductsService::new();

        products.expect_low_stock_threshold().return_const(5_u32);
        products
            .expect_list_products()
            .returning(|_| Ok(Vec::new()));

        let service = LiveReportsService::new(Arc::new(products), Arc::new(transactions));

        let summary = service.summary(DateRange::All, Timestamp::now()).await?;

        let ranked: Vec<(&str, u64)> = summary
            .top_products
            .iter()
            .map(|product| (product.product_id.as_str(), product.revenue))
            .collect();

        assert_eq!(ranked, [("A", 40_000), ("B", 30_000)]);
        assert_eq!(summary.revenue, 70_000);
        assert_eq!(summary.average_sale, 35_000);

        let card = summary
            .by_method
            .iter()
            .find(|entry| entry.method == PaymentMethod::Card)
            .map(|entry| entry.transactions);

        assert_eq!(card, Some(2));

        Ok(())
    }
}

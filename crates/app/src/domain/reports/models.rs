//! Report Models

use fernwood::{checkout::PaymentMethod, products::StockStatus};
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::domain::transactions::models::{Transaction, TransactionStatus};

/// Products listed in [`ReportSummary::top_products`].
pub const TOP_PRODUCTS: usize = 5;

/// Revenue taken through one payment method. Amounts are minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MethodRevenue {
    pub method: PaymentMethod,
    pub transactions: u64,
    pub revenue: u64,
}

/// Line revenue for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRevenue {
    pub product_id: String,
    pub name: String,
    pub quantity: u64,
    pub revenue: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StockCounts {
    pub in_stock: u64,
    pub low_stock: u64,
    pub out_of_stock: u64,
}

impl StockCounts {
    pub fn tally(statuses: impl IntoIterator<Item = StockStatus>) -> Self {
        statuses
            .into_iter()
            .fold(Self::default(), |mut counts, status| {
                match status {
                    StockStatus::InStock => counts.in_stock += 1,
                    StockStatus::LowStock => counts.low_stock += 1,
                    StockStatus::OutOfStock => counts.out_of_stock += 1,
                }

                counts
            })
    }
}

/// Dashboard summary over completed sales.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub revenue: u64,
    pub transactions: u64,
    pub average_sale: u64,
    pub items_sold: u64,

    /// Every payment method, in display order
    pub by_method: Vec<MethodRevenue>,

    /// Best sellers by line revenue, highest first
    pub top_products: Vec<ProductRevenue>,

    pub stock: StockCounts,
}

impl ReportSummary {
    /// Summarise sales. Refunded and pending transactions are left out.
    pub fn from_sales<'a>(
        transactions: impl IntoIterator<Item = &'a Transaction>,
        stock: StockCounts,
    ) -> Self {
        let mut summary = Self {
            by_method: PaymentMethod::ALL
                .into_iter()
                .map(|method| MethodRevenue {
                    method,
                    transactions: 0,
                    revenue: 0,
                })
                .collect(),
            stock,
            ..Self::default()
        };

        let mut products: FxHashMap<&str, ProductRevenue> = FxHashMap::default();

        for transaction in transactions
            .into_iter()
            .filter(|transaction| transaction.status == TransactionStatus::Completed)
        {
            summary.revenue = summary.revenue.saturating_add(transaction.total);
            summary.transactions += 1;
            summary.items_sold = summary
                .items_sold
                .saturating_add(u64::from(transaction.items));

            if let Some(entry) = summary
                .by_method
                .iter_mut()
                .find(|entry| entry.method == transaction.payment_method)
            {
                entry.transactions += 1;
                entry.revenue = entry.revenue.saturating_add(transaction.total);
            }

            for line in &transaction.lines {
                let entry = products
                    .entry(line.product_id.as_str())
                    .or_insert_with(|| ProductRevenue {
                        product_id: line.product_id.clone(),
                        name: line.name.clone(),
                        quantity: 0,
                        revenue: 0,
                    });

                entry.quantity = entry.quantity.saturating_add(u64::from(line.quantity));
                entry.revenue = entry.revenue.saturating_add(line.total);
            }
        }

        if summary.transactions > 0 {
            summary.average_sale = summary
                .revenue
                .saturating_add(summary.transactions / 2)
                / summary.transactions;
        }

        let mut top: Vec<ProductRevenue> = products.into_values().collect();

        top.sort_by(|a, b| {
            b.revenue
                .cmp(&a.revenue)
                .then_with(|| a.product_id.cmp(&b.product_id))
        });
        top.truncate(TOP_PRODUCTS);

        summary.top_products = top;

        summary
    }
}

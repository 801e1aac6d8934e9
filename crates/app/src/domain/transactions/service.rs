//! Transactions service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tokio::sync::RwLock;
use tracing::info;

use crate::{
    domain::{
        next_sequence_id,
        transactions::{
            errors::TransactionsServiceError,
            models::{
                NewTransaction, Transaction, TransactionFilter, TransactionStatus,
                TransactionSummary,
            },
        },
    },
    listing::{matches_any, search_needle},
};

#[derive(Debug, Default)]
pub struct InMemoryTransactionsService {
    transactions: RwLock<Vec<Transaction>>,
}

impl InMemoryTransactionsService {
    #[must_use]
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: RwLock::new(transactions),
        }
    }
}

#[async_trait]
impl TransactionsService for InMemoryTransactionsService {
    async fn list_transactions(
        &self,
        filter: &TransactionFilter,
        now: Timestamp,
    ) -> Result<Vec<Transaction>, TransactionsServiceError> {
        let needle = search_needle(filter.search.as_deref());

        let mut transactions: Vec<Transaction> = self
            .transactions
            .read()
            .await
            .iter()
            .filter(|transaction| {
                matches_any(
                    needle.as_deref(),
                    &[
                        transaction.id.as_str(),
                        transaction.customer.as_deref().unwrap_or_default(),
                    ],
                )
            })
            .filter(|transaction| filter.range.contains(transaction.created_at, now))
            .filter(|transaction| {
                filter
                    .method
                    .is_none_or(|method| transaction.payment_method == method)
            })
            .filter(|transaction| {
                filter
                    .status
                    .is_none_or(|status| transaction.status == status)
            })
            .cloned()
            .collect();

        transactions.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(transactions)
    }

    async fn get_transaction(&self, id: &str) -> Result<Transaction, TransactionsServiceError> {
        self.transactions
            .read()
            .await
            .iter()
            .find(|transaction| transaction.id.eq_ignore_ascii_case(id))
            .cloned()
            .ok_or(TransactionsServiceError::NotFound)
    }

    #[tracing::instrument(skip(self, sale), fields(method = %sale.payment_method))]
    async fn record_transaction(
        &self,
        sale: NewTransaction,
    ) -> Result<Transaction, TransactionsServiceError> {
        if sale.lines.is_empty() {
            return Err(TransactionsServiceError::NoLines);
        }

        let mut transactions = self.transactions.write().await;

        let items = sale
            .lines
            .iter()
            .fold(0_u32, |count, line| count.saturating_add(line.quantity));

        let recorded = Transaction {
            id: next_sequence_id(
                "TXN-",
                4,
                transactions.iter().map(|transaction| transaction.id.as_str()),
            ),
            created_at: Timestamp::now(),
            cashier: sale.cashier,
            cashier_id: sale.cashier_id,
            customer: sale.customer,
            customer_id: sale.customer_id,
            lines: sale.lines,
            items,
            subtotal: sale.subtotal,
            discount: sale.discount,
            tax: sale.tax,
            total: sale.total,
            payment_method: sale.payment_method,
            tendered: sale.tendered,
            change: sale.change,
            status: TransactionStatus::Completed,
        };

        transactions.push(recorded.clone());

        info!(transaction = %recorded.id, total = recorded.total, "transaction recorded");

        Ok(recorded)
    }

    #[tracing::instrument(skip(self))]
    async fn mark_refunded(&self, id: &str) -> Result<Transaction, TransactionsServiceError> {
        let mut transactions = self.transactions.write().await;

        let transaction = transactions
            .iter_mut()
            .find(|transaction| transaction.id.eq_ignore_ascii_case(id))
            .ok_or(TransactionsServiceError::NotFound)?;

        if transaction.status != TransactionStatus::Completed {
            return Err(TransactionsServiceError::NotRefundable(transaction.status));
        }

        transaction.status = TransactionStatus::Refunded;

        info!("transaction refunded");

        Ok(transaction.clone())
    }

    async fn summary(
        &self,
        filter: &TransactionFilter,
        now: Timestamp,
    ) -> Result<TransactionSummary, TransactionsServiceError> {
        let transactions = self.list_transactions(filter, now).await?;

        Ok(TransactionSummary::from_transactions(&transactions))
    }
}

#[automock]
#[async_trait]
pub trait TransactionsService: Send + Sync {
    /// Transactions matching the filter, newest first. Date ranges end on the UTC day of `now`.
    async fn list_transactions(
        &self,
        filter: &TransactionFilter,
        now: Timestamp,
    ) -> Result<Vec<Transaction>, TransactionsServiceError>;

    async fn get_transaction(&self, id: &str) -> Result<Transaction, TransactionsServiceError>;

    /// Store a settled sale as a completed transaction with the next `TXN-` id.
    async fn record_transaction(
        &self,
        sale: NewTransaction,
    ) -> Result<Transaction, TransactionsServiceError>;

    /// Flip a completed transaction to refunded. Anything else is rejected.
    async fn mark_refunded(&self, id: &str) -> Result<Transaction, TransactionsServiceError>;

    /// Totals over the completed transactions matching the filter.
    async fn summary(
        &self,
        filter: &TransactionFilter,
        now: Timestamp,
    ) -> Result<TransactionSummary, TransactionsServiceError>;
}

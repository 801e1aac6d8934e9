//! Returns service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tokio::sync::RwLock;
use tracing::info;

use crate::domain::{
    next_sequence_id,
    returns::{
        errors::ReturnsServiceError,
        models::{NewReturn, ReturnRecord},
    },
    transactions::TransactionsService,
};

pub struct InMemoryReturnsService {
    returns: RwLock<Vec<ReturnRecord>>,
    transactions: Arc<dyn TransactionsService>,
}

impl InMemoryReturnsService {
    #[must_use]
    pub fn new(transactions: Arc<dyn TransactionsService>) -> Self {
        Self {
            returns: RwLock::new(Vec::new()),
            transactions,
        }
    }
}

impl std::fmt::Debug for InMemoryReturnsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryReturnsService")
            .field("returns", &self.returns)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ReturnsService for InMemoryReturnsService {
    async fn list_returns(&self) -> Result<Vec<ReturnRecord>, ReturnsServiceError> {
        let mut returns = self.returns.read().await.clone();

        returns.reverse();

        Ok(returns)
    }

    #[tracing::instrument(skip(self, request), fields(transaction = %request.transaction_id))]
    async fn process_return(
        &self,
        request: NewReturn,
        processed_by: &str,
    ) -> Result<ReturnRecord, ReturnsServiceError> {
        let transaction_id = request.transaction_id.trim();

        if transaction_id.is_empty() {
            return Err(ReturnsServiceError::MissingTransactionId);
        }

        let mut returns = self.returns.write().await;

        let refunded = self.transactions.mark_refunded(transaction_id).await?;

        let record = ReturnRecord {
            id: next_sequence_id("RET-", 4, returns.iter().map(|record| record.id.as_str())),
            transaction_id: refunded.id,
            amount: refunded.total,
            items: refunded.items,
            reason: request.reason.trim().to_string(),
            processed_by: processed_by.to_string(),
            created_at: Timestamp::now(),
        };

        returns.push(record.clone());

        info!(refund = %record.id, amount = record.amount, "return processed");

        Ok(record)
    }
}

#[automock]
#[async_trait]
pub trait ReturnsService: Send + Sync {
    /// Processed returns, newest first.
    async fn list_returns(&self) -> Result<Vec<ReturnRecord>, ReturnsServiceError>;

    /// Refund a completed transaction in full.
    async fn process_return(
        &self,
        request: NewReturn,
        processed_by: &str,
    ) -> Result<ReturnRecord, ReturnsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::transactions::{
            MockTransactionsService, TransactionsServiceError, models::TransactionStatus,
        },
        test::TestContext,
    };

    use super::*;

    fn request(id: &str) -> NewReturn {
        NewReturn {
            transaction_id: id.to_string(),
            reason: "Damaged in delivery".to_string(),
        }
    }

    #[tokio::test]
    async fn process_return_refunds_the_sale() -> TestResult {
        let ctx = TestContext::new().await?;

        let record = ctx
            .returns
            .process_return(request("txn-1004"), "Cashier User")
            .await?;

        assert_eq!(record.id, "RET-0001");
        assert_eq!(record.transaction_id, "TXN-1004");
        assert_eq!(record.amount, 24_999);

        let transaction = ctx.transactions.get_transaction("TXN-1004").await?;

        assert_eq!(transaction.status, TransactionStatus::Refunded);
        assert_eq!(ctx.returns.list_returns().await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn already_refunded_sales_are_rejected() -> TestResult {
        let ctx = TestContext::new().await?;

        let result = ctx
            .returns
            .process_return(request("TXN-1003"), "Cashier User")
            .await;

        assert!(matches!(
            result,
            Err(ReturnsServiceError::Transactions(
                TransactionsServiceError::NotRefundable(TransactionStatus::Refunded)
            ))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn blank_id_is_rejected_before_lookup() -> TestResult {
        let mut transactions = MockTransactionsService::new();

        transactions.expect_mark_refunded().never();

        let service = InMemoryReturnsService::new(Arc::new(transactions));

        let result = service.process_return(request("  "), "Cashier User").await;

        assert!(matches!(result, Err(ReturnsServiceError::MissingTransactionId)));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_transaction_is_not_found() -> TestResult {
        let ctx = TestContext::new().await?;

        let result = ctx
            .returns
            .process_return(request("12345"), "Cashier User")
            .await;

        assert!(matches!(
            result,
            Err(ReturnsServiceError::Transactions(TransactionsServiceError::NotFound))
        ));
        assert!(ctx.returns.list_returns().await?.is_empty());

        Ok(())
    }
}

//! Transaction Handlers

use fernwood_app::domain::transactions::models::{Transaction, TransactionLine};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::extensions::*;

pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod summary;

/// One product on a sale. Amounts are pesewas.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TransactionLineResponse {
    pub product_id: String,
    pub name: String,
    pub sku: String,
    pub unit_price: u64,
    pub quantity: u32,
    pub discount: u64,
    pub total: u64,
}

impl From<TransactionLine> for TransactionLineResponse {
    fn from(line: TransactionLine) -> Self {
        Self {
            product_id: line.product_id,
            name: line.name,
            sku: line.sku,
            unit_price: line.unit_price,
            quantity: line.quantity,
            discount: line.discount,
            total: line.total,
        }
    }
}

/// Recorded sale. Amounts are pesewas.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TransactionResponse {
    /// e.g. `TXN-1001`
    pub id: String,

    pub created_at: String,
    pub cashier: String,
    pub cashier_id: Option<Uuid>,
    pub customer: Option<String>,
    pub customer_id: Option<String>,
    pub lines: Vec<TransactionLineResponse>,
    pub items: u32,
    pub subtotal: u64,
    pub discount: u64,
    pub tax: u64,
    pub total: u64,

    /// `cash`, `card`, `mobile_money` or `bank_transfer`
    pub payment_method: String,

    pub tendered: Option<u64>,
    pub change: Option<u64>,

    /// `completed`, `refunded` or `pending`
    pub status: String,
}

impl From<Transaction> for TransactionResponse {
    fn from(transaction: Transaction) -> Self {
        Self {
            created_at: transaction.created_at.to_string(),
            cashier_id: transaction.cashier_id.map(Into::into),
            payment_method: transaction.payment_method.label(),
            status: transaction.status.as_str().to_string(),
            lines: transaction.lines.into_iter().map(Into::into).collect(),
            id: transaction.id,
            cashier: transaction.cashier,
            customer: transaction.customer,
            customer_id: transaction.customer_id,
            items: transaction.items,
            subtotal: transaction.subtotal,
            discount: transaction.discount,
            tax: transaction.tax,
            total: transaction.total,
            tendered: transaction.tendered,
            change: transaction.change,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use fernwood::checkout::PaymentMethod;
    use fernwood_app::domain::transactions::models::{
        Transaction, TransactionLine, TransactionStatus,
    };
    use jiff::Timestamp;

    pub(crate) fn make_transaction(id: &str, status: TransactionStatus) -> Transaction {
        Transaction {
            id: id.to_string(),
            created_at: Timestamp::UNIX_EPOCH,
            cashier: "Cashier User".to_string(),
            cashier_id: None,
            customer: Some("John Smith".to_string()),
            customer_id: Some("1".to_string()),
            lines: vec![TransactionLine {
                product_id: "PROD-000001".to_string(),
                name: "Modern Sofa Set".to_string(),
                sku: "SOFA-001".to_string(),
                unit_price: 10_000,
                quantity: 1,
                discount: 1_000,
                total: 9_000,
            }],
            items: 1,
            subtotal: 10_000,
            discount: 1_000,
            tax: 1_350,
            total: 10_350,
            payment_method: PaymentMethod::Cash,
            tendered: Some(20_000),
            change: Some(9_650),
            status,
        }
    }
}

//! Return Handlers

use fernwood_app::domain::returns::models::ReturnRecord;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

pub(crate) mod create;
pub(crate) mod index;

/// Refund issued against a sale
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReturnResponse {
    /// e.g. `RET-0001`
    pub id: String,

    pub transaction_id: String,

    /// Refunded amount in pesewas
    pub amount: u64,

    pub items: u32,
    pub reason: String,
    pub processed_by: String,
    pub created_at: String,
}

impl From<ReturnRecord> for ReturnResponse {
    fn from(record: ReturnRecord) -> Self {
        Self {
            created_at: record.created_at.to_string(),
            id: record.id,
            transaction_id: record.transaction_id,
            amount: record.amount,
            items: record.items,
            reason: record.reason,
            processed_by: record.processed_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use fernwood_app::domain::returns::models::ReturnRecord;
    use jiff::Timestamp;

    pub(super) fn make_return(id: &str, transaction_id: &str) -> ReturnRecord {
        ReturnRecord {
            id: id.to_string(),
            transaction_id: transaction_id.to_string(),
            amount: 10_350,
            items: 1,
            reason: "Damaged on delivery".to_string(),
            processed_by: "Cashier User".to_string(),
            created_at: Timestamp::UNIX_EPOCH,
        }
    }
}

//! Return Models

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Refund issued against a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnRecord {
    /// `RET-0001` style identifier
    pub id: String,
    pub transaction_id: String,

    /// Refunded amount in minor units
    pub amount: u64,

    pub items: u32,
    pub reason: String,
    pub processed_by: String,
    pub created_at: Timestamp,
}

/// Return request as entered at the till.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewReturn {
    pub transaction_id: String,

    #[serde(default)]
    pub reason: String,
}

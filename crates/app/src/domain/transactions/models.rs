//! Transaction Models

use std::fmt;

use fernwood::checkout::PaymentMethod;
use jiff::{Timestamp, ToSpan, civil::Date, tz::TimeZone};
use serde::{Deserialize, Serialize};

use crate::domain::users::models::UserUuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Completed,
    Refunded,
    Pending,
}

impl TransactionStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Refunded => "refunded",
            Self::Pending => "pending",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One product on a recorded sale. Amounts are minor units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionLine {
    pub product_id: String,
    pub name: String,
    pub sku: String,
    pub unit_price: u64,
    pub quantity: u32,
    pub discount: u64,
    pub total: u64,
}

/// Transaction Model
///
/// Amounts are minor units, and `total == subtotal - discount + tax`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// `TXN-1001` style identifier
    pub id: String,
    pub created_at: Timestamp,

    /// Cashier display name
    pub cashier: String,

    #[serde(default)]
    pub cashier_id: Option<UserUuid>,

    #[serde(default)]
    pub customer: Option<String>,

    #[serde(default)]
    pub customer_id: Option<String>,

    #[serde(default)]
    pub lines: Vec<TransactionLine>,

    /// Units sold
    pub items: u32,

    pub subtotal: u64,
    pub discount: u64,
    pub tax: u64,
    pub total: u64,
    pub payment_method: PaymentMethod,

    #[serde(default)]
    pub tendered: Option<u64>,

    #[serde(default)]
    pub change: Option<u64>,

    pub status: TransactionStatus,
}

/// Settled sale handed over by the till.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub cashier: String,
    pub cashier_id: Option<UserUuid>,
    pub customer: Option<String>,
    pub customer_id: Option<String>,
    pub lines: Vec<TransactionLine>,
    pub subtotal: u64,
    pub discount: u64,
    pub tax: u64,
    pub total: u64,
    pub payment_method: PaymentMethod,
    pub tendered: Option<u64>,
    pub change: Option<u64>,
}

/// Day window relative to a point in time, in UTC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRange {
    Today,
    Yesterday,
    #[serde(rename = "last7days", alias = "last_7_days")]
    Last7Days,
    #[default]
    All,
}

impl DateRange {
    /// Whether `at` falls in the window ending on the day of `now`.
    #[must_use]
    pub fn contains(self, at: Timestamp, now: Timestamp) -> bool {
        let today = utc_date(now);
        let day = utc_date(at);

        match self {
            Self::Today => day == today,
            Self::Yesterday => day == today.saturating_sub(1.day()),
            Self::Last7Days => day > today.saturating_sub(7.days()) && day <= today,
            Self::All => true,
        }
    }
}

fn utc_date(at: Timestamp) -> Date {
    at.to_zoned(TimeZone::UTC).date()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Matched against transaction id and customer name
    pub search: Option<String>,
    pub range: DateRange,
    pub method: Option<PaymentMethod>,
    pub status: Option<TransactionStatus>,
}

/// Completed sales at a glance. Amounts are minor units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TransactionSummary {
    pub total: u64,
    pub count: u64,

    /// Rounded half up
    pub average: u64,
}

impl TransactionSummary {
    /// Summarise the completed transactions in `transactions`.
    pub fn from_transactions<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        let (total, count) = transactions
            .into_iter()
            .filter(|transaction| transaction.status == TransactionStatus::Completed)
            .fold((0_u64, 0_u64), |(total, count), transaction| {
                (total.saturating_add(transaction.total), count + 1)
            });

        let average = if count == 0 {
            0
        } else {
            total.saturating_add(count / 2) / count
        };

        Self {
            total,
            count,
            average,
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn date_ranges_use_utc_days() -> TestResult {
        let now: Timestamp = "2023-06-15T09:00:00Z".parse()?;
        let late_yesterday: Timestamp = "2023-06-14T23:59:59Z".parse()?;
        let week_ago: Timestamp = "2023-06-08T12:00:00Z".parse()?;
        let six_days_ago: Timestamp = "2023-06-09T00:00:00Z".parse()?;

        assert!(DateRange::Today.contains(now, now));
        assert!(!DateRange::Today.contains(late_yesterday, now));
        assert!(DateRange::Yesterday.contains(late_yesterday, now));
        assert!(DateRange::Last7Days.contains(six_days_ago, now));
        assert!(!DateRange::Last7Days.contains(week_ago, now));
        assert!(DateRange::All.contains(week_ago, now));

        Ok(())
    }

    #[test]
    fn date_range_parses_from_query_labels() -> TestResult {
        let range: DateRange = serde_json::from_str("\"last7days\"")?;

        assert_eq!(range, DateRange::Last7Days);

        Ok(())
    }
}

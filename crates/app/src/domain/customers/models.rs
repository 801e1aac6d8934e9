//! Customer Models

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Minor units spent per loyalty point earned.
pub const MINOR_UNITS_PER_POINT: u64 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerStatus {
    Active,
    Inactive,
    Vip,
    #[default]
    New,
}

/// Customer Model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,

    /// Completed purchases
    pub orders: u32,

    /// Lifetime spend in minor units
    pub total_spent: u64,

    #[serde(default)]
    pub loyalty_points: u64,

    #[serde(default)]
    pub last_purchase: Option<Date>,

    pub status: CustomerStatus,
}

/// New Customer Model
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub status: CustomerStatus,
}

/// Customer Update Model
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<CustomerStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerFilter {
    /// Matched against name, email and phone
    pub search: Option<String>,
    pub status: Option<CustomerStatus>,
}

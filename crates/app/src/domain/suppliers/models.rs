//! Supplier Models

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplierStatus {
    #[default]
    Active,
    Inactive,
}

/// Supplier Model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    /// `SUP-001` style identifier
    pub id: String,
    pub name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub address: String,

    /// Products sourced from this supplier
    pub products: u32,

    pub status: SupplierStatus,

    #[serde(default)]
    pub last_order: Option<Date>,
}

/// New Supplier Model
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewSupplier {
    pub name: String,

    #[serde(default)]
    pub contact_person: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub status: SupplierStatus,
}

/// Supplier Update Model
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SupplierUpdate {
    pub name: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub products: Option<u32>,
    pub status: Option<SupplierStatus>,
    pub last_order: Option<Date>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplierFilter {
    /// Matched against name, contact person, email and phone
    pub search: Option<String>,
    pub status: Option<SupplierStatus>,
}

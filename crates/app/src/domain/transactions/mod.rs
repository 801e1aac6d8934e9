//! Till Transactions

pub mod errors;
pub mod models;
pub mod service;

pub use errors::TransactionsServiceError;
pub use service::*;

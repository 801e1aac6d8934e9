//! Suppliers

pub mod errors;
pub mod models;
pub mod service;

pub use errors::SuppliersServiceError;
pub use service::*;

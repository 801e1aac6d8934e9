//! Returns and refunds

pub mod errors;
pub mod models;
pub mod service;

pub use errors::ReturnsServiceError;
pub use service::*;

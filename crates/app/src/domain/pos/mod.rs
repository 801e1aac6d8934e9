//! Point of sale
//!
//! One register per signed-in cashier, holding the cart being rung up and the checkout once
//! payment starts. The cart is locked while a checkout is open.

pub mod errors;
pub mod models;
pub mod service;

pub use errors::PosServiceError;
pub use service::*;

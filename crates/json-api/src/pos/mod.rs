//! Point of Sale
//!
//! The till: one register per signed in cashier, holding a cart and at most one open checkout.

mod errors;
mod handlers;

pub(crate) use handlers::*;

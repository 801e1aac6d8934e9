//! Fernwood
//!
//! Fernwood is the point-of-sale pricing engine behind the Fernwood furniture back office. It
//! covers catalog lookup, the cart store, line and cart discounts, tax, payment settlement and
//! receipts, with every amount held in integer minor units.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod discounts;
pub mod fixtures;
pub mod money;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod receipt;

//! Checkout Handlers
//!
//! Begin, choose a method, tender cash, then process. Cancelling unlocks the cart.

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod method;
pub(crate) mod process;
pub(crate) mod tender;

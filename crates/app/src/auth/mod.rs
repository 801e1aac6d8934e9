//! Authentication
//!
//! Email and password login issuing opaque bearer session tokens. Navigation filtering lives here
//! too, but it only shapes the UI; the HTTP layer enforces roles on every request.

mod errors;
mod models;
mod navigation;
mod service;
mod token;

pub use errors::*;
pub use models::*;
pub use navigation::*;
pub use service::*;
pub use token::*;

//! Store Settings

mod errors;
mod handlers;

pub(crate) use handlers::*;

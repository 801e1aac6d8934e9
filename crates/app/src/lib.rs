//! Back-office services for the Fernwood furniture store.
//!
//! Every resource sits behind an async service trait with an in-memory implementation, so the
//! HTTP layer and the tests can swap in mocks.

pub mod auth;
pub mod context;
pub mod domain;
pub mod listing;
pub mod persistence;
pub mod seed;
pub mod uuids;

#[cfg(test)]
mod test;

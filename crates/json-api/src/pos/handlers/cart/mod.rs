//! Register Cart Handlers

pub(crate) mod clear;
pub(crate) mod get;

//! Command implementations for the spec-client CLI.

pub mod call;
pub mod operations;
pub mod spec_url;

//! Domain layer for spec-client
//!
//! Request/response values, the parsed spec model and the ports that
//! infrastructure adapters implement.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{ClientError, SpecError};

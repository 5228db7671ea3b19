//! Infrastructure layer module
//!
//! This module contains all infrastructure adapters and external integrations:
//! - reqwest HTTP transport and spec fetcher
//! - Configuration management
//! - Logging infrastructure
//! - Cookie string parsing
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod config;
pub mod cookie;
pub mod http;
pub mod logging;

pub use config::{ConfigError, ConfigLoader};
pub use cookie::read_cookie;
pub use http::{HttpSpecFetcher, ReqwestTransport};
pub use logging::LoggerImpl;

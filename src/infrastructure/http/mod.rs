//! reqwest-backed adapters for the HTTP ports
//!
//! Both adapters share one connection pool when built from the same
//! `reqwest::Client`.

pub mod spec_fetcher;
pub mod transport;

pub use spec_fetcher::HttpSpecFetcher;
pub use transport::{build_http_client, ReqwestTransport};

//! Port trait definitions (Hexagonal Architecture)
//!
//! - RequestInterceptor: rewrites every outgoing request before it is sent
//! - HttpTransport: sends a built request and returns the response
//! - SpecSource: retrieves spec document text from a URL
//!
//! The reqwest-backed adapters live in `infrastructure::http`.

pub mod interceptor;
pub mod spec_source;
pub mod transport;

pub use interceptor::RequestInterceptor;
pub use spec_source::SpecSource;
pub use transport::HttpTransport;

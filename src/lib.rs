//! spec-client - OpenAPI/Swagger driven HTTP client with CSRF protection
//!
//! Fetches an API description, builds a generic client from it and attaches
//! an `X-CSRFToken` header to every request whose method can change server
//! state.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): request/response values, the parsed spec model and ports
//! - **Service Layer** (`services`): CSRF attachment, client construction, memoized accessor
//! - **Infrastructure Layer** (`infrastructure`): reqwest adapters, configuration, logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```no_run
//! use spec_client::{get_client_from_spec, CsrfToken, OperationParams};
//!
//! # async fn run() -> Result<(), spec_client::ClientError> {
//! let client = get_client_from_spec(
//!     "https://example.com/docs?format=openapi",
//!     CsrfToken::new("token-from-cookie"),
//! )
//! .await?;
//! let params = OperationParams::new().with_body(serde_json::json!({"name": "rex"}));
//! let response = client.execute("createPet", &params).await?;
//! println!("{}", response.status);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    ApiResponse, ApiSpec, Config, CsrfToken, Operation, OperationParams, OutgoingRequest,
};
pub use domain::ports::{HttpTransport, RequestInterceptor, SpecSource};
pub use domain::{ClientError, SpecError};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{
    attach_csrf, get_client, get_client_from_spec, make_client, resolve_spec_url, ApiClient,
    ClientAccessor, ClientFactory,
};

pub mod config;
pub mod request;
pub mod spec;
pub mod token;

pub use config::{Config, CsrfConfig, HttpConfig, LogFormat, LoggingConfig, PageConfig, RotationPolicy};
pub use request::{ApiResponse, OperationParams, OutgoingRequest};
pub use spec::{ApiSpec, Operation, Parameter, ParameterLocation, SpecVersion, DEFAULT_TAG};
pub use token::CsrfToken;

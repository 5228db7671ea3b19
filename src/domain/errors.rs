//! Domain errors for spec-client.

use thiserror::Error;

/// Errors raised while turning spec text into an [`ApiSpec`](super::models::ApiSpec).
#[derive(Debug, Error)]
pub enum SpecError {
    #[error("Spec document is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Spec document must be a JSON object")]
    NotAnObject,

    #[error("Spec document declares neither `swagger` nor `openapi` version")]
    MissingVersion,

    #[error("Unsupported spec version: {0}")]
    UnsupportedVersion(String),

    #[error("Invalid `paths` section: {0}")]
    InvalidPaths(String),

    #[error("Invalid operation {method} {path}: {reason}")]
    InvalidOperation {
        method: String,
        path: String,
        reason: String,
    },

    #[error("Duplicate operationId: {0}")]
    DuplicateOperationId(String),

    #[error("Unresolvable reference: {0}")]
    UnresolvedReference(String),
}

/// Errors surfaced by client construction, the spec fetch and operation calls.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or transport failure (spec fetch or operation call)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Spec response body was not JSON
    #[error("Spec response is not valid JSON: {0}")]
    SpecParse(#[source] serde_json::Error),

    /// Spec document failed structural validation
    #[error("Failed to build client from spec: {0}")]
    Spec(#[from] SpecError),

    #[error("Invalid URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Missing required parameter `{parameter}` for operation {operation}")]
    MissingParameter { operation: String, parameter: String },

    #[error("Parameter `{parameter}` uses unsupported location `{location}`")]
    UnsupportedParameter { parameter: String, location: String },

    #[error("Invalid header `{0}`")]
    InvalidHeader(String),

    #[error("Spec does not declare an absolute server URL and no spec location is known")]
    UnresolvedBaseUrl,

    #[error("Request failed with status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    pub(crate) fn invalid_url(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Returns true if the error originated while loading or parsing the spec
    pub const fn is_spec_error(&self) -> bool {
        matches!(self, Self::SpecParse(_) | Self::Spec(_))
    }
}

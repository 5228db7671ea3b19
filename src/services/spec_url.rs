//! Resolution of the spec document URL from the page location.

use reqwest::Url;

use crate::domain::errors::ClientError;

/// Path used when no `swagger_url` override is configured
pub const DEFAULT_SPEC_PATH: &str = "/docs?format=openapi";

/// Protocol and host of the page the client acts on behalf of
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    /// Scheme including the trailing colon, e.g. `https:`
    pub protocol: String,
    /// Host including a non-default port, e.g. `example.com:8443`
    pub host: String,
}

impl PageLocation {
    pub fn new(protocol: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
            host: host.into(),
        }
    }

    /// Derives protocol and host from an origin such as `https://example.com:8443`
    pub fn from_origin(origin: &str) -> Result<Self, ClientError> {
        let url = Url::parse(origin).map_err(|e| ClientError::invalid_url(origin, e))?;
        let host = url
            .host_str()
            .ok_or_else(|| ClientError::invalid_url(origin, "origin has no host"))?;
        let host = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };
        Ok(Self::new(format!("{}:", url.scheme()), host))
    }

    pub fn spec_url(&self, configured_path: Option<&str>) -> String {
        resolve_spec_url(&self.protocol, &self.host, configured_path)
    }
}

/// Builds `{protocol}//{host}{path}`
///
/// An absent or empty `configured_path` falls back to [`DEFAULT_SPEC_PATH`].
/// A configured path is used verbatim, query string included.
pub fn resolve_spec_url(protocol: &str, host: &str, configured_path: Option<&str>) -> String {
    let path = configured_path
        .filter(|p| !p.is_empty())
        .unwrap_or(DEFAULT_SPEC_PATH);
    format!("{protocol}//{host}{path}")
}

//! Process-wide inputs for the memoized client: spec URL and CSRF token.

use tracing::warn;

use crate::domain::errors::ClientError;
use crate::domain::models::{Config, CsrfToken, HttpConfig};
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::cookie::read_cookie;
use crate::services::spec_url::PageLocation;

#[derive(Debug, Clone)]
pub struct ProcessSettings {
    pub spec_url: String,
    pub token: CsrfToken,
    pub http: HttpConfig,
}

impl ProcessSettings {
    /// Resolves the spec URL and reads the CSRF token from the configured cookie string
    ///
    /// A missing cookie yields an empty token rather than an error.
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        let location = PageLocation::from_origin(&config.page.origin)?;
        let spec_url = location.spec_url(config.page.swagger_url.as_deref());

        let cookie_name = &config.csrf.cookie_name;
        let token = config
            .page
            .cookie
            .as_deref()
            .and_then(|cookies| read_cookie(cookies, cookie_name))
            .map_or_else(
                || {
                    warn!(cookie = %cookie_name, "CSRF cookie not found; using an empty token");
                    CsrfToken::default()
                },
                CsrfToken::from,
            );

        Ok(Self {
            spec_url,
            token,
            http: config.http.clone(),
        })
    }

    /// Loads configuration from the working directory and environment
    pub fn load() -> Result<Self, ClientError> {
        let config =
            ConfigLoader::load().map_err(|e| ClientError::Configuration(format!("{e:#}")))?;
        Self::from_config(&config)
    }
}

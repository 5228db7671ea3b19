use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use reqwest::Url;
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Directory holding project configuration files
pub const CONFIG_DIR: &str = ".spec-client";

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "SPEC_CLIENT_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid origin: {0}. Must be an absolute http(s) URL with a host")]
    InvalidOrigin(String),

    #[error("Invalid swagger_url: {0}. Must start with '/'")]
    InvalidSwaggerUrl(String),

    #[error("Invalid cookie name: {0:?}. Must be non-empty without '=' or ';'")]
    InvalidCookieName(String),

    #[error("Invalid timeout_secs: 0. Leave unset to disable the timeout")]
    InvalidTimeout,

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .spec-client/config.yaml
    /// 3. .spec-client/local.yaml (optional local overrides)
    /// 4. Environment variables (SPEC_CLIENT_* prefix, `__` separates nested keys)
    pub fn load() -> Result<Config> {
        Self::load_from_dir(Path::new("."))
    }

    /// Same as [`load`](Self::load) with `dir` in place of the working directory
    pub fn load_from_dir(dir: &Path) -> Result<Config> {
        let config_dir = dir.join(CONFIG_DIR);
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(config_dir.join("config.yaml")))
            .merge(Yaml::file(config_dir.join("local.yaml")))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let origin_ok = Url::parse(&config.page.origin).is_ok_and(|url| {
            matches!(url.scheme(), "http" | "https") && url.host_str().is_some()
        });
        if !origin_ok {
            return Err(ConfigError::InvalidOrigin(config.page.origin.clone()));
        }

        if let Some(path) = config.page.swagger_url.as_deref() {
            if !path.is_empty() && !path.starts_with('/') {
                return Err(ConfigError::InvalidSwaggerUrl(path.to_string()));
            }
        }

        let name = &config.csrf.cookie_name;
        if name.trim().is_empty() || name.contains(['=', ';']) {
            return Err(ConfigError::InvalidCookieName(name.clone()));
        }

        if config.http.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidTimeout);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        Ok(())
    }
}

//! Implementation of the `spec-client spec-url` command.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::services::settings::ProcessSettings;

#[derive(Debug, Serialize)]
pub struct SpecUrlOutput {
    pub spec_url: String,
    pub cookie_name: String,
    pub token_present: bool,
}

impl CommandOutput for SpecUrlOutput {
    fn to_human(&self) -> String {
        let token = if self.token_present { "found" } else { "missing" };
        format!(
            "Spec URL:    {}\nCSRF cookie: {} ({token})",
            self.spec_url, self.cookie_name
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(config: &Config, json_mode: bool) -> Result<()> {
    let settings =
        ProcessSettings::from_config(config).context("Failed to resolve spec URL")?;

    let output_data = SpecUrlOutput {
        spec_url: settings.spec_url,
        cookie_name: config.csrf.cookie_name.clone(),
        token_present: !settings.token.is_empty(),
    };
    output(&output_data, json_mode);
    Ok(())
}

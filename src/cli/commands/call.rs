//! Implementation of the `spec-client call` command.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use serde_json::Value;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{ApiResponse, OperationParams};
use crate::services::get_client;

#[derive(Args, Debug)]
pub struct CallArgs {
    /// Operation id to invoke
    pub operation_id: String,

    /// Parameter as name=value; values that parse as JSON are sent as JSON
    #[arg(short = 'p', long = "param", value_parser = parse_param)]
    pub params: Vec<(String, Value)>,

    /// JSON request body
    #[arg(long)]
    pub body: Option<String>,
}

fn parse_param(raw: &str) -> Result<(String, Value), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got `{raw}`"))?;
    if name.is_empty() {
        return Err(format!("parameter name missing in `{raw}`"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((name.to_string(), value))
}

#[derive(Debug, Serialize)]
pub struct CallOutput {
    pub operation_id: String,
    #[serde(flatten)]
    pub response: ApiResponse,
}

impl CommandOutput for CallOutput {
    fn to_human(&self) -> String {
        let body = match &self.response.body {
            Value::Null => String::new(),
            Value::String(text) => text.clone(),
            other => serde_json::to_string_pretty(other).unwrap_or_default(),
        };
        format!("{} -> HTTP {}\n{body}", self.operation_id, self.response.status)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: CallArgs, json_mode: bool) -> Result<()> {
    let mut params = OperationParams::new();
    for (name, value) in args.params {
        params = params.with(name, value);
    }
    if let Some(body) = args.body {
        let body: Value = serde_json::from_str(&body).context("--body must be valid JSON")?;
        params = params.with_body(body);
    }

    let client = get_client().await.context("Failed to build API client")?;
    let response = client
        .execute(&args.operation_id, &params)
        .await
        .with_context(|| format!("Operation {} failed", args.operation_id))?;

    output(
        &CallOutput {
            operation_id: args.operation_id,
            response,
        },
        json_mode,
    );
    Ok(())
}

//! Implementation of the `spec-client operations` command.

use anyhow::{Context, Result};
use clap::Args;
use comfy_table::{presets, Attribute, Cell, ContentArrangement, Table};
use serde::Serialize;

use crate::cli::output::{output, truncate, CommandOutput};
use crate::domain::models::{ApiSpec, Operation};
use crate::services::get_client;

#[derive(Args, Debug)]
pub struct OperationsArgs {
    /// Only list operations with this tag
    #[arg(long, short)]
    pub tag: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OperationSummary {
    pub operation_id: String,
    pub method: String,
    pub path: String,
    pub tags: Vec<String>,
    pub summary: Option<String>,
}

impl From<&Operation> for OperationSummary {
    fn from(op: &Operation) -> Self {
        Self {
            operation_id: op.operation_id.clone(),
            method: op.method.to_string(),
            path: op.path.clone(),
            tags: op.tags.clone(),
            summary: op.summary.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OperationsOutput {
    pub title: Option<String>,
    pub operations: Vec<OperationSummary>,
}

impl CommandOutput for OperationsOutput {
    fn to_human(&self) -> String {
        if self.operations.is_empty() {
            return "No operations found.".to_string();
        }

        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL_CONDENSED)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("Operation").add_attribute(Attribute::Bold),
                Cell::new("Method").add_attribute(Attribute::Bold),
                Cell::new("Path").add_attribute(Attribute::Bold),
                Cell::new("Tags").add_attribute(Attribute::Bold),
                Cell::new("Summary").add_attribute(Attribute::Bold),
            ]);

        for op in &self.operations {
            table.add_row(vec![
                Cell::new(&op.operation_id),
                Cell::new(&op.method),
                Cell::new(&op.path),
                Cell::new(op.tags.join(", ")),
                Cell::new(truncate(op.summary.as_deref().unwrap_or(""), 50)),
            ]);
        }

        match &self.title {
            Some(title) => format!("{title}\n{table}"),
            None => table.to_string(),
        }
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Operations carrying `tag`, or all of them; untagged operations match the default tag
fn select_operations<'a>(spec: &'a ApiSpec, tag: Option<&str>) -> Vec<&'a Operation> {
    match tag {
        Some(tag) => spec.tags().remove(tag).unwrap_or_default(),
        None => spec.operations().iter().collect(),
    }
}

pub async fn execute(args: OperationsArgs, json_mode: bool) -> Result<()> {
    let client = get_client().await.context("Failed to build API client")?;

    let operations = select_operations(client.spec(), args.tag.as_deref())
        .into_iter()
        .map(OperationSummary::from)
        .collect();

    let output_data = OperationsOutput {
        title: client.spec().title.clone(),
        operations,
    };
    output(&output_data, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::DEFAULT_TAG;

    fn mixed_spec() -> ApiSpec {
        ApiSpec::parse(
            r#"{
                "openapi": "3.0.0",
                "paths": {
                    "/health": {"get": {"operationId": "health"}},
                    "/pets": {"get": {"operationId": "listPets", "tags": ["pets"]}}
                }
            }"#,
        )
        .unwrap()
    }

    fn ids(ops: &[&Operation]) -> Vec<String> {
        ops.iter().map(|op| op.operation_id.clone()).collect()
    }

    #[test]
    fn test_default_tag_selects_untagged_operations() {
        let spec = mixed_spec();
        assert_eq!(ids(&select_operations(&spec, Some(DEFAULT_TAG))), ["health"]);
        assert_eq!(ids(&select_operations(&spec, Some("pets"))), ["listPets"]);
    }

    #[test]
    fn test_tag_selection_without_filter_or_match() {
        let spec = mixed_spec();
        assert_eq!(select_operations(&spec, None).len(), 2);
        assert!(select_operations(&spec, Some("unknown")).is_empty());
    }

    #[test]
    fn test_human_output_lists_operations() {
        let output = OperationsOutput {
            title: Some("Pets".to_string()),
            operations: vec![OperationSummary {
                operation_id: "listPets".to_string(),
                method: "GET".to_string(),
                path: "/pets".to_string(),
                tags: vec!["pets".to_string()],
                summary: Some("List all pets".to_string()),
            }],
        };

        let human = output.to_human();
        assert!(human.starts_with("Pets\n"));
        assert!(human.contains("listPets"));
        assert!(human.contains("/pets"));
        assert_eq!(output.to_json()["operations"][0]["method"], "GET");
    }

    #[test]
    fn test_empty_output() {
        let output = OperationsOutput {
            title: None,
            operations: vec![],
        };
        assert_eq!(output.to_human(), "No operations found.");
    }
}

//! `crmc query`: run an arbitrary GraphQL document.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value;

use super::Services;
use crate::api::CustomRequest;
use crate::output::json::to_json;

pub fn run(services: &Services, document: &str, variables: Option<&str>) -> Result<()> {
    let query = load_document(document)?;
    let variables = parse_variables(variables)?;

    let data: Value = services
        .data
        .custom(CustomRequest::new(query).with_variables(variables))
        .map_err(|e| services.fail(e))?;

    // Raw data has no table form; always JSON
    println!("{}", to_json(&data));
    Ok(())
}

/// Inline document, or `@path` to read one from disk.
fn load_document(document: &str) -> Result<String> {
    let query = match document.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(Path::new(path))
            .with_context(|| format!("Failed to read GraphQL document {}", path))?,
        None => document.to_string(),
    };

    if query.trim().is_empty() {
        bail!("GraphQL document is empty");
    }
    Ok(query)
}

fn parse_variables(variables: Option<&str>) -> Result<Value> {
    let Some(raw) = variables else {
        return Ok(Value::Null);
    };

    let value: Value = serde_json::from_str(raw).context("--variables is not valid JSON")?;
    if !value.is_object() {
        bail!("--variables must be a JSON object");
    }
    Ok(value)
}

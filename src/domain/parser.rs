use std::collections::HashSet;

use anyhow::{Context, Result, bail};
use serde_json::Value;

use crate::io::{DocumentFormat, parse_document_str};

use super::schema::PipelineSchema;

/// Parse a pipeline definition document into a `PipelineSchema`.
pub fn parse_pipeline_schema(contents: &str, format: DocumentFormat) -> Result<PipelineSchema> {
    let value = parse_document_str(contents, format)?;
    pipeline_schema_from_value(&value)
}

/// Extract the declared params and resources from a pipeline definition.
///
/// Accepts either a full pipeline object (with a `spec` block) or a bare
/// `{ params, resources }` document.
pub fn pipeline_schema_from_value(value: &Value) -> Result<PipelineSchema> {
    let Some(object) = value.as_object() else {
        bail!("pipeline definition must be an object");
    };
    let body = match object.get("spec") {
        Some(spec) if spec.is_object() => spec,
        Some(_) => bail!("pipeline `spec` must be an object"),
        None => value,
    };
    let schema: PipelineSchema =
        serde_json::from_value(body.clone()).context("invalid pipeline params/resources")?;
    ensure_unique(schema.params.iter().map(|spec| spec.name.as_str()), "param")?;
    ensure_unique(
        schema.resources.iter().map(|spec| spec.name.as_str()),
        "resource",
    )?;
    Ok(schema)
}

fn ensure_unique<'a>(names: impl Iterator<Item = &'a str>, label: &str) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if name.is_empty() {
            bail!("{label} name cannot be empty");
        }
        if !seen.insert(name) {
            bail!("duplicate {label} '{name}'");
        }
    }
    Ok(())
}

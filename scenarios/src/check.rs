//! `check` and `options` commands: load a schema file and apply it.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::debug;

use crate::core::scenario::SCENARIO_PARAMETER;
use crate::io::document::load_document;
use crate::io::schema_file::SchemaFile;
use crate::validation::dumper::dump_schema;
use crate::validation::{Parameters, Schema, ValidationResult, Validator};

/// Validate the JSON document at `data_path` against the schema file, with
/// `scenario` as the active scenario (none when `None`).
pub fn check_document(
    schema_path: &Path,
    data_path: &Path,
    scenario: Option<&str>,
) -> Result<ValidationResult> {
    let schema = load_schema(schema_path)?;
    let data = load_document(data_path)?;

    let mut parameters = Parameters::new();
    if let Some(scenario) = scenario {
        parameters.insert(SCENARIO_PARAMETER, scenario);
    }

    let result = Validator::new()
        .validate(&data, &schema, &parameters)
        .context("validate document")?;
    debug!(
        schema = %schema_path.display(),
        scenario = scenario.unwrap_or("<none>"),
        errors = result.errors().len(),
        "document checked"
    );
    Ok(result)
}

/// Option dump of every rule in the schema file, keyed by field.
pub fn schema_options(schema_path: &Path) -> Result<Value> {
    let schema = load_schema(schema_path)?;
    Ok(dump_schema(&schema))
}

fn load_schema(path: &Path) -> Result<Schema> {
    let file = SchemaFile::load(path)?;
    file.to_schema()
        .with_context(|| format!("build schema {}", path.display()))
}

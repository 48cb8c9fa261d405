//! # Input Loading
//!
//! Reads schema, instance and options files. Files ending in `.json` go
//! through `serde_json`; everything else is read as YAML, which also
//! accepts plain JSON.

use std::path::Path;

use anyhow::Context;
use jsm_schema::{SchemaDocument, ValidatorOptions};
use serde_json::Value;

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Parse file contents according to the file's extension.
pub fn parse_text(text: &str, path: &Path) -> anyhow::Result<Value> {
    if is_json(path) {
        serde_json::from_str(text).with_context(|| format!("invalid JSON in {}", path.display()))
    } else {
        jsm_core::parse_yaml(text).with_context(|| format!("invalid YAML in {}", path.display()))
    }
}

/// Read a JSON or YAML file into a JSON value.
pub fn load_value(path: &Path) -> anyhow::Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "loaded input file");
    parse_text(&text, path)
}

/// Read and parse a schema document.
pub fn load_schema(path: &Path) -> anyhow::Result<SchemaDocument> {
    let value = load_value(path)?;
    SchemaDocument::from_json(&value)
        .with_context(|| format!("invalid schema in {}", path.display()))
}

/// Read validator options. Unknown option names are rejected.
pub fn load_options(path: &Path) -> anyhow::Result<ValidatorOptions> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_yaml::from_str(&text)
        .with_context(|| format!("invalid validator options in {}", path.display()))
}

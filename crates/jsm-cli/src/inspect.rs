//! # Inspect Subcommand
//!
//! Parses a schema file through the construction API and prints the
//! canonical draft-07 JSON of the result. Keywords the model drops or
//! normalizes show up as differences from the input.

use std::path::PathBuf;

use clap::Args;
use jsm_schema::SchemaDocument;

use crate::input;

/// Arguments for the inspect subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Schema file (JSON or YAML).
    #[arg(long)]
    pub schema: PathBuf,

    /// Emit compact canonical bytes instead of pretty-printed JSON.
    #[arg(long)]
    pub canonical: bool,
}

/// Load the schema named by `args` and render it.
pub fn run_inspect(args: &InspectArgs) -> anyhow::Result<String> {
    let document = input::load_schema(&args.schema)?;
    tracing::debug!(
        schema = %args.schema.display(),
        kind = document.root().kind().as_str(),
        "schema parsed"
    );
    render(&document, args.canonical)
}

/// Render a parsed schema document.
pub fn render(document: &SchemaDocument, canonical: bool) -> anyhow::Result<String> {
    let value = document.to_json();
    if canonical {
        Ok(jsm_core::CanonicalBytes::of_value(&value)?.as_str().to_string())
    } else {
        Ok(serde_json::to_string_pretty(&value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonical_rendering_sorts_keys() {
        let document = SchemaDocument::from_json(&json!({
            "type": "string",
            "maxLength": 4,
            "$id": "https://example.com/s.json"
        }))
        .unwrap();
        let text = render(&document, true).unwrap();
        let schema_pos = text.find("\"$schema\"").unwrap();
        let type_pos = text.find("\"type\"").unwrap();
        assert!(schema_pos < type_pos);
        assert!(!text.contains('\n'));
    }

    #[test]
    fn test_pretty_rendering_reparses() {
        let source = json!({"type": "integer", "minimum": 1});
        let document = SchemaDocument::from_json(&source).unwrap();
        let text = render(&document, false).unwrap();
        let reparsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(SchemaDocument::from_json(&reparsed).unwrap(), document);
    }
}

//! # Validate Subcommand
//!
//! Validates one instance file against one schema file and renders the
//! violations either as text (one line per violation) or as the JSON
//! report produced by `ValidationResult::to_json`.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use jsm_schema::{JsonPointer, Keyword, SchemaDocument, ValidationResult, Validator};
use serde_json::Value;

use crate::input;

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Schema file (JSON or YAML).
    #[arg(long)]
    pub schema: PathBuf,

    /// Instance file (JSON or YAML).
    #[arg(long)]
    pub instance: PathBuf,

    /// JSON Pointer prefixed to every reported path.
    #[arg(long, default_value = "")]
    pub path: String,

    /// Only report violations of this keyword.
    #[arg(long)]
    pub keyword: Option<String>,

    /// Validator options file (YAML or JSON).
    #[arg(long)]
    pub options: Option<PathBuf>,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Outcome of a validate run: the (possibly filtered) result and its
/// rendered form.
#[derive(Debug)]
pub struct ValidateOutcome {
    pub result: ValidationResult,
    pub report: String,
}

/// Load the inputs named by `args` and validate.
pub fn run_validate(args: &ValidateArgs) -> anyhow::Result<ValidateOutcome> {
    let document = input::load_schema(&args.schema)?;
    let instance = input::load_value(&args.instance)?;
    let validator = match &args.options {
        Some(path) => Validator::new(input::load_options(path)?),
        None => Validator::default(),
    };
    let keyword = args
        .keyword
        .as_deref()
        .map(str::parse::<Keyword>)
        .transpose()?;
    let base = JsonPointer::parse(&args.path).context("invalid --path")?;

    let result = check(&validator, &document, &instance, &base, keyword);
    tracing::info!(
        schema = %args.schema.display(),
        instance = %args.instance.display(),
        violations = result.len(),
        "validation finished"
    );
    let report = render(&result, args.json)?;
    Ok(ValidateOutcome { result, report })
}

/// Validate an already-loaded instance, optionally keeping only one keyword.
pub fn check(
    validator: &Validator,
    document: &SchemaDocument,
    instance: &Value,
    base: &JsonPointer,
    keyword: Option<Keyword>,
) -> ValidationResult {
    let result = validator.validate(document.root(), instance, base);
    match keyword {
        Some(k) => result.for_keyword(k.as_str()),
        None => result,
    }
}

/// Render a result as pretty JSON or as text.
pub fn render(result: &ValidationResult, json: bool) -> anyhow::Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(&result.to_json())?);
    }
    if result.is_valid() {
        Ok("valid".to_string())
    } else {
        Ok(format!("invalid: {} violation(s)\n{result}", result.len()))
    }
}

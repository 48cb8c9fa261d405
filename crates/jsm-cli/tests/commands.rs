//! # Subcommand Handlers Against Files on Disk
//!
//! Writes schema, instance and options files to a scratch directory and
//! runs the handlers the binary dispatches to.

use std::path::{Path, PathBuf};

use jsm_cli::inspect::{run_inspect, InspectArgs};
use jsm_cli::validate::{run_validate, ValidateArgs};

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("jsm-cli-{}-{name}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write(dir: &Path, file: &str, text: &str) -> PathBuf {
    let path = dir.join(file);
    std::fs::write(&path, text).unwrap();
    path
}

const SCHEMA: &str = r#"
type: object
properties:
  email:
    type: string
    format: email
  count:
    type: integer
    multipleOf: 5
required: [email]
"#;

fn args(dir: &Path, instance: &str) -> ValidateArgs {
    ValidateArgs {
        schema: write(dir, "schema.yaml", SCHEMA),
        instance: write(dir, "instance.json", instance),
        path: String::new(),
        keyword: None,
        options: None,
        json: false,
    }
}

#[test]
fn test_validate_reports_violations() {
    let dir = scratch("violations");
    let outcome = run_validate(&args(&dir, r#"{"email": "nope", "count": 7}"#)).unwrap();
    assert_eq!(outcome.result.len(), 2);
    assert!(outcome.report.contains("/email"));
    assert!(outcome.report.contains("/count"));
}

#[test]
fn test_options_file_disables_format_assertion() {
    let dir = scratch("options");
    let mut a = args(&dir, r#"{"email": "nope"}"#);
    a.options = Some(write(&dir, "options.yaml", "assert_formats: false\n"));
    let outcome = run_validate(&a).unwrap();
    assert!(outcome.result.is_valid());
    assert_eq!(outcome.report, "valid");
}

#[test]
fn test_unknown_option_is_rejected() {
    let dir = scratch("bad-options");
    let mut a = args(&dir, "{}");
    a.options = Some(write(&dir, "options.yaml", "strictness: 3\n"));
    assert!(run_validate(&a).is_err());
}

#[test]
fn test_unknown_keyword_filter_is_rejected() {
    let dir = scratch("bad-keyword");
    let mut a = args(&dir, "{}");
    a.keyword = Some("requried".to_string());
    let err = run_validate(&a).unwrap_err();
    assert!(err.to_string().contains("requried"));
}

#[test]
fn test_keyword_filter_and_json_output() {
    let dir = scratch("filtered");
    let mut a = args(&dir, r#"{"count": 3}"#);
    a.keyword = Some("multipleOf".to_string());
    a.json = true;
    a.path = "/payload".to_string();
    let outcome = run_validate(&a).unwrap();
    let report: serde_json::Value = serde_json::from_str(&outcome.report).unwrap();
    assert_eq!(report["errors"].as_array().unwrap().len(), 1);
    assert_eq!(report["errors"][0]["path"], "/payload/count");
}

#[test]
fn test_invalid_schema_fails_to_load() {
    let dir = scratch("bad-schema");
    let a = InspectArgs {
        schema: write(&dir, "schema.json", r#"{"type": "string", "minimum": 1}"#),
        canonical: false,
    };
    assert!(run_inspect(&a).is_err());
}

#[test]
fn test_inspect_prints_draft07_json() {
    let dir = scratch("inspect");
    let a = InspectArgs {
        schema: write(&dir, "schema.yaml", SCHEMA),
        canonical: true,
    };
    let text = run_inspect(&a).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["$schema"], jsm_schema::DRAFT_07);
    assert_eq!(value["required"], serde_json::json!(["email"]));
}

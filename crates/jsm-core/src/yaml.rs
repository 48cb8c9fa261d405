//! # YAML Instance Conversion
//!
//! Instances and schemas are often authored in YAML. This module maps a
//! `serde_yaml::Value` tree onto the JSON data model so the validation
//! engine only ever sees `serde_json::Value`.
//!
//! Tags are dropped (the tagged inner value is kept). Non-string mapping
//! keys are stringified when they are scalars and rejected otherwise.

use serde_json::Value;

use crate::error::CoreError;

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// # Errors
///
/// Returns `CoreError::Yaml` for non-finite floats and for sequence or
/// mapping keys, neither of which JSON can represent.
pub fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, CoreError> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(serde_json::Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(serde_json::Number::from(u)))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| CoreError::Yaml(format!("cannot represent float {f} in JSON")))
            } else {
                Err(CoreError::Yaml(format!("unsupported YAML number: {n}")))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => {
            let items: Result<Vec<Value>, CoreError> = seq.iter().map(yaml_to_json_value).collect();
            Ok(Value::Array(items?))
        }
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    serde_yaml::Value::Null => "null".to_string(),
                    _ => {
                        return Err(CoreError::Yaml(
                            "unsupported YAML map key type: only scalar keys are allowed".to_string(),
                        ))
                    }
                };
                json_map.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}

/// Parse YAML text (a superset of JSON) into a JSON value.
///
/// # Errors
///
/// Returns `CoreError::Yaml` if the text is not valid YAML or does not map
/// onto the JSON data model.
pub fn parse_yaml(text: &str) -> Result<Value, CoreError> {
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(text).map_err(|e| CoreError::Yaml(format!("invalid YAML: {e}")))?;
    yaml_to_json_value(&yaml)
}

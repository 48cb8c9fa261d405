//! # Schema Parsing
//!
//! Builds a [`SchemaNode`] from a JSON Schema value. Parsing goes through
//! the public setters only, so every construction invariant applies to
//! parsed schemas exactly as to hand-built ones.
//!
//! ## Kind Selection
//!
//! - `type` present: the kind is fixed by its non-null members. Members of
//!   more than one kind yield an `Any` node, which then cannot carry
//!   kind-specific keywords.
//! - `type` absent: the kind is inferred from the kind-specific keywords
//!   present. Keywords of two different kinds on one node are a
//!   `TypeConflict`.
//!
//! Value-bearing keywords (`enum`, `const`, `default`) are applied last so
//! they are checked against the fully built node.
//!
//! `$ref` is rejected. Unknown keywords are ignored with a debug trace.

use std::collections::BTreeSet;

use jsm_core::JsonType;
use serde_json::{Map, Value};

use crate::error::SchemaConstructionError;
use crate::keyword::Keyword;
use crate::node::{Kind, SchemaNode};
use crate::object::Dependency;

const STRING_KEYWORDS: &[Keyword] = &[
    Keyword::MinLength,
    Keyword::MaxLength,
    Keyword::Pattern,
    Keyword::Format,
    Keyword::ContentEncoding,
    Keyword::ContentMediaType,
];

const NUMBER_KEYWORDS: &[Keyword] = &[
    Keyword::Minimum,
    Keyword::Maximum,
    Keyword::ExclusiveMinimum,
    Keyword::ExclusiveMaximum,
    Keyword::MultipleOf,
];

const OBJECT_KEYWORDS: &[Keyword] = &[
    Keyword::Properties,
    Keyword::PatternProperties,
    Keyword::AdditionalProperties,
    Keyword::Required,
    Keyword::MinProperties,
    Keyword::MaxProperties,
    Keyword::Dependencies,
    Keyword::PropertyNames,
];

const ARRAY_KEYWORDS: &[Keyword] = &[
    Keyword::Items,
    Keyword::AdditionalItems,
    Keyword::Contains,
    Keyword::MinItems,
    Keyword::MaxItems,
    Keyword::UniqueItems,
];

/// Keys accepted without a trace although the model does not store them.
const TOLERATED: &[&str] = &["$schema", "definitions"];

type Fields = Map<String, Value>;

impl SchemaNode {
    /// Parse a schema from its JSON form.
    ///
    /// # Errors
    ///
    /// Any [`SchemaConstructionError`] a setter would raise, with the
    /// keyword location prefixed for nested schemas, plus
    /// `InvalidKeywordValue` for malformed keyword values and `$ref`.
    pub fn from_json(value: &Value) -> Result<Self, SchemaConstructionError> {
        match value {
            Value::Bool(verdict) => Ok(Self::literal(*verdict)),
            Value::Object(fields) => parse_fields(fields),
            other => Err(SchemaConstructionError::invalid(
                "schema",
                format!("a schema must be an object or a boolean, got {}", JsonType::of(other)),
            )),
        }
    }
}

fn parse_fields(fields: &Fields) -> Result<SchemaNode, SchemaConstructionError> {
    if fields.contains_key("$ref") {
        return Err(SchemaConstructionError::invalid(
            "$ref",
            "schema references are not resolved",
        ));
    }
    for key in fields.keys() {
        let known = key.parse::<Keyword>().is_ok_and(|k| k != Keyword::False);
        if !known && !TOLERATED.contains(&key.as_str()) {
            tracing::debug!(keyword = %key, "unknown schema keyword ignored");
        }
    }

    let types = parse_types(fields)?;
    let kind = select_kind(fields, types.as_ref())?;
    let mut node = SchemaNode::untyped(kind);
    if let Some(types) = types {
        node.set_type_set(types)?;
    }

    match node.kind() {
        Kind::String => parse_string(&mut node, fields)?,
        Kind::Number => parse_number(&mut node, fields)?,
        Kind::Object => parse_object(&mut node, fields)?,
        Kind::Array => parse_array(&mut node, fields)?,
        Kind::Any | Kind::Boolean | Kind::Null | Kind::Literal => {}
    }
    parse_annotations(&mut node, fields)?;
    parse_composition(&mut node, fields)?;

    if let Some(values) = array(fields, Keyword::Enum)? {
        node.set_enum(values.iter().cloned())?;
    }
    if let Some(value) = fields.get(Keyword::Const.as_str()) {
        node.set_const(value.clone())?;
    }
    if let Some(value) = fields.get(Keyword::Default.as_str()) {
        node.set_default(value.clone())?;
    }
    Ok(node)
}

fn parse_types(fields: &Fields) -> Result<Option<BTreeSet<JsonType>>, SchemaConstructionError> {
    let bad = |reason: String| SchemaConstructionError::invalid(Keyword::Type.as_str(), reason);
    let name = |v: &Value| -> Result<JsonType, SchemaConstructionError> {
        let text = v
            .as_str()
            .ok_or_else(|| bad(format!("type names must be strings, got {v}")))?;
        text.parse::<JsonType>().map_err(|e| bad(e.to_string()))
    };
    match fields.get(Keyword::Type.as_str()) {
        None => Ok(None),
        Some(Value::Array(names)) => {
            let types = names.iter().map(name).collect::<Result<BTreeSet<_>, _>>()?;
            if types.len() != names.len() {
                return Err(bad("type names must be unique".to_string()));
            }
            Ok(Some(types))
        }
        Some(single) => Ok(Some(BTreeSet::from([name(single)?]))),
    }
}

fn families(fields: &Fields) -> Vec<Kind> {
    [
        (Kind::String, STRING_KEYWORDS),
        (Kind::Number, NUMBER_KEYWORDS),
        (Kind::Object, OBJECT_KEYWORDS),
        (Kind::Array, ARRAY_KEYWORDS),
    ]
    .into_iter()
    .filter(|(_, keywords)| keywords.iter().any(|k| fields.contains_key(k.as_str())))
    .map(|(kind, _)| kind)
    .collect()
}

fn select_kind(
    fields: &Fields,
    types: Option<&BTreeSet<JsonType>>,
) -> Result<Kind, SchemaConstructionError> {
    let present = families(fields);
    let conflict = |reason: String| SchemaConstructionError::type_conflict(Keyword::Type.as_str(), reason);

    let Some(types) = types else {
        return match present.as_slice() {
            [] => Ok(Kind::Any),
            [only] => Ok(*only),
            several => Err(conflict(format!(
                "keywords of several kinds on one schema: {}",
                several.iter().map(|k| k.as_str()).collect::<Vec<_>>().join(", ")
            ))),
        };
    };

    let kinds: BTreeSet<&'static str> = types
        .iter()
        .filter(|t| **t != JsonType::Null)
        .map(|t| Kind::for_type(*t).as_str())
        .collect();
    let kind = match kinds.len() {
        0 => Kind::Null,
        1 => types
            .iter()
            .find(|t| **t != JsonType::Null)
            .map_or(Kind::Null, |t| Kind::for_type(*t)),
        _ => Kind::Any,
    };
    if let Some(stray) = present.iter().find(|k| **k != kind) {
        return Err(conflict(format!(
            "{stray} keywords on a schema of type {}",
            crate::serialize::types_value(types)
        )));
    }
    Ok(kind)
}

fn parse_string(node: &mut SchemaNode, fields: &Fields) -> Result<(), SchemaConstructionError> {
    if let Some(n) = count(fields, Keyword::MinLength)? {
        node.set_min_length(n)?;
    }
    if let Some(n) = count(fields, Keyword::MaxLength)? {
        node.set_max_length(n)?;
    }
    if let Some(source) = text(fields, Keyword::Pattern)? {
        node.set_pattern(source)?;
    }
    if let Some(name) = text(fields, Keyword::Format)? {
        node.set_format(name)?;
    }
    if let Some(encoding) = text(fields, Keyword::ContentEncoding)? {
        node.set_content_encoding(encoding)?;
    }
    if let Some(media_type) = text(fields, Keyword::ContentMediaType)? {
        node.set_content_media_type(media_type)?;
    }
    Ok(())
}

fn parse_number(node: &mut SchemaNode, fields: &Fields) -> Result<(), SchemaConstructionError> {
    if let Some(x) = number(fields, Keyword::Minimum)? {
        node.set_minimum(x)?;
    }
    if let Some(x) = number(fields, Keyword::Maximum)? {
        node.set_maximum(x)?;
    }
    if let Some(x) = number(fields, Keyword::ExclusiveMinimum)? {
        node.set_exclusive_minimum(x)?;
    }
    if let Some(x) = number(fields, Keyword::ExclusiveMaximum)? {
        node.set_exclusive_maximum(x)?;
    }
    if let Some(x) = number(fields, Keyword::MultipleOf)? {
        node.set_multiple_of(x)?;
    }
    Ok(())
}

fn parse_object(node: &mut SchemaNode, fields: &Fields) -> Result<(), SchemaConstructionError> {
    if let Some(props) = object(fields, Keyword::Properties)? {
        let mut entries = Vec::with_capacity(props.len());
        for (name, sub) in props {
            entries.push((name.clone(), subschema(sub, &format!("properties/{name}"))?));
        }
        node.set_properties(entries)?;
    }
    if let Some(props) = object(fields, Keyword::PatternProperties)? {
        for (source, sub) in props {
            let schema = subschema(sub, &format!("patternProperties/{source}"))?;
            node.set_pattern_property(source, schema)?;
        }
    }
    if let Some(sub) = fields.get(Keyword::AdditionalProperties.as_str()) {
        node.set_additional_properties(subschema(sub, "additionalProperties")?)?;
    }
    if let Some(names) = array(fields, Keyword::Required)? {
        node.set_required(strings(names, Keyword::Required)?)?;
    }
    if let Some(n) = count(fields, Keyword::MinProperties)? {
        node.set_min_properties(n)?;
    }
    if let Some(n) = count(fields, Keyword::MaxProperties)? {
        node.set_max_properties(n)?;
    }
    if let Some(deps) = object(fields, Keyword::Dependencies)? {
        for (trigger, value) in deps {
            let dependency = match value {
                Value::Array(names) => Dependency::Properties(strings(names, Keyword::Dependencies)?),
                other => Dependency::from(subschema(other, &format!("dependencies/{trigger}"))?),
            };
            node.set_dependency(trigger.clone(), dependency)?;
        }
    }
    if let Some(sub) = fields.get(Keyword::PropertyNames.as_str()) {
        node.set_property_names(subschema(sub, "propertyNames")?)?;
    }
    Ok(())
}

fn parse_array(node: &mut SchemaNode, fields: &Fields) -> Result<(), SchemaConstructionError> {
    match fields.get(Keyword::Items.as_str()) {
        Some(Value::Array(subs)) => {
            node.set_tuple_items(subschemas(subs, "items")?)?;
        }
        Some(sub) => {
            node.set_items(subschema(sub, "items")?)?;
        }
        None => {}
    }
    if let Some(sub) = fields.get(Keyword::AdditionalItems.as_str()) {
        node.set_additional_items(subschema(sub, "additionalItems")?)?;
    }
    if let Some(sub) = fields.get(Keyword::Contains.as_str()) {
        node.set_contains(subschema(sub, "contains")?)?;
    }
    if let Some(n) = count(fields, Keyword::MinItems)? {
        node.set_min_items(n)?;
    }
    if let Some(n) = count(fields, Keyword::MaxItems)? {
        node.set_max_items(n)?;
    }
    if let Some(flag) = boolean(fields, Keyword::UniqueItems)? {
        node.set_unique_items(flag)?;
    }
    Ok(())
}

fn parse_annotations(node: &mut SchemaNode, fields: &Fields) -> Result<(), SchemaConstructionError> {
    if let Some(id) = text(fields, Keyword::Id)? {
        node.set_id(id)?;
    }
    if let Some(title) = text(fields, Keyword::Title)? {
        node.set_title(title)?;
    }
    if let Some(description) = text(fields, Keyword::Description)? {
        node.set_description(description)?;
    }
    if let Some(comment) = text(fields, Keyword::Comment)? {
        node.set_comment(comment)?;
    }
    if let Some(examples) = array(fields, Keyword::Examples)? {
        node.set_examples(examples.clone())?;
    }
    if let Some(flag) = boolean(fields, Keyword::ReadOnly)? {
        node.set_read_only(flag)?;
    }
    if let Some(flag) = boolean(fields, Keyword::WriteOnly)? {
        node.set_write_only(flag)?;
    }
    Ok(())
}

fn parse_composition(node: &mut SchemaNode, fields: &Fields) -> Result<(), SchemaConstructionError> {
    if let Some(subs) = array(fields, Keyword::AllOf)? {
        node.set_all_of(subschemas(subs, "allOf")?)?;
    }
    if let Some(subs) = array(fields, Keyword::AnyOf)? {
        node.set_any_of(subschemas(subs, "anyOf")?)?;
    }
    if let Some(subs) = array(fields, Keyword::OneOf)? {
        node.set_one_of(subschemas(subs, "oneOf")?)?;
    }
    if let Some(sub) = fields.get(Keyword::Not.as_str()) {
        node.set_not(subschema(sub, "not")?)?;
    }
    if let Some(sub) = fields.get(Keyword::If.as_str()) {
        node.set_if(subschema(sub, "if")?)?;
    }
    if let Some(sub) = fields.get(Keyword::Then.as_str()) {
        node.set_then(subschema(sub, "then")?)?;
    }
    if let Some(sub) = fields.get(Keyword::Else.as_str()) {
        node.set_else(subschema(sub, "else")?)?;
    }
    Ok(())
}

// ── Field readers ───────────────────────────────────────────────────────

fn subschema(value: &Value, location: &str) -> Result<SchemaNode, SchemaConstructionError> {
    SchemaNode::from_json(value).map_err(|e| e.nested(location))
}

fn subschemas(values: &[Value], location: &str) -> Result<Vec<SchemaNode>, SchemaConstructionError> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| subschema(v, &format!("{location}/{i}")))
        .collect()
}

fn wrong_shape(keyword: Keyword, wanted: &str, got: &Value) -> SchemaConstructionError {
    SchemaConstructionError::invalid(
        keyword.as_str(),
        format!("expected {wanted}, got {}", JsonType::of(got)),
    )
}

fn text(fields: &Fields, keyword: Keyword) -> Result<Option<&str>, SchemaConstructionError> {
    match fields.get(keyword.as_str()) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(wrong_shape(keyword, "a string", other)),
    }
}

fn boolean(fields: &Fields, keyword: Keyword) -> Result<Option<bool>, SchemaConstructionError> {
    match fields.get(keyword.as_str()) {
        None => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(other) => Err(wrong_shape(keyword, "a boolean", other)),
    }
}

fn number(fields: &Fields, keyword: Keyword) -> Result<Option<f64>, SchemaConstructionError> {
    match fields.get(keyword.as_str()) {
        None => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| wrong_shape(keyword, "a finite number", &Value::Number(n.clone()))),
        Some(other) => Err(wrong_shape(keyword, "a number", other)),
    }
}

/// Non-negative integer; integral floats such as `2.0` are accepted.
fn count(fields: &Fields, keyword: Keyword) -> Result<Option<u64>, SchemaConstructionError> {
    match fields.get(keyword.as_str()) {
        None => Ok(None),
        Some(Value::Number(n)) => {
            if let Some(u) = n.as_u64() {
                return Ok(Some(u));
            }
            match n.as_f64() {
                Some(f) if f >= 0.0 && f.fract() == 0.0 && f < u64::MAX as f64 => Ok(Some(f as u64)),
                _ => Err(SchemaConstructionError::invalid(
                    keyword.as_str(),
                    format!("expected a non-negative integer, got {n}"),
                )),
            }
        }
        Some(other) => Err(wrong_shape(keyword, "a non-negative integer", other)),
    }
}

fn array(fields: &Fields, keyword: Keyword) -> Result<Option<&Vec<Value>>, SchemaConstructionError> {
    match fields.get(keyword.as_str()) {
        None => Ok(None),
        Some(Value::Array(items)) => Ok(Some(items)),
        Some(other) => Err(wrong_shape(keyword, "an array", other)),
    }
}

fn object(fields: &Fields, keyword: Keyword) -> Result<Option<&Fields>, SchemaConstructionError> {
    match fields.get(keyword.as_str()) {
        None => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(other) => Err(wrong_shape(keyword, "an object", other)),
    }
}

fn strings(values: &[Value], keyword: Keyword) -> Result<Vec<String>, SchemaConstructionError> {
    values
        .iter()
        .map(|v| match v {
            Value::String(s) => Ok(s.clone()),
            other => Err(wrong_shape(keyword, "an array of strings", other)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_boolean_schemas() {
        assert_eq!(SchemaNode::from_json(&json!(true)).unwrap().literal_value(), Some(true));
        assert!(SchemaNode::from_json(&json!(false)).unwrap().is_false());
        assert!(SchemaNode::from_json(&json!(3)).is_err());
    }

    #[test]
    fn test_kind_from_type() {
        let node = SchemaNode::from_json(&json!({"type": "integer", "minimum": 1})).unwrap();
        assert_eq!(node.kind(), Kind::Number);
        assert_eq!(node.as_number().unwrap().minimum(), Some(1.0));
    }

    #[test]
    fn test_kind_inferred_from_keywords() {
        let node = SchemaNode::from_json(&json!({"minLength": 2})).unwrap();
        assert_eq!(node.kind(), Kind::String);
        assert!(node.types().is_none());
        assert!(node.is_valid(&json!(10)));
        assert!(!node.is_valid(&json!("a")));
    }

    #[test]
    fn test_nullable_from_type_array() {
        let node = SchemaNode::from_json(&json!({"type": ["string", "null"], "maxLength": 1})).unwrap();
        assert_eq!(node.kind(), Kind::String);
        assert!(node.is_valid(&json!(null)));
        assert!(!node.is_valid(&json!("ab")));
    }

    #[test]
    fn test_mixed_families_conflict() {
        let err = SchemaNode::from_json(&json!({"minLength": 1, "minimum": 0})).unwrap_err();
        assert!(matches!(err, SchemaConstructionError::TypeConflict { .. }));
        let err = SchemaNode::from_json(&json!({"type": "number", "maxLength": 3})).unwrap_err();
        assert!(matches!(err, SchemaConstructionError::TypeConflict { .. }));
    }

    #[test]
    fn test_multi_kind_type_is_any() {
        let node = SchemaNode::from_json(&json!({"type": ["string", "integer"]})).unwrap();
        assert_eq!(node.kind(), Kind::Any);
        assert!(node.is_valid(&json!(4)));
        assert!(!node.is_valid(&json!(4.5)));
    }

    #[test]
    fn test_ref_rejected() {
        let err = SchemaNode::from_json(&json!({"$ref": "#/definitions/a"})).unwrap_err();
        assert_eq!(err.keyword(), "$ref");
    }

    #[test]
    fn test_nested_error_location() {
        let err = SchemaNode::from_json(&json!({
            "properties": {"id": {"type": "string", "minLength": 4, "maxLength": 2}}
        }))
        .unwrap_err();
        assert_eq!(err.keyword(), "properties/id/maxLength");
    }

    #[test]
    fn test_default_checked_after_constraints() {
        let err = SchemaNode::from_json(&json!({"type": "string", "default": 1})).unwrap_err();
        assert!(matches!(err, SchemaConstructionError::ValueViolatesOwnConstraint { .. }));
        let ok = SchemaNode::from_json(&json!({"default": "abc", "type": "string", "minLength": 2}));
        assert!(ok.is_ok());
    }

    #[test]
    fn test_malformed_keyword_values() {
        assert!(SchemaNode::from_json(&json!({"minLength": -1})).is_err());
        assert!(SchemaNode::from_json(&json!({"minLength": 1.5})).is_err());
        assert!(SchemaNode::from_json(&json!({"required": [1]})).is_err());
        assert!(SchemaNode::from_json(&json!({"type": "float"})).is_err());
        assert!(SchemaNode::from_json(&json!({"type": ["string", "string"]})).is_err());
        assert_eq!(
            SchemaNode::from_json(&json!({"minLength": 2.0})).unwrap().as_string().unwrap().min_length(),
            Some(2)
        );
    }

    #[test]
    fn test_unknown_keywords_ignored() {
        let node = SchemaNode::from_json(&json!({"x-vendor": 1, "definitions": {}})).unwrap();
        assert_eq!(node, SchemaNode::any());
    }

    #[test]
    fn test_full_round_trip() {
        let source = json!({
            "type": "object",
            "title": "user",
            "properties": {
                "id": {"type": "string", "pattern": "^u[0-9]+$"},
                "tags": {"type": "array", "items": {"type": "string"}, "uniqueItems": true},
                "age": {"type": "integer", "minimum": 0}
            },
            "patternProperties": {"^x-": true},
            "additionalProperties": false,
            "required": ["id"],
            "dependencies": {"age": ["id"], "id": {"maxProperties": 5}},
            "if": {"required": ["age"]},
            "then": {"properties": {"age": {"minimum": 18}}},
            "anyOf": [{"minProperties": 1}, false]
        });
        let node = SchemaNode::from_json(&source).unwrap();
        assert_eq!(node.to_json(), source);
    }
}

//! # Differential Check Against the `jsonschema` Crate
//!
//! For a corpus of draft-07 schemas, the verdict of this engine must agree
//! with `jsonschema` on generated instances.
//!
//! The corpus stays inside the keyword semantics both engines share: no
//! `format`, no fractional `multipleOf`, and no key matched by both
//! `properties` and `patternProperties` (this engine applies pattern
//! schemas only to undeclared keys).

use jsm_schema::{SchemaDocument, DRAFT_07};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn corpus() -> Vec<Value> {
    vec![
        json!({"type": "integer", "minimum": 0, "maximum": 100}),
        json!({"type": "number", "exclusiveMinimum": -1, "exclusiveMaximum": 1.5}),
        json!({"type": "string", "minLength": 2, "maxLength": 4, "pattern": "^[a-z]+$"}),
        json!({
            "type": "object",
            "properties": {"a": {"type": "integer"}, "b": {"type": "string"}},
            "required": ["a"],
            "additionalProperties": false
        }),
        json!({
            "type": "object",
            "patternProperties": {"^[ab]$": {"type": "integer"}},
            "additionalProperties": {"type": "string"}
        }),
        json!({"type": "array", "items": {"type": "integer"}, "uniqueItems": true, "maxItems": 3}),
        json!({"type": "array", "items": [{"type": "string"}, {"type": "integer"}], "additionalItems": false}),
        json!({"type": "array", "contains": {"type": "boolean"}, "minItems": 1}),
        json!({"anyOf": [{"type": "string"}, {"type": "integer", "multipleOf": 3}]}),
        json!({"oneOf": [{"type": "integer"}, {"type": "number", "minimum": 0}]}),
        json!({"allOf": [{"type": "object"}, {"required": ["c"]}, {"maxProperties": 2}]}),
        json!({"not": {"type": ["null", "boolean"]}}),
        json!({"if": {"type": "integer"}, "then": {"minimum": 10}, "else": {"type": "string"}}),
        json!({"enum": [1, "a", null, [1, 2], {"k": true}]}),
        json!({"const": {"k": [1, 2.0]}}),
        json!({"type": "object", "dependencies": {"a": ["b"], "c": {"required": ["d"]}}}),
        json!({"type": "object", "propertyNames": {"maxLength": 1}, "minProperties": 1}),
        json!({"type": ["string", "null"]}),
        json!(false),
        json!(true),
    ]
}

fn with_dialect(schema: &Value) -> Value {
    match schema {
        Value::Object(map) => {
            let mut map = map.clone();
            map.insert("$schema".to_string(), json!(DRAFT_07));
            Value::Object(map)
        }
        other => other.clone(),
    }
}

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-20i64..120).prop_map(|n| json!(n)),
        (-20i32..20).prop_map(|n| json!(f64::from(n) + 0.5)),
        "[a-d]{0,5}".prop_map(Value::String),
    ];
    leaf.prop_recursive(2, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            prop::collection::btree_map("[a-d]", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect::<Map<String, Value>>())),
        ]
    })
}

#[test]
fn test_corpus_parses() {
    for schema in corpus() {
        assert!(
            SchemaDocument::from_json(&with_dialect(&schema)).is_ok(),
            "failed to parse {schema}"
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn test_verdicts_match_reference(instance in arb_json()) {
        for schema in corpus() {
            let schema = with_dialect(&schema);
            let ours = SchemaDocument::from_json(&schema).unwrap().is_valid(&instance);
            let reference = jsonschema::is_valid(&schema, &instance);
            prop_assert_eq!(
                ours,
                reference,
                "schema {} instance {}",
                schema,
                instance
            );
        }
    }
}

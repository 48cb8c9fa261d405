//! # End-to-End Validation Scenarios
//!
//! Builds realistic schemas through the public construction API and through
//! `from_json`, then checks both the verdict and the exact shape of the
//! reported violations (keyword, path, count).

use jsm_schema::{
    is_valid, validate, validate_strict, JsonPointer, JsonType, Keyword, SchemaConstructionError,
    SchemaDocument, SchemaNode, ValidationResult,
};
use serde_json::{json, Value};

fn check(node: &SchemaNode, instance: Value) -> ValidationResult {
    validate(node, &instance, &JsonPointer::root())
}

fn user_schema() -> SchemaNode {
    SchemaNode::object()
        .with(|n| {
            n.set_property(
                "id",
                SchemaNode::string().with(|s| s.set_pattern("^u[0-9]+$"))?,
            )?
            .set_property("email", SchemaNode::string().with(|s| s.set_format("email"))?)?
            .set_property(
                "age",
                SchemaNode::integer().with(|a| a.set_minimum(0.0)?.set_maximum(150.0))?,
            )?
            .set_required(["id", "email"])
        })
        .unwrap()
}

#[test]
fn test_string_default_must_be_string() {
    let mut node = SchemaNode::string();
    let err = node.set_default(json!(42)).unwrap_err();
    assert!(matches!(
        err,
        SchemaConstructionError::ValueViolatesOwnConstraint { .. }
    ));
    assert!(node.default_value().is_none());
}

#[test]
fn test_price_multiple_of_cent() {
    let price = SchemaNode::number()
        .with(|n| n.set_minimum(0.0)?.set_multiple_of(0.01))
        .unwrap();
    assert!(is_valid(&price, &json!(9.99)));

    let r = check(&price, json!(9.999));
    assert_eq!(r.len(), 1);
    assert_eq!(r.errors()[0].keyword, Keyword::MultipleOf);
    assert_eq!(r.errors()[0].path.as_str(), "");
}

#[test]
fn test_missing_required_email() {
    let r = check(&user_schema(), json!({"id": "u1"}));
    assert_eq!(r.len(), 1);
    let e = &r.errors()[0];
    assert_eq!(e.keyword, Keyword::Required);
    assert_eq!(e.path.as_str(), "");
    assert!(e.message.contains("email"));
}

#[test]
fn test_user_violations_are_located() {
    let r = check(
        &user_schema(),
        json!({"id": "x1", "email": "not-an-email", "age": 200}),
    );
    let mut located: Vec<(&str, Keyword)> = r
        .errors()
        .iter()
        .map(|e| (e.path.as_str(), e.keyword))
        .collect();
    located.sort();
    assert_eq!(
        located,
        vec![
            ("/age", Keyword::Maximum),
            ("/email", Keyword::Format),
            ("/id", Keyword::Pattern),
        ]
    );
}

#[test]
fn test_tuple_rejects_extra_item() {
    let tuple = SchemaNode::array()
        .with(|n| {
            n.set_tuple_items(vec![
                SchemaNode::string(),
                SchemaNode::number(),
                SchemaNode::boolean(),
            ])?
            .set_additional_items(false)
        })
        .unwrap();
    let r = check(&tuple, json!(["n", 1, true, "extra"]));
    assert_eq!(r.len(), 1);
    assert_eq!(r.errors()[0].keyword, Keyword::AdditionalItems);
    assert_eq!(r.errors()[0].path.as_str(), "/3");
    assert!(is_valid(&tuple, &json!(["n", 1])));
}

#[test]
fn test_one_of_with_two_matching_branches() {
    let card = SchemaNode::object()
        .with(|n| n.set_property("number", SchemaNode::string()))
        .unwrap();
    let iban = SchemaNode::object()
        .with(|n| n.set_property("iban", SchemaNode::string()))
        .unwrap();
    let payment = SchemaNode::any()
        .with(|n| n.set_one_of(vec![card, iban]))
        .unwrap();
    let r = check(&payment, json!({"number": "4111"}));
    assert_eq!(r.len(), 1);
    assert_eq!(r.errors()[0].keyword, Keyword::OneOf);
    assert!(r.errors()[0].message.contains("more than one"));
}

#[test]
fn test_adult_needs_driver_license() {
    let schema = SchemaNode::from_json(&json!({
        "type": "object",
        "if": {
            "properties": {"age": {"type": "integer", "minimum": 18}},
            "required": ["age"]
        },
        "then": {"required": ["driverLicense"]}
    }))
    .unwrap();
    let r = check(&schema, json!({"age": 20}));
    assert_eq!(r.len(), 1);
    assert_eq!(r.errors()[0].keyword, Keyword::Required);
    assert!(r.for_keyword("if").is_valid());
    assert!(is_valid(&schema, &json!({"age": 20, "driverLicense": "D1"})));
    assert!(is_valid(&schema, &json!({"age": 16})));
}

#[test]
fn test_filter_and_combine() {
    let schema = user_schema();
    let first = check(&schema, json!({}));
    let second = check(&schema, json!({"id": 7, "email": "a@b.co"}));
    let all = ValidationResult::combine([first.clone(), second.clone()]);
    assert_eq!(all.len(), first.len() + second.len());
    assert_eq!(all.for_keyword("required").len(), 2);
    assert_eq!(all.for_keyword("type").errors()[0].path.as_str(), "/id");
}

#[test]
fn test_strict_adapter_carries_every_violation() {
    let err = validate_strict(&user_schema(), &json!({})).unwrap_err();
    assert_eq!(err.violations().len(), 2);
    assert_eq!(err.first().unwrap().keyword, Keyword::Required);
    assert!(err.to_string().contains("2 violation(s)"));
}

#[test]
fn test_document_from_yaml() {
    let text = r#"
$schema: "http://json-schema.org/draft-07/schema#"
$id: "https://example.com/order.json"
title: order
type: object
properties:
  sku:
    type: string
    minLength: 3
  qty:
    type: integer
    exclusiveMinimum: 0
required: [sku, qty]
additionalProperties: false
"#;
    let value = jsm_core::parse_yaml(text).unwrap();
    let doc = SchemaDocument::from_json(&value).unwrap();
    assert_eq!(doc.root().title(), Some("order"));
    assert!(doc.is_valid(&json!({"sku": "ABC", "qty": 2})));

    let r = doc.validate(&json!({"sku": "AB", "qty": 0, "note": "x"}));
    let mut keywords: Vec<&str> = r.errors().iter().map(|e| e.keyword.as_str()).collect();
    keywords.sort_unstable();
    assert_eq!(
        keywords,
        vec!["additionalProperties", "exclusiveMinimum", "minLength"]
    );
}

#[test]
fn test_nullable_reference_field() {
    let mut node = SchemaNode::string();
    node.set_type_set([JsonType::String, JsonType::Null])
        .unwrap()
        .set_max_length(8)
        .unwrap()
        .set_default(Value::Null)
        .unwrap();
    assert!(is_valid(&node, &json!(null)));
    assert!(!is_valid(&node, &json!("far too long")));
}

#[test]
fn test_parsed_schema_round_trips() {
    let source = json!({
        "type": "array",
        "items": [{"type": "string", "enum": ["a", "b"]}, {"const": 1}],
        "additionalItems": {"type": "boolean"},
        "contains": {"type": "string"},
        "minItems": 1
    });
    let node = SchemaNode::from_json(&source).unwrap();
    assert_eq!(node.to_json(), source);
    assert!(is_valid(&node, &json!(["a", 1, true])));
    assert!(!is_valid(&node, &json!(["a", 1, "x"])));
}

#[test]
fn test_failed_assignment_keeps_tree_intact() {
    let mut schema = user_schema();
    let before = schema.clone();
    schema
        .set_default(json!({"id": "u1", "email": "ada@example.com", "age": 36}))
        .unwrap();
    let err = schema
        .set_property("age", SchemaNode::integer().with(|a| a.set_maximum(30.0)).unwrap())
        .unwrap_err();
    assert!(matches!(
        err,
        SchemaConstructionError::ValueViolatesOwnConstraint { .. }
    ));
    schema.clear(Keyword::Default).unwrap();
    assert_eq!(schema, before);
}

//! # Validation Engine
//!
//! Recursive match of a JSON instance against a [`SchemaNode`] tree.
//!
//! ## Evaluation Order
//!
//! For every node, in this order:
//!
//! 1. **type**: a failed type check skips the kind-specific checks, while
//!    composition and conditionals still run.
//! 2. **const**, then **enum**, both by deep equality.
//! 3. **Kind-specific keywords**, applied only when the instance has the
//!    kind's JSON type.
//! 4. **allOf**, **anyOf**, **oneOf**, **not**.
//! 5. **if/then/else**: the probe's own errors are discarded.
//!
//! Literal nodes short-circuit: `true` accepts, `false` emits one `false`
//! error.
//!
//! ## Failure Model
//!
//! The engine never fails. Patterns were compiled when the tree was built
//! and every violation becomes a [`ValidationError`] in the returned
//! [`ValidationResult`]. The only side effects are `tracing` events.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::OnceLock;

use jsm_core::canonical::render;
use jsm_core::{json_equal, FormatRegistry, JsonPointer, JsonType};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Number, Value};

use crate::array::{ArrayKeywords, Items};
use crate::error::SchemaValidationError;
use crate::keyword::Keyword;
use crate::node::{GenericKeywords, KindKeywords, SchemaNode};
use crate::number::NumberKeywords;
use crate::object::{Dependency, ObjectKeywords};
use crate::report::{ValidationError, ValidationResult};
use crate::serialize::{number_value, types_value};
use crate::string::StringKeywords;

/// Tunables for a [`Validator`].
///
/// Deserializable from YAML or JSON; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorOptions {
    /// Absolute tolerance on the quotient when checking `multipleOf` for
    /// non-integer operands.
    pub multiple_of_epsilon: f64,
    /// When false, `format` is an annotation only.
    pub assert_formats: bool,
    /// When true, `anyOf`/`oneOf` errors carry their branch errors as
    /// `causes`.
    pub nest_branch_errors: bool,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            multiple_of_epsilon: 1e-9,
            assert_formats: true,
            nest_branch_errors: true,
        }
    }
}

/// A configured validation engine: options plus a format registry.
///
/// Validators are immutable during validation and can be shared across
/// threads.
#[derive(Debug, Clone)]
pub struct Validator {
    options: ValidatorOptions,
    formats: FormatRegistry,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidatorOptions::default())
    }
}

impl Validator {
    /// A validator with the default format registry.
    pub fn new(options: ValidatorOptions) -> Self {
        Self {
            options,
            formats: FormatRegistry::with_defaults(),
        }
    }

    /// Replace the format registry.
    #[must_use]
    pub fn with_formats(mut self, formats: FormatRegistry) -> Self {
        self.formats = formats;
        self
    }

    /// The process-wide default validator used by the free functions and by
    /// schema construction checks.
    pub fn shared() -> &'static Validator {
        static SHARED: OnceLock<Validator> = OnceLock::new();
        SHARED.get_or_init(Validator::default)
    }

    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    pub fn formats(&self) -> &FormatRegistry {
        &self.formats
    }

    pub fn formats_mut(&mut self) -> &mut FormatRegistry {
        &mut self.formats
    }

    /// Validate `instance` against `node`, reporting paths relative to
    /// `path`.
    pub fn validate(&self, node: &SchemaNode, instance: &Value, path: &JsonPointer) -> ValidationResult {
        let mut errors = Vec::new();
        self.check(node, instance, path, &mut errors);
        ValidationResult::new(errors)
    }

    /// Boolean verdict.
    pub fn is_valid(&self, node: &SchemaNode, instance: &Value) -> bool {
        self.validate(node, instance, &JsonPointer::root()).is_valid()
    }

    /// Strict adapter: `Ok(())` or every violation as an error.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaValidationError`] when the instance does not conform.
    pub fn validate_strict(&self, node: &SchemaNode, instance: &Value) -> Result<(), SchemaValidationError> {
        self.validate(node, instance, &JsonPointer::root()).into_result()
    }

    fn check(&self, node: &SchemaNode, instance: &Value, path: &JsonPointer, errors: &mut Vec<ValidationError>) {
        match node.kind {
            KindKeywords::Literal(true) => return,
            KindKeywords::Literal(false) => {
                errors.push(ValidationError::new(
                    path.clone(),
                    Keyword::False,
                    "the false schema rejects every instance",
                    Value::Bool(false),
                    instance.clone(),
                ));
                return;
            }
            _ => {}
        }
        let generic = &node.generic;
        let type_ok = check_type(generic, instance, path, errors);
        check_const_enum(generic, instance, path, errors);
        if type_ok {
            match (&node.kind, instance) {
                (KindKeywords::String(k), Value::String(s)) => self.check_string(k, s, instance, path, errors),
                (KindKeywords::Number(k), Value::Number(n)) => self.check_number(k, n, instance, path, errors),
                (KindKeywords::Object(k), Value::Object(map)) => self.check_object(k, map, instance, path, errors),
                (KindKeywords::Array(k), Value::Array(items)) => self.check_array(k, items, instance, path, errors),
                _ => {}
            }
        }
        self.check_composition(generic, instance, path, errors);
        self.check_conditional(generic, instance, path, errors);
    }

    fn check_string(
        &self,
        k: &StringKeywords,
        s: &str,
        instance: &Value,
        path: &JsonPointer,
        errors: &mut Vec<ValidationError>,
    ) {
        let len = s.chars().count() as u64;
        if let Some(min) = k.min_length {
            if len < min {
                errors.push(ValidationError::new(
                    path.clone(),
                    Keyword::MinLength,
                    format!("{} is shorter than {min} character(s)", render(instance)),
                    json!(min),
                    json!(len),
                ));
            }
        }
        if let Some(max) = k.max_length {
            if len > max {
                errors.push(ValidationError::new(
                    path.clone(),
                    Keyword::MaxLength,
                    format!("{} is longer than {max} character(s)", render(instance)),
                    json!(max),
                    json!(len),
                ));
            }
        }
        if let Some(pattern) = &k.pattern {
            if !pattern.matches(s) {
                errors.push(ValidationError::new(
                    path.clone(),
                    Keyword::Pattern,
                    format!("{} does not match {:?}", render(instance), pattern.as_str()),
                    json!(pattern.as_str()),
                    instance.clone(),
                ));
            }
        }
        if let Some(format) = &k.format {
            if !self.options.assert_formats {
                return;
            }
            match self.formats.check(format, s) {
                Some(true) => {}
                Some(false) => errors.push(ValidationError::new(
                    path.clone(),
                    Keyword::Format,
                    format!("{} is not a valid {format:?}", render(instance)),
                    json!(format),
                    instance.clone(),
                )),
                None => tracing::debug!(%format, %path, "unknown format treated as annotation"),
            }
        }
    }

    fn check_number(
        &self,
        k: &NumberKeywords,
        n: &Number,
        instance: &Value,
        path: &JsonPointer,
        errors: &mut Vec<ValidationError>,
    ) {
        let mut bound = |keyword: Keyword, limit: Option<f64>, violated: fn(Ordering) -> bool, relation: &str| {
            let Some(limit) = limit else {
                return;
            };
            if compare_to_limit(n, limit).is_some_and(violated) {
                errors.push(ValidationError::new(
                    path.clone(),
                    keyword,
                    format!("{} is {relation} {}", render(instance), render(&number_value(limit))),
                    number_value(limit),
                    instance.clone(),
                ));
            }
        };
        bound(Keyword::Minimum, k.minimum, Ordering::is_lt, "less than the minimum of");
        bound(Keyword::Maximum, k.maximum, Ordering::is_gt, "greater than the maximum of");
        bound(
            Keyword::ExclusiveMinimum,
            k.exclusive_minimum,
            Ordering::is_le,
            "less than or equal to the exclusive minimum of",
        );
        bound(
            Keyword::ExclusiveMaximum,
            k.exclusive_maximum,
            Ordering::is_ge,
            "greater than or equal to the exclusive maximum of",
        );
        if let Some(divisor) = k.multiple_of {
            if !is_multiple_of(n, divisor, self.options.multiple_of_epsilon) {
                errors.push(ValidationError::new(
                    path.clone(),
                    Keyword::MultipleOf,
                    format!(
                        "{} is not a multiple of {}",
                        render(instance),
                        render(&number_value(divisor))
                    ),
                    number_value(divisor),
                    instance.clone(),
                ));
            }
        }
    }

    fn check_object(
        &self,
        k: &ObjectKeywords,
        map: &Map<String, Value>,
        instance: &Value,
        path: &JsonPointer,
        errors: &mut Vec<ValidationError>,
    ) {
        if let Some(required) = &k.required {
            for name in required.iter().filter(|name| !map.contains_key(*name)) {
                errors.push(ValidationError::new(
                    path.clone(),
                    Keyword::Required,
                    format!("{name:?} is a required property"),
                    json!(name),
                    Value::Null,
                ));
            }
        }
        let count = map.len() as u64;
        if let Some(min) = k.min_properties {
            if count < min {
                errors.push(ValidationError::new(
                    path.clone(),
                    Keyword::MinProperties,
                    format!("object has {count} properties, fewer than {min}"),
                    json!(min),
                    json!(count),
                ));
            }
        }
        if let Some(max) = k.max_properties {
            if count > max {
                errors.push(ValidationError::new(
                    path.clone(),
                    Keyword::MaxProperties,
                    format!("object has {count} properties, more than {max}"),
                    json!(max),
                    json!(count),
                ));
            }
        }

        for (key, value) in map {
            let child = path.push_property(key);
            if let Some(schema) = k.properties.get(key) {
                self.check(schema, value, &child, errors);
                continue;
            }
            let mut matched = false;
            for entry in k.pattern_properties.values().filter(|e| e.pattern.matches(key)) {
                matched = true;
                self.check(&entry.schema, value, &child, errors);
            }
            if matched {
                continue;
            }
            match k.additional_properties.as_deref() {
                Some(extra) if extra.is_false() => errors.push(ValidationError::new(
                    child,
                    Keyword::AdditionalProperties,
                    format!("additional property {key:?} is not allowed"),
                    Value::Bool(false),
                    value.clone(),
                )),
                Some(extra) => self.check(extra, value, &child, errors),
                None => {}
            }
        }

        if let Some(names) = k.property_names.as_deref() {
            for key in map.keys() {
                let probe = Value::String(key.clone());
                let sub = self.validate(names, &probe, path);
                if sub.is_valid() {
                    continue;
                }
                errors.push(
                    ValidationError::new(
                        path.clone(),
                        Keyword::PropertyNames,
                        format!("property name {key:?} is invalid"),
                        names.to_json(),
                        probe,
                    )
                    .with_causes(sub.into_errors()),
                );
            }
        }

        for (trigger, dependency) in &k.dependencies {
            if !map.contains_key(trigger) {
                continue;
            }
            match dependency {
                Dependency::Properties(companions) => {
                    for name in companions.iter().filter(|name| !map.contains_key(*name)) {
                        errors.push(ValidationError::new(
                            path.clone(),
                            Keyword::Dependencies,
                            format!("{name:?} is a dependency of {trigger:?}"),
                            json!(name),
                            Value::Null,
                        ));
                    }
                }
                Dependency::Schema(schema) => self.check(schema, instance, path, errors),
            }
        }
    }

    fn check_array(
        &self,
        k: &ArrayKeywords,
        items: &[Value],
        instance: &Value,
        path: &JsonPointer,
        errors: &mut Vec<ValidationError>,
    ) {
        let count = items.len() as u64;
        if let Some(min) = k.min_items {
            if count < min {
                errors.push(ValidationError::new(
                    path.clone(),
                    Keyword::MinItems,
                    format!("array has {count} items, fewer than {min}"),
                    json!(min),
                    json!(count),
                ));
            }
        }
        if let Some(max) = k.max_items {
            if count > max {
                errors.push(ValidationError::new(
                    path.clone(),
                    Keyword::MaxItems,
                    format!("array has {count} items, more than {max}"),
                    json!(max),
                    json!(count),
                ));
            }
        }
        if k.unique_items {
            if let Some((first, dup)) = first_duplicate(items) {
                errors.push(ValidationError::new(
                    path.clone(),
                    Keyword::UniqueItems,
                    format!("item {dup} duplicates item {first}"),
                    Value::Bool(true),
                    json!({ "index": dup, "duplicates": first }),
                ));
            }
        }

        match &k.items {
            Some(Items::Single(schema)) => {
                for (i, item) in items.iter().enumerate() {
                    self.check(schema, item, &path.push_index(i), errors);
                }
            }
            Some(Items::Tuple(schemas)) => {
                for (i, item) in items.iter().enumerate() {
                    let child = path.push_index(i);
                    if let Some(schema) = schemas.get(i) {
                        self.check(schema, item, &child, errors);
                        continue;
                    }
                    match k.additional_items.as_deref() {
                        Some(extra) if extra.is_false() => errors.push(ValidationError::new(
                            child,
                            Keyword::AdditionalItems,
                            format!(
                                "item {i} is beyond the {}-item tuple and additional items are not allowed",
                                schemas.len()
                            ),
                            Value::Bool(false),
                            item.clone(),
                        )),
                        Some(extra) => self.check(extra, item, &child, errors),
                        None => {}
                    }
                }
            }
            None => {}
        }

        if let Some(contains) = k.contains.as_deref() {
            if !items.iter().any(|item| self.is_valid(contains, item)) {
                errors.push(ValidationError::new(
                    path.clone(),
                    Keyword::Contains,
                    "no item matches the contains schema",
                    contains.to_json(),
                    instance.clone(),
                ));
            }
        }
    }

    fn check_composition(
        &self,
        generic: &GenericKeywords,
        instance: &Value,
        path: &JsonPointer,
        errors: &mut Vec<ValidationError>,
    ) {
        if let Some(branches) = &generic.all_of {
            for branch in branches {
                self.check(branch, instance, path, errors);
            }
        }

        if let Some(branches) = &generic.any_of {
            let mut causes = Vec::new();
            let mut matched = None;
            for (i, branch) in branches.iter().enumerate() {
                let result = self.validate(branch, instance, path);
                if result.is_valid() {
                    matched = Some(i);
                    break;
                }
                causes.extend(result.into_errors());
            }
            tracing::trace!(%path, ?matched, "anyOf evaluated");
            if matched.is_none() {
                let error = ValidationError::new(
                    path.clone(),
                    Keyword::AnyOf,
                    format!(
                        "{} is not valid under any of the {} given schemas",
                        render(instance),
                        branches.len()
                    ),
                    branches_json(branches),
                    instance.clone(),
                );
                errors.push(self.nest(error, causes));
            }
        }

        if let Some(branches) = &generic.one_of {
            let mut causes = Vec::new();
            let mut matched = Vec::new();
            for (i, branch) in branches.iter().enumerate() {
                let result = self.validate(branch, instance, path);
                if result.is_valid() {
                    matched.push(i);
                } else {
                    causes.extend(result.into_errors());
                }
            }
            tracing::trace!(%path, ?matched, "oneOf evaluated");
            match matched.len() {
                1 => {}
                0 => {
                    let error = ValidationError::new(
                        path.clone(),
                        Keyword::OneOf,
                        format!(
                            "{} is not valid under any of the {} given schemas",
                            render(instance),
                            branches.len()
                        ),
                        json!(1),
                        json!(matched),
                    );
                    errors.push(self.nest(error, causes));
                }
                _ => errors.push(ValidationError::new(
                    path.clone(),
                    Keyword::OneOf,
                    format!(
                        "{} is valid under more than one of the given schemas (branches {matched:?})",
                        render(instance)
                    ),
                    json!(1),
                    json!(matched),
                )),
            }
        }

        if let Some(negated) = generic.not.as_deref() {
            if self.is_valid(negated, instance) {
                errors.push(ValidationError::new(
                    path.clone(),
                    Keyword::Not,
                    format!("{} must not be valid under the given schema", render(instance)),
                    negated.to_json(),
                    instance.clone(),
                ));
            }
        }
    }

    fn check_conditional(
        &self,
        generic: &GenericKeywords,
        instance: &Value,
        path: &JsonPointer,
        errors: &mut Vec<ValidationError>,
    ) {
        let Some(condition) = generic.if_schema.as_deref() else {
            return;
        };
        if self.is_valid(condition, instance) {
            tracing::trace!(%path, "if matched; applying then");
            if let Some(then) = generic.then_schema.as_deref() {
                self.check(then, instance, path, errors);
            }
        } else {
            tracing::trace!(%path, "if did not match; applying else");
            if let Some(otherwise) = generic.else_schema.as_deref() {
                self.check(otherwise, instance, path, errors);
            }
        }
    }

    fn nest(&self, error: ValidationError, causes: Vec<ValidationError>) -> ValidationError {
        if self.options.nest_branch_errors {
            error.with_causes(causes)
        } else {
            error
        }
    }
}

fn check_type(
    generic: &GenericKeywords,
    instance: &Value,
    path: &JsonPointer,
    errors: &mut Vec<ValidationError>,
) -> bool {
    let Some(types) = &generic.types else {
        return true;
    };
    if types.iter().any(|t| t.matches(instance)) {
        return true;
    }
    errors.push(ValidationError::new(
        path.clone(),
        Keyword::Type,
        format!("{} is not of type {}", render(instance), type_names(types)),
        types_value(types),
        json!(JsonType::of(instance).as_str()),
    ));
    false
}

fn check_const_enum(
    generic: &GenericKeywords,
    instance: &Value,
    path: &JsonPointer,
    errors: &mut Vec<ValidationError>,
) {
    if let Some(expected) = &generic.const_value {
        if !json_equal(expected, instance) {
            errors.push(ValidationError::new(
                path.clone(),
                Keyword::Const,
                format!("{} does not equal the constant {}", render(instance), render(expected)),
                expected.clone(),
                instance.clone(),
            ));
        }
    }
    if let Some(members) = &generic.enum_values {
        if !members.iter().any(|m| json_equal(m, instance)) {
            let expected = Value::Array(members.clone());
            errors.push(ValidationError::new(
                path.clone(),
                Keyword::Enum,
                format!("{} is not one of {}", render(instance), render(&expected)),
                expected,
                instance.clone(),
            ));
        }
    }
}

fn type_names(types: &BTreeSet<JsonType>) -> String {
    types
        .iter()
        .map(|t| format!("{:?}", t.as_str()))
        .collect::<Vec<_>>()
        .join(" or ")
}

fn branches_json(branches: &[SchemaNode]) -> Value {
    Value::Array(branches.iter().map(SchemaNode::to_json).collect())
}

/// Index pair `(first, duplicate)` of the first repeated element, scanning
/// the duplicate index left to right.
fn first_duplicate(items: &[Value]) -> Option<(usize, usize)> {
    (1..items.len()).find_map(|j| {
        items[..j]
            .iter()
            .position(|earlier| json_equal(earlier, &items[j]))
            .map(|i| (i, j))
    })
}

/// The instance as an exact integer, when it is stored as one.
fn exact_integer(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

/// An integral `f64` keyword value that converts to `i128` without loss.
fn integral_limit(limit: f64) -> Option<i128> {
    (limit.fract() == 0.0 && limit >= i128::MIN as f64 && limit < i128::MAX as f64)
        .then_some(limit as i128)
}

/// Orders an instance against a bound. Integer instances are compared
/// exactly against integral bounds; anything else goes through `f64`.
fn compare_to_limit(n: &Number, limit: f64) -> Option<Ordering> {
    if let (Some(i), Some(l)) = (exact_integer(n), integral_limit(limit)) {
        return Some(i.cmp(&l));
    }
    n.as_f64()?.partial_cmp(&limit)
}

/// Exact for integer operands, otherwise the quotient must be within
/// `epsilon` of an integer.
fn is_multiple_of(n: &Number, divisor: f64, epsilon: f64) -> bool {
    if let (Some(i), Some(d)) = (exact_integer(n), integral_limit(divisor)) {
        return i % d == 0;
    }
    let Some(x) = n.as_f64() else {
        return false;
    };
    let quotient = x / divisor;
    quotient.is_finite() && (quotient - quotient.round()).abs() <= epsilon
}

/// Validate with the shared default validator.
pub fn validate(node: &SchemaNode, instance: &Value, path: &JsonPointer) -> ValidationResult {
    Validator::shared().validate(node, instance, path)
}

/// Boolean verdict with the shared default validator.
pub fn is_valid(node: &SchemaNode, instance: &Value) -> bool {
    Validator::shared().is_valid(node, instance)
}

/// Strict adapter with the shared default validator.
///
/// # Errors
///
/// Returns [`SchemaValidationError`] carrying every violation when the
/// instance does not conform.
pub fn validate_strict(node: &SchemaNode, instance: &Value) -> Result<(), SchemaValidationError> {
    Validator::shared().validate_strict(node, instance)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> JsonPointer {
        JsonPointer::root()
    }

    #[test]
    fn test_false_schema_single_error() {
        let r = validate(&SchemaNode::literal(false), &json!({"a": 1}), &root());
        assert_eq!(r.len(), 1);
        assert_eq!(r.errors()[0].keyword, Keyword::False);
        assert!(is_valid(&SchemaNode::literal(true), &json!([1, 2])));
    }

    #[test]
    fn test_type_failure_skips_kind_checks() {
        let node = SchemaNode::string().with(|n| n.set_min_length(3)).unwrap();
        let r = validate(&node, &json!(5), &root());
        assert_eq!(r.len(), 1);
        assert_eq!(r.errors()[0].keyword, Keyword::Type);
        assert_eq!(r.errors()[0].actual, json!("integer"));
        assert_eq!(r.errors()[0].expected, json!("string"));
    }

    #[test]
    fn test_type_failure_still_runs_composition() {
        let node = SchemaNode::string()
            .with(|n| n.set_not(SchemaNode::integer()))
            .unwrap();
        let r = validate(&node, &json!(5), &root());
        let keywords: Vec<Keyword> = r.errors().iter().map(|e| e.keyword).collect();
        assert_eq!(keywords, vec![Keyword::Type, Keyword::Not]);
    }

    #[test]
    fn test_untyped_kind_ignores_other_types() {
        let node = SchemaNode::untyped(crate::node::Kind::String)
            .with(|n| n.set_min_length(2))
            .unwrap();
        assert!(is_valid(&node, &json!(7)));
        assert!(!is_valid(&node, &json!("a")));
    }

    #[test]
    fn test_integer_accepts_integral_float() {
        assert!(is_valid(&SchemaNode::integer(), &json!(3.0)));
        assert!(!is_valid(&SchemaNode::integer(), &json!(3.5)));
    }

    #[test]
    fn test_length_counts_scalar_values() {
        let node = SchemaNode::string().with(|n| n.set_max_length(2)).unwrap();
        assert!(is_valid(&node, &json!("日本")));
        assert!(!is_valid(&node, &json!("日本語")));
    }

    #[test]
    fn test_multiple_of_tolerance() {
        let node = SchemaNode::number()
            .with(|n| n.set_minimum(0.0)?.set_multiple_of(0.01))
            .unwrap();
        assert!(is_valid(&node, &json!(9.99)));
        let r = validate(&node, &json!(9.999), &root());
        assert_eq!(r.len(), 1);
        assert_eq!(r.errors()[0].keyword, Keyword::MultipleOf);
        assert!(r.errors()[0].path.is_root());
    }

    #[test]
    fn test_multiple_of_exact_for_integers() {
        assert!(is_multiple_of(&Number::from(9_007_199_254_740_993_i64), 3.0, 1e-9));
        assert!(!is_multiple_of(&Number::from(10), 3.0, 1e-9));
        assert!(is_multiple_of(&Number::from(-12), 4.0, 1e-9));
    }

    #[test]
    fn test_multiple_of_divisor_past_i64_range() {
        let two_pow_63 = 9_223_372_036_854_775_808.0;
        assert!(!is_multiple_of(&Number::from(i64::MAX), two_pow_63, 1e-9));
        assert!(is_multiple_of(&Number::from(9_223_372_036_854_775_808_u64), two_pow_63, 1e-9));
        assert!(is_multiple_of(&Number::from(0), two_pow_63, 1e-9));
    }

    #[test]
    fn test_bounds_exact_past_f64_precision() {
        let limit = 9_007_199_254_740_992.0;
        let capped = SchemaNode::integer().with(|n| n.set_maximum(limit)).unwrap();
        assert!(is_valid(&capped, &json!(9_007_199_254_740_992_i64)));
        let r = validate(&capped, &json!(9_007_199_254_740_993_i64), &root());
        assert_eq!(r.len(), 1);
        assert_eq!(r.errors()[0].keyword, Keyword::Maximum);

        let floor = SchemaNode::integer()
            .with(|n| n.set_exclusive_minimum(limit))
            .unwrap();
        assert!(!is_valid(&floor, &json!(9_007_199_254_740_992_i64)));
        assert!(is_valid(&floor, &json!(9_007_199_254_740_993_i64)));

        let big = SchemaNode::integer().with(|n| n.set_minimum(1e19)).unwrap();
        assert!(!is_valid(&big, &json!(u64::MAX / 2)));
        assert!(is_valid(&big, &json!(u64::MAX)));
    }

    #[test]
    fn test_exclusive_bounds() {
        let node = SchemaNode::number()
            .with(|n| n.set_exclusive_minimum(0.0)?.set_exclusive_maximum(1.0))
            .unwrap();
        assert!(!is_valid(&node, &json!(0)));
        assert!(is_valid(&node, &json!(0.5)));
        assert!(!is_valid(&node, &json!(1)));
    }

    #[test]
    fn test_unknown_format_is_annotation() {
        let node = SchemaNode::string().with(|n| n.set_format("x-unheard-of")).unwrap();
        assert!(is_valid(&node, &json!("anything")));
    }

    #[test]
    fn test_format_assertion_can_be_disabled() {
        let node = SchemaNode::string().with(|n| n.set_format("email")).unwrap();
        assert!(!is_valid(&node, &json!("nope")));
        let lenient = Validator::new(ValidatorOptions {
            assert_formats: false,
            ..ValidatorOptions::default()
        });
        assert!(lenient.is_valid(&node, &json!("nope")));
    }

    #[test]
    fn test_required_names_missing_property() {
        let node = SchemaNode::object().with(|n| n.set_required(["id", "email"])).unwrap();
        let r = validate(&node, &json!({"id": "u1"}), &root());
        assert_eq!(r.len(), 1);
        let e = &r.errors()[0];
        assert_eq!(e.keyword, Keyword::Required);
        assert!(e.path.is_root());
        assert!(e.message.contains("email"));
        assert_eq!(e.expected, json!("email"));
    }

    #[test]
    fn test_additional_properties_false_at_key_path() {
        let node = SchemaNode::object()
            .with(|n| {
                n.set_property("a", SchemaNode::any())?
                    .set_pattern_property("^x-", SchemaNode::string())?
                    .set_additional_properties(false)
            })
            .unwrap();
        let r = validate(&node, &json!({"a": 1, "x-y": "ok", "a/b": 2}), &root());
        assert_eq!(r.len(), 1);
        assert_eq!(r.errors()[0].path.as_str(), "/a~1b");
        assert_eq!(r.errors()[0].keyword, Keyword::AdditionalProperties);
        assert_eq!(r.errors()[0].actual, json!(2));
    }

    #[test]
    fn test_pattern_properties_skip_declared_properties() {
        let node = SchemaNode::object()
            .with(|n| {
                n.set_property("x-id", SchemaNode::any())?
                    .set_pattern_property("^x-", SchemaNode::string())
            })
            .unwrap();
        assert!(is_valid(&node, &json!({"x-id": 5})));
        assert!(!is_valid(&node, &json!({"x-other": 5})));
    }

    #[test]
    fn test_additional_properties_schema() {
        let node = SchemaNode::object()
            .with(|n| n.set_additional_properties(SchemaNode::integer()))
            .unwrap();
        let r = validate(&node, &json!({"n": "x"}), &root());
        assert_eq!(r.errors()[0].path.as_str(), "/n");
        assert_eq!(r.errors()[0].keyword, Keyword::Type);
    }

    #[test]
    fn test_property_names() {
        let names = SchemaNode::string().with(|n| n.set_max_length(3)).unwrap();
        let node = SchemaNode::object().with(|n| n.set_property_names(names)).unwrap();
        let r = validate(&node, &json!({"ok": 1, "toolong": 2}), &root());
        assert_eq!(r.len(), 1);
        assert_eq!(r.errors()[0].keyword, Keyword::PropertyNames);
        assert_eq!(r.errors()[0].actual, json!("toolong"));
    }

    #[test]
    fn test_dependencies() {
        let node = SchemaNode::object()
            .with(|n| {
                n.set_dependency("card", vec!["billing".to_string(), "cvv".to_string()])?
                    .set_dependency(
                        "gift",
                        SchemaNode::object().with(|d| d.set_required(["message"]))?,
                    )
            })
            .unwrap();
        assert!(is_valid(&node, &json!({"billing": "x"})));
        let r = validate(&node, &json!({"card": 1, "billing": "x"}), &root());
        assert_eq!(r.len(), 1);
        assert_eq!(r.errors()[0].keyword, Keyword::Dependencies);
        assert_eq!(r.errors()[0].expected, json!("cvv"));
        let r = validate(&node, &json!({"gift": true}), &root());
        assert_eq!(r.errors()[0].keyword, Keyword::Required);
    }

    #[test]
    fn test_unique_items_reports_first_duplicate() {
        let node = SchemaNode::array().with(|n| n.set_unique_items(true)).unwrap();
        let r = validate(&node, &json!([1, 2, 2, 1]), &root());
        assert_eq!(r.len(), 1);
        assert_eq!(r.errors()[0].actual, json!({"index": 2, "duplicates": 1}));
        assert!(is_valid(&node, &json!([{"a": 1}, {"a": 2}])));
        assert!(!is_valid(&node, &json!([1, 1.0])));
    }

    #[test]
    fn test_tuple_additional_items_false() {
        let node = SchemaNode::array()
            .with(|n| {
                n.set_tuple_items(vec![
                    SchemaNode::string(),
                    SchemaNode::number(),
                    SchemaNode::boolean(),
                ])?
                .set_additional_items(false)
            })
            .unwrap();
        let r = validate(&node, &json!(["n", 1, true, "extra"]), &root());
        assert_eq!(r.len(), 1);
        assert_eq!(r.errors()[0].keyword, Keyword::AdditionalItems);
        assert_eq!(r.errors()[0].path.as_str(), "/3");
    }

    #[test]
    fn test_additional_items_ignored_without_tuple() {
        let node = SchemaNode::array()
            .with(|n| n.set_items(SchemaNode::integer())?.set_additional_items(false))
            .unwrap();
        assert!(is_valid(&node, &json!([1, 2, 3])));
    }

    #[test]
    fn test_contains() {
        let node = SchemaNode::array()
            .with(|n| n.set_contains(SchemaNode::string()))
            .unwrap();
        assert!(is_valid(&node, &json!([1, "a"])));
        let r = validate(&node, &json!([]), &root());
        assert_eq!(r.len(), 1);
        assert_eq!(r.errors()[0].keyword, Keyword::Contains);
    }

    #[test]
    fn test_any_of_nests_causes() {
        let node = SchemaNode::any()
            .with(|n| n.set_any_of(vec![SchemaNode::string(), SchemaNode::boolean()]))
            .unwrap();
        let r = validate(&node, &json!(3), &root());
        assert_eq!(r.len(), 1);
        assert_eq!(r.errors()[0].keyword, Keyword::AnyOf);
        assert_eq!(r.errors()[0].causes.len(), 2);

        let flat = Validator::new(ValidatorOptions {
            nest_branch_errors: false,
            ..ValidatorOptions::default()
        });
        assert!(flat.validate(&node, &json!(3), &root()).errors()[0].causes.is_empty());
    }

    #[test]
    fn test_one_of_multiple_matches() {
        let a = SchemaNode::object().with(|n| n.set_required(["a"])).unwrap();
        let b = SchemaNode::object().with(|n| n.set_required(["b"])).unwrap();
        let node = SchemaNode::any().with(|n| n.set_one_of(vec![a, b])).unwrap();
        let r = validate(&node, &json!({"a": 1, "b": 2}), &root());
        assert_eq!(r.len(), 1);
        assert_eq!(r.errors()[0].keyword, Keyword::OneOf);
        assert_eq!(r.errors()[0].actual, json!([0, 1]));
        assert!(r.errors()[0].message.contains("more than one"));

        let r = validate(&node, &json!({}), &root());
        assert_eq!(r.errors()[0].actual, json!([]));
        assert!(is_valid(&node, &json!({"a": 1})));
    }

    #[test]
    fn test_all_of_appends_branch_errors() {
        let node = SchemaNode::any()
            .with(|n| {
                n.set_all_of(vec![
                    SchemaNode::string(),
                    SchemaNode::any().with(|b| b.set_const(json!("x")))?,
                ])
            })
            .unwrap();
        let r = validate(&node, &json!(1), &root());
        let keywords: Vec<Keyword> = r.errors().iter().map(|e| e.keyword).collect();
        assert_eq!(keywords, vec![Keyword::Type, Keyword::Const]);
    }

    #[test]
    fn test_conditional_then_only() {
        let adult = SchemaNode::object()
            .with(|n| {
                n.set_property("age", SchemaNode::integer().with(|a| a.set_minimum(18.0))?)?
                    .set_required(["age"])
            })
            .unwrap();
        let licensed = SchemaNode::object()
            .with(|n| n.set_required(["driverLicense"]))
            .unwrap();
        let node = SchemaNode::object()
            .with(|n| n.set_if(adult)?.set_then(licensed))
            .unwrap();
        let r = validate(&node, &json!({"age": 20}), &root());
        assert_eq!(r.len(), 1);
        assert_eq!(r.errors()[0].keyword, Keyword::Required);
        assert!(is_valid(&node, &json!({"age": 12})));
    }

    #[test]
    fn test_conditional_else_only() {
        let adult = SchemaNode::object()
            .with(|n| {
                n.set_property("age", SchemaNode::integer().with(|a| a.set_minimum(18.0))?)?
                    .set_required(["age"])
            })
            .unwrap();
        let guardian = SchemaNode::object()
            .with(|n| {
                n.set_property("guardian", SchemaNode::string().with(|g| g.set_min_length(1))?)?
                    .set_required(["guardian"])
            })
            .unwrap();
        let node = SchemaNode::object()
            .with(|n| n.set_if(adult)?.set_else(guardian))
            .unwrap();

        let r = validate(&node, &json!({"age": 12}), &root());
        assert_eq!(r.len(), 1);
        assert_eq!(r.errors()[0].keyword, Keyword::Required);
        assert!(r.errors()[0].path.is_root());

        let r = validate(&node, &json!({"age": 12, "guardian": ""}), &root());
        assert_eq!(r.len(), 1);
        assert_eq!(r.errors()[0].keyword, Keyword::MinLength);
        assert_eq!(r.errors()[0].path.as_str(), "/guardian");

        assert!(is_valid(&node, &json!({"age": 20})));
    }

    #[test]
    fn test_then_without_if_is_inert() {
        let node = SchemaNode::any()
            .with(|n| n.set_then(SchemaNode::literal(false)))
            .unwrap();
        assert!(is_valid(&node, &json!(1)));
    }

    #[test]
    fn test_nested_paths_escape() {
        let node = SchemaNode::object()
            .with(|n| {
                n.set_property(
                    "a~b",
                    SchemaNode::array().with(|a| a.set_items(SchemaNode::string()))?,
                )
            })
            .unwrap();
        let r = validate(&node, &json!({"a~b": ["ok", 4]}), &root());
        assert_eq!(r.errors()[0].path.as_str(), "/a~0b/1");
    }

    #[test]
    fn test_validate_relative_to_path() {
        let base = JsonPointer::parse("/payload").unwrap();
        let r = validate(&SchemaNode::string(), &json!(1), &base);
        assert_eq!(r.errors()[0].path.as_str(), "/payload");
    }

    #[test]
    fn test_validate_strict() {
        assert!(validate_strict(&SchemaNode::string(), &json!("a")).is_ok());
        let err = validate_strict(&SchemaNode::string(), &json!(1)).unwrap_err();
        assert_eq!(err.first().unwrap().keyword, Keyword::Type);
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let opts: ValidatorOptions = serde_json::from_value(json!({"assert_formats": false})).unwrap();
        assert!(!opts.assert_formats);
        assert!(opts.nest_branch_errors);
        assert!((opts.multiple_of_epsilon - 1e-9).abs() < f64::EPSILON);
        assert!(serde_json::from_value::<ValidatorOptions>(json!({"bogus": 1})).is_err());
    }
}

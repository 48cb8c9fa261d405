//! # Canonical Serialization: JCS-Compatible Value Keys
//!
//! This module defines `CanonicalBytes`, the RFC 8785 rendering of a JSON
//! value. Two values that are deep-equal under [`crate::json_equal`] render
//! to the same canonical bytes, which makes the bytes usable as a hash key
//! for duplicate detection (`enum` member uniqueness) and as a stable,
//! key-sorted rendering of literals in diagnostics.
//!
//! ## Invariants
//!
//! - Object keys are sorted, separators are compact.
//! - Numbers use the ECMAScript shortest round-trip form, so `1` and `1.0`
//!   produce identical bytes.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by JCS canonicalization.
///
/// The inner `Vec<u8>` is private; the only constructors are
/// [`CanonicalBytes::new`] and [`CanonicalBytes::of_value`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError::SerializationFailed` if the value
    /// cannot be represented as JSON.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        Self::of_value(&value)
    }

    /// Canonicalize an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError::SerializationFailed` if JCS
    /// serialization fails.
    pub fn of_value(value: &Value) -> Result<Self, CanonicalizationError> {
        let s = serde_jcs::to_string(value)?;
        Ok(Self(s.into_bytes()))
    }

    /// Access the canonical bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The canonical form as text. JCS output is always UTF-8.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Returns the length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Display for CanonicalBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render a value for human-readable diagnostics.
///
/// Falls back to `serde_json`'s compact form if canonicalization fails.
pub fn render(value: &Value) -> String {
    match CanonicalBytes::of_value(value) {
        Ok(cb) => cb.as_str().to_string(),
        Err(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_canonical_bytes_sorted_keys() {
        let data = json!({"z": 1, "m": 2, "a": 3});
        let cb = CanonicalBytes::of_value(&data).unwrap();
        assert_eq!(cb.as_str(), r#"{"a":3,"m":2,"z":1}"#);
    }

    #[test]
    fn test_canonical_bytes_nested() {
        let data = json!({
            "outer": {"b": 2, "a": 1},
            "list": [3, 2, 1]
        });
        let cb = CanonicalBytes::of_value(&data).unwrap();
        assert_eq!(cb.as_str(), r#"{"list":[3,2,1],"outer":{"a":1,"b":2}}"#);
    }

    #[test]
    fn test_integral_float_matches_integer() {
        let a = CanonicalBytes::of_value(&json!(1)).unwrap();
        let b = CanonicalBytes::of_value(&json!(1.0)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_render_string_literal() {
        assert_eq!(render(&json!("hi")), r#""hi""#);
    }

    fn json_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i32>().prop_map(|n| json!(n)),
            "[a-zA-Z0-9_ ]{0,20}".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 32, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,6}", inner, 0..6)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        /// Canonicalization is deterministic.
        #[test]
        fn canonical_bytes_deterministic(value in json_value()) {
            let a = CanonicalBytes::of_value(&value).unwrap();
            let b = CanonicalBytes::of_value(&value).unwrap();
            prop_assert_eq!(a.as_bytes(), b.as_bytes());
        }

        /// Canonical output parses back to a deep-equal value.
        #[test]
        fn canonical_bytes_valid_json(value in json_value()) {
            let cb = CanonicalBytes::of_value(&value).unwrap();
            let parsed: Value = serde_json::from_slice(cb.as_bytes()).unwrap();
            prop_assert!(crate::json_equal(&parsed, &value));
        }
    }
}

//! # Validation Report Model
//!
//! [`ValidationResult`] is the single outcome type of the validation engine:
//! an ordered list of [`ValidationError`] entries, valid iff the list is
//! empty. Results are plain values. They are never mutated after the engine
//! returns them; [`ValidationResult::combine`] and
//! [`ValidationResult::for_keyword`] build new results.
//!
//! ## Output Format
//!
//! A result serializes as
//!
//! ```json
//! {"valid": false, "errors": [{"path": "/items/3", "keyword": "additionalItems",
//!   "message": "...", "expected": false, "actual": "extra"}]}
//! ```
//!
//! `causes` appears only on `anyOf`/`oneOf` errors that nest the errors of
//! their failed branches.

use std::fmt;

use jsm_core::JsonPointer;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::error::SchemaValidationError;
use crate::keyword::Keyword;

/// A single violation with machine-readable location and cause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// JSON Pointer to the violating location in the instance.
    pub path: JsonPointer,
    /// The schema keyword that was violated.
    pub keyword: Keyword,
    /// Human-readable description of the violation.
    pub message: String,
    /// What the keyword required.
    pub expected: Value,
    /// What the instance supplied.
    pub actual: Value,
    /// Branch errors nested under an `anyOf`/`oneOf` failure.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<ValidationError>,
}

impl ValidationError {
    /// Create a violation without nested causes.
    pub fn new(
        path: JsonPointer,
        keyword: Keyword,
        message: impl Into<String>,
        expected: Value,
        actual: Value,
    ) -> Self {
        Self {
            path,
            keyword,
            message: message.into(),
            expected,
            actual,
            causes: Vec::new(),
        }
    }

    /// Attach nested branch errors.
    #[must_use]
    pub fn with_causes(mut self, causes: Vec<ValidationError>) -> Self {
        self.causes = causes;
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "  (root) [{}]: {}", self.keyword, self.message)
        } else {
            write!(f, "  {} [{}]: {}", self.path, self.keyword, self.message)
        }
    }
}

/// Ordered collection of violations produced by one validation call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// A result holding the given errors, in order.
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    /// A valid (empty) result.
    pub fn valid() -> Self {
        Self::default()
    }

    /// Returns true if there are no violations.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The violations, in engine order.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    /// Concatenate several results, preserving each one's internal order and
    /// the order of the inputs. The combination is valid iff every input is.
    pub fn combine<I>(results: I) -> Self
    where
        I: IntoIterator<Item = ValidationResult>,
    {
        Self {
            errors: results.into_iter().flat_map(|r| r.errors).collect(),
        }
    }

    /// Errors whose keyword is named `keyword`, in their original order.
    ///
    /// Unknown names simply match nothing.
    #[must_use]
    pub fn for_keyword(&self, keyword: &str) -> Self {
        Self {
            errors: self
                .errors
                .iter()
                .filter(|e| e.keyword.as_str() == keyword)
                .cloned()
                .collect(),
        }
    }

    /// Errors reported at exactly `path`.
    #[must_use]
    pub fn at_path(&self, path: &str) -> Self {
        Self {
            errors: self
                .errors
                .iter()
                .filter(|e| e.path.as_str() == path)
                .cloned()
                .collect(),
        }
    }

    /// Convert into `Ok(())` when valid, or the strict-adapter error.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError` carrying every violation when the
    /// result is not valid.
    pub fn into_result(self) -> Result<(), SchemaValidationError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(SchemaValidationError::new(self))
        }
    }

    /// Project into the JSON output document.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationResult", 2)?;
        state.serialize_field("valid", &self.is_valid())?;
        state.serialize_field("errors", &self.errors)?;
        state.end()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl From<Vec<ValidationError>> for ValidationResult {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::new(errors)
    }
}

impl IntoIterator for ValidationResult {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationResult {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

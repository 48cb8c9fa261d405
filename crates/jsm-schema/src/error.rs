//! # Error Types: Construction and Strict Validation
//!
//! Two taxonomies at two lifecycle stages:
//!
//! - [`SchemaConstructionError`] is returned by every schema setter and by
//!   the JSON parser. The node that rejected the assignment keeps its prior
//!   state.
//! - [`SchemaValidationError`] is returned only by the strict adapter
//!   ([`crate::validate_strict`]). The engine itself never fails; it returns
//!   a [`crate::ValidationResult`].
//!
//! Construction errors name the keyword they concern. Errors raised while
//! parsing a nested schema carry the slash-separated location of the
//! offending keyword, e.g. `properties/id/minLength`.

use serde_json::Value;
use thiserror::Error;

use crate::report::{ValidationError, ValidationResult};

/// A schema keyword assignment that would leave the node inconsistent.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaConstructionError {
    /// Attempted to change the node's kind or to use a keyword that does
    /// not belong to the node's kind.
    #[error("type conflict on '{keyword}': {reason}")]
    TypeConflict {
        /// Keyword (or keyword location) being assigned.
        keyword: String,
        /// Why the assignment conflicts with the node's kind.
        reason: String,
    },

    /// Out-of-domain keyword value: bad bound, empty sequence, duplicate
    /// member, non-positive divisor.
    #[error("invalid value for '{keyword}': {reason}")]
    InvalidKeywordValue {
        /// Keyword (or keyword location) being assigned.
        keyword: String,
        /// Why the value is out of domain.
        reason: String,
    },

    /// A regular expression failed to compile.
    #[error("invalid pattern for '{keyword}': {source_error}")]
    InvalidPattern {
        /// Keyword (or keyword location) being assigned.
        keyword: String,
        /// Compiler diagnostic.
        source_error: jsm_core::PatternError,
    },

    /// A `default`, `const` or `enum` value does not satisfy the node's own
    /// constraints.
    #[error("'{keyword}' value {value} violates the schema's own constraints: {reason}")]
    ValueViolatesOwnConstraint {
        /// The value-bearing keyword (`default`, `const` or `enum`).
        keyword: String,
        /// The offending value.
        value: Value,
        /// Summary of the violations the value produced.
        reason: String,
    },
}

impl SchemaConstructionError {
    pub(crate) fn type_conflict(keyword: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::TypeConflict {
            keyword: keyword.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid(keyword: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidKeywordValue {
            keyword: keyword.into(),
            reason: reason.into(),
        }
    }

    /// The keyword (or keyword location) the error concerns.
    pub fn keyword(&self) -> &str {
        match self {
            Self::TypeConflict { keyword, .. }
            | Self::InvalidKeywordValue { keyword, .. }
            | Self::InvalidPattern { keyword, .. }
            | Self::ValueViolatesOwnConstraint { keyword, .. } => keyword,
        }
    }

    /// Prefix the keyword location with the enclosing schema location.
    #[must_use]
    pub fn nested(mut self, segment: &str) -> Self {
        let keyword = match &mut self {
            Self::TypeConflict { keyword, .. }
            | Self::InvalidKeywordValue { keyword, .. }
            | Self::InvalidPattern { keyword, .. }
            | Self::ValueViolatesOwnConstraint { keyword, .. } => keyword,
        };
        *keyword = format!("{segment}/{keyword}");
        self
    }
}

/// An instance rejected by the strict adapter.
///
/// Carries every violation the engine reported, in engine order.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("instance does not conform to schema ({} violation(s)):\n{violations}", violations.len())]
pub struct SchemaValidationError {
    violations: ValidationResult,
}

impl SchemaValidationError {
    pub(crate) fn new(violations: ValidationResult) -> Self {
        Self { violations }
    }

    /// The first violation.
    pub fn first(&self) -> Option<&ValidationError> {
        self.violations.errors().first()
    }

    /// All violations.
    pub fn violations(&self) -> &[ValidationError] {
        self.violations.errors()
    }

    /// Consume the error and return the underlying result.
    pub fn into_result(self) -> ValidationResult {
        self.violations
    }
}

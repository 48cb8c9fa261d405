//! # Error Types: Core Primitive Failures
//!
//! Errors raised by the primitives in this crate. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Pattern compilation failures carry the offending source and the
//!   compiler's reason, so schema construction can report them verbatim.
//! - Canonicalization failures wrap the underlying serializer error.
//! - Pointer parse failures name the offending token.

use thiserror::Error;

/// Top-level error type for the core primitives.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Canonicalization failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// A regular expression failed to compile.
    #[error("pattern error: {0}")]
    Pattern(#[from] PatternError),

    /// A JSON Pointer could not be parsed.
    #[error("pointer error: {0}")]
    Pointer(#[from] PointerError),

    /// YAML input could not be mapped onto the JSON data model.
    #[error("yaml conversion error: {0}")]
    Yaml(String),
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// A regular expression source that does not compile.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid pattern {source_text:?}: {reason}")]
pub struct PatternError {
    /// The pattern source as supplied by the caller.
    pub source_text: String,
    /// Compiler diagnostic.
    pub reason: String,
}

/// Error parsing a JSON Pointer string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PointerError {
    /// A non-empty pointer must start with `/`.
    #[error("JSON Pointer {0:?} must be empty or start with '/'")]
    MissingLeadingSlash(String),

    /// `~` must be followed by `0` or `1`.
    #[error("JSON Pointer {pointer:?} contains an invalid escape in token {token:?}")]
    InvalidEscape {
        /// The full pointer text.
        pointer: String,
        /// The token holding the bad escape.
        token: String,
    },
}

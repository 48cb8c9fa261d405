//! # Pattern Matching
//!
//! `Pattern` is the compiled regular expression behind the `pattern` and
//! `patternProperties` keywords. Compilation happens once, at schema
//! construction time, so a malformed pattern can never surface during
//! validation.
//!
//! Matching is unanchored search, as JSON Schema requires: `"^a"` must be
//! written explicitly to anchor.

use std::fmt;

use regex::Regex;

use crate::error::PatternError;

/// A compiled regular expression that remembers its source text.
///
/// Equality and hashing use the source text only.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern.
    ///
    /// # Errors
    ///
    /// Returns `PatternError` if the source does not compile.
    pub fn compile(source: &str) -> Result<Self, PatternError> {
        let regex = Regex::new(source).map_err(|e| PatternError {
            source_text: source.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// True if the pattern matches anywhere in `text`.
    pub fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// The source text the pattern was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Pattern {}

impl std::hash::Hash for Pattern {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.source.hash(state);
    }
}

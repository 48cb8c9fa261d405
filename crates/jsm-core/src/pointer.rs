//! # JSON Pointer Paths
//!
//! `JsonPointer` identifies a location inside an instance being validated
//! (RFC 6901). The validation engine extends a parent pointer with
//! `/<property>` when it descends into an object member and `/<index>` when
//! it descends into an array element. Indices are always 0-based decimal
//! text.
//!
//! The empty pointer `""` is the document root.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PointerError;

/// A JSON Pointer string, stored in its escaped wire form.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JsonPointer(String);

impl JsonPointer {
    /// The root pointer (`""`).
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Parse a pointer, checking its leading slash and escapes.
    ///
    /// `"/"` is accepted and denotes the member with the empty name, as in
    /// RFC 6901.
    ///
    /// # Errors
    ///
    /// Returns `PointerError` when the text does not start with `/` or
    /// contains a `~` not followed by `0` or `1`.
    pub fn parse(text: &str) -> Result<Self, PointerError> {
        if text.is_empty() {
            return Ok(Self::root());
        }
        let Some(rest) = text.strip_prefix('/') else {
            return Err(PointerError::MissingLeadingSlash(text.to_string()));
        };
        for token in rest.split('/') {
            let mut chars = token.chars();
            while let Some(c) = chars.next() {
                if c == '~' && !matches!(chars.next(), Some('0' | '1')) {
                    return Err(PointerError::InvalidEscape {
                        pointer: text.to_string(),
                        token: token.to_string(),
                    });
                }
            }
        }
        Ok(Self(text.to_string()))
    }

    /// Append an object member name, escaping `~` and `/`.
    #[must_use]
    pub fn push_property(&self, name: &str) -> Self {
        let mut out = String::with_capacity(self.0.len() + name.len() + 1);
        out.push_str(&self.0);
        out.push('/');
        for c in name.chars() {
            match c {
                '~' => out.push_str("~0"),
                '/' => out.push_str("~1"),
                other => out.push(other),
            }
        }
        Self(out)
    }

    /// Append an array index.
    #[must_use]
    pub fn push_index(&self, index: usize) -> Self {
        Self(format!("{}/{index}", self.0))
    }

    /// True for the root pointer.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Unescaped reference tokens, root first.
    pub fn tokens(&self) -> Vec<String> {
        let Some(rest) = self.0.strip_prefix('/') else {
            return Vec::new();
        };
        rest.split('/')
            .map(|t| t.replace("~1", "/").replace("~0", "~"))
            .collect()
    }

    /// The escaped pointer text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for JsonPointer {
    type Err = PointerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for JsonPointer {
    type Error = PointerError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::parse(&text)
    }
}

impl From<JsonPointer> for String {
    fn from(pointer: JsonPointer) -> Self {
        pointer.0
    }
}

impl AsRef<str> for JsonPointer {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for JsonPointer {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for JsonPointer {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

//! # Keyword Vocabulary
//!
//! Every schema keyword the model knows, with its canonical draft-07
//! spelling. Validation errors are tagged with the keyword that produced
//! them, and [`crate::SchemaNode::clear`] takes a keyword to unset.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A named constraint or annotation slot on a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Keyword {
    // Annotations
    Id,
    Title,
    Description,
    Comment,
    Default,
    Examples,
    ReadOnly,
    WriteOnly,
    // Generic assertions
    Type,
    Enum,
    Const,
    // Strings
    MinLength,
    MaxLength,
    Pattern,
    Format,
    ContentEncoding,
    ContentMediaType,
    // Numbers
    Minimum,
    Maximum,
    ExclusiveMinimum,
    ExclusiveMaximum,
    MultipleOf,
    // Objects
    Properties,
    PatternProperties,
    AdditionalProperties,
    Required,
    MinProperties,
    MaxProperties,
    Dependencies,
    PropertyNames,
    // Arrays
    Items,
    AdditionalItems,
    Contains,
    MinItems,
    MaxItems,
    UniqueItems,
    // Composition
    AllOf,
    AnyOf,
    OneOf,
    Not,
    // Conditional
    If,
    Then,
    Else,
    /// The `false` boolean schema, which rejects every instance.
    False,
}

impl Keyword {
    /// Every keyword, in declaration order.
    pub const ALL: [Keyword; 44] = [
        Keyword::Id,
        Keyword::Title,
        Keyword::Description,
        Keyword::Comment,
        Keyword::Default,
        Keyword::Examples,
        Keyword::ReadOnly,
        Keyword::WriteOnly,
        Keyword::Type,
        Keyword::Enum,
        Keyword::Const,
        Keyword::MinLength,
        Keyword::MaxLength,
        Keyword::Pattern,
        Keyword::Format,
        Keyword::ContentEncoding,
        Keyword::ContentMediaType,
        Keyword::Minimum,
        Keyword::Maximum,
        Keyword::ExclusiveMinimum,
        Keyword::ExclusiveMaximum,
        Keyword::MultipleOf,
        Keyword::Properties,
        Keyword::PatternProperties,
        Keyword::AdditionalProperties,
        Keyword::Required,
        Keyword::MinProperties,
        Keyword::MaxProperties,
        Keyword::Dependencies,
        Keyword::PropertyNames,
        Keyword::Items,
        Keyword::AdditionalItems,
        Keyword::Contains,
        Keyword::MinItems,
        Keyword::MaxItems,
        Keyword::UniqueItems,
        Keyword::AllOf,
        Keyword::AnyOf,
        Keyword::OneOf,
        Keyword::Not,
        Keyword::If,
        Keyword::Then,
        Keyword::Else,
        Keyword::False,
    ];

    /// Canonical JSON Schema spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "$id",
            Self::Title => "title",
            Self::Description => "description",
            Self::Comment => "$comment",
            Self::Default => "default",
            Self::Examples => "examples",
            Self::ReadOnly => "readOnly",
            Self::WriteOnly => "writeOnly",
            Self::Type => "type",
            Self::Enum => "enum",
            Self::Const => "const",
            Self::MinLength => "minLength",
            Self::MaxLength => "maxLength",
            Self::Pattern => "pattern",
            Self::Format => "format",
            Self::ContentEncoding => "contentEncoding",
            Self::ContentMediaType => "contentMediaType",
            Self::Minimum => "minimum",
            Self::Maximum => "maximum",
            Self::ExclusiveMinimum => "exclusiveMinimum",
            Self::ExclusiveMaximum => "exclusiveMaximum",
            Self::MultipleOf => "multipleOf",
            Self::Properties => "properties",
            Self::PatternProperties => "patternProperties",
            Self::AdditionalProperties => "additionalProperties",
            Self::Required => "required",
            Self::MinProperties => "minProperties",
            Self::MaxProperties => "maxProperties",
            Self::Dependencies => "dependencies",
            Self::PropertyNames => "propertyNames",
            Self::Items => "items",
            Self::AdditionalItems => "additionalItems",
            Self::Contains => "contains",
            Self::MinItems => "minItems",
            Self::MaxItems => "maxItems",
            Self::UniqueItems => "uniqueItems",
            Self::AllOf => "allOf",
            Self::AnyOf => "anyOf",
            Self::OneOf => "oneOf",
            Self::Not => "not",
            Self::If => "if",
            Self::Then => "then",
            Self::Else => "else",
            Self::False => "false",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown keyword name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown schema keyword {0:?}")]
pub struct UnknownKeyword(pub String);

impl FromStr for Keyword {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownKeyword(s.to_string()))
    }
}

impl Serialize for Keyword {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Keyword {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_keyword_round_trips() {
        for k in Keyword::ALL {
            assert_eq!(k.as_str().parse::<Keyword>().unwrap(), k);
        }
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<&str> = Keyword::ALL.iter().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Keyword::ALL.len());
    }

    #[test]
    fn test_serde_uses_canonical_name() {
        let json = serde_json::to_string(&Keyword::AdditionalItems).unwrap();
        assert_eq!(json, r#""additionalItems""#);
        let back: Keyword = serde_json::from_str(r#""$id""#).unwrap();
        assert_eq!(back, Keyword::Id);
    }

    #[test]
    fn test_unknown_keyword() {
        assert!("$ref".parse::<Keyword>().is_err());
    }
}

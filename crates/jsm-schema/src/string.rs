//! String-kind keywords: length bounds, `pattern`, `format` and the
//! descriptive content keywords.

use jsm_core::Pattern;

use crate::error::SchemaConstructionError;
use crate::keyword::Keyword;
use crate::node::{Kind, KindKeywords, SchemaNode};

/// Keywords carried by string nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringKeywords {
    pub(crate) min_length: Option<u64>,
    pub(crate) max_length: Option<u64>,
    pub(crate) pattern: Option<Pattern>,
    pub(crate) format: Option<String>,
    pub(crate) content_encoding: Option<String>,
    pub(crate) content_media_type: Option<String>,
}

impl StringKeywords {
    pub fn min_length(&self) -> Option<u64> {
        self.min_length
    }

    pub fn max_length(&self) -> Option<u64> {
        self.max_length
    }

    pub fn pattern(&self) -> Option<&Pattern> {
        self.pattern.as_ref()
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    pub fn content_encoding(&self) -> Option<&str> {
        self.content_encoding.as_deref()
    }

    pub fn content_media_type(&self) -> Option<&str> {
        self.content_media_type.as_deref()
    }

    pub(crate) fn check_bounds(&self) -> Result<(), SchemaConstructionError> {
        if let (Some(min), Some(max)) = (self.min_length, self.max_length) {
            if min > max {
                return Err(SchemaConstructionError::invalid(
                    Keyword::MaxLength.as_str(),
                    format!("maxLength {max} is below minLength {min}"),
                ));
            }
        }
        Ok(())
    }

    pub(crate) fn clear(&mut self, keyword: Keyword) {
        match keyword {
            Keyword::MinLength => self.min_length = None,
            Keyword::MaxLength => self.max_length = None,
            Keyword::Pattern => self.pattern = None,
            Keyword::Format => self.format = None,
            Keyword::ContentEncoding => self.content_encoding = None,
            Keyword::ContentMediaType => self.content_media_type = None,
            _ => {}
        }
    }
}

impl SchemaNode {
    /// The string keywords, if this is a string node.
    pub fn as_string(&self) -> Option<&StringKeywords> {
        match &self.kind {
            KindKeywords::String(k) => Some(k),
            _ => None,
        }
    }

    fn update_string<F>(
        &mut self,
        keyword: Keyword,
        apply: F,
    ) -> Result<&mut Self, SchemaConstructionError>
    where
        F: FnOnce(&mut StringKeywords) -> Result<(), SchemaConstructionError>,
    {
        self.update(keyword, move |node| match &mut node.kind {
            KindKeywords::String(k) => apply(k),
            other => Err(SchemaNode::wrong_kind(keyword, Kind::String, other.kind())),
        })
    }

    /// Set `minLength` (Unicode scalar values).
    pub fn set_min_length(&mut self, n: u64) -> Result<&mut Self, SchemaConstructionError> {
        self.update_string(Keyword::MinLength, move |k| {
            k.min_length = Some(n);
            Ok(())
        })
    }

    /// Set `maxLength` (Unicode scalar values).
    pub fn set_max_length(&mut self, n: u64) -> Result<&mut Self, SchemaConstructionError> {
        self.update_string(Keyword::MaxLength, move |k| {
            k.max_length = Some(n);
            Ok(())
        })
    }

    /// Compile and set `pattern`.
    ///
    /// # Errors
    ///
    /// `InvalidPattern` if the expression does not compile.
    pub fn set_pattern(&mut self, source: &str) -> Result<&mut Self, SchemaConstructionError> {
        let compiled = Pattern::compile(source);
        self.update_string(Keyword::Pattern, move |k| {
            let pattern = compiled.map_err(|source_error| SchemaConstructionError::InvalidPattern {
                keyword: Keyword::Pattern.as_str().to_string(),
                source_error,
            })?;
            k.pattern = Some(pattern);
            Ok(())
        })
    }

    /// Set `format`. Names the registry does not know are accepted here and
    /// treated as annotations during validation.
    pub fn set_format(
        &mut self,
        name: impl Into<String>,
    ) -> Result<&mut Self, SchemaConstructionError> {
        let name = name.into();
        self.update_string(Keyword::Format, move |k| {
            if name.is_empty() {
                return Err(SchemaConstructionError::invalid(
                    Keyword::Format.as_str(),
                    "format name must be non-empty",
                ));
            }
            k.format = Some(name);
            Ok(())
        })
    }

    /// Set `contentEncoding` (descriptive only).
    pub fn set_content_encoding(
        &mut self,
        encoding: impl Into<String>,
    ) -> Result<&mut Self, SchemaConstructionError> {
        let encoding = encoding.into();
        self.update_string(Keyword::ContentEncoding, move |k| {
            k.content_encoding = Some(encoding);
            Ok(())
        })
    }

    /// Set `contentMediaType` (descriptive only).
    pub fn set_content_media_type(
        &mut self,
        media_type: impl Into<String>,
    ) -> Result<&mut Self, SchemaConstructionError> {
        let media_type = media_type.into();
        self.update_string(Keyword::ContentMediaType, move |k| {
            k.content_media_type = Some(media_type);
            Ok(())
        })
    }
}

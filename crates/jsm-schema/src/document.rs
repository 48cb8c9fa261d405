//! # Schema Documents
//!
//! A [`SchemaDocument`] is the unit callers load and store: a root
//! [`SchemaNode`] plus the document-level `$id`, `$schema` dialect and
//! `$comment`. The document identifier and dialect must be absolute URIs.

use jsm_core::JsonPointer;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Map, Value};

use crate::engine::Validator;
use crate::error::SchemaConstructionError;
use crate::keyword::Keyword;
use crate::node::SchemaNode;
use crate::report::ValidationResult;

/// The draft-07 meta-schema URI, the default dialect.
pub const DRAFT_07: &str = "http://json-schema.org/draft-07/schema#";

const SCHEMA_KEY: &str = "$schema";

/// A root schema with document metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDocument {
    id: Option<String>,
    dialect: String,
    comment: Option<String>,
    root: SchemaNode,
}

fn absolute_uri(keyword: &str, uri: &str) -> Result<String, SchemaConstructionError> {
    url::Url::parse(uri)
        .map(|_| uri.to_string())
        .map_err(|e| SchemaConstructionError::invalid(keyword, format!("{uri:?} is not an absolute URI: {e}")))
}

impl SchemaDocument {
    /// A draft-07 document without identifier.
    pub fn new(root: SchemaNode) -> Self {
        Self {
            id: None,
            dialect: DRAFT_07.to_string(),
            comment: None,
            root,
        }
    }

    /// Set the document `$id`.
    ///
    /// # Errors
    ///
    /// `InvalidKeywordValue` unless `id` parses as an absolute URI.
    pub fn set_id(&mut self, id: &str) -> Result<&mut Self, SchemaConstructionError> {
        self.id = Some(absolute_uri(Keyword::Id.as_str(), id)?);
        Ok(self)
    }

    /// Set the `$schema` dialect URI.
    ///
    /// # Errors
    ///
    /// `InvalidKeywordValue` unless `uri` parses as an absolute URI.
    pub fn set_dialect(&mut self, uri: &str) -> Result<&mut Self, SchemaConstructionError> {
        self.dialect = absolute_uri(SCHEMA_KEY, uri)?;
        Ok(self)
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) -> &mut Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn dialect(&self) -> &str {
        &self.dialect
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn root(&self) -> &SchemaNode {
        &self.root
    }

    /// Mutable access to the root. Setters on the node keep enforcing its
    /// invariants.
    pub fn root_mut(&mut self) -> &mut SchemaNode {
        &mut self.root
    }

    pub fn into_root(self) -> SchemaNode {
        self.root
    }

    /// Validate an instance with the shared validator.
    pub fn validate(&self, instance: &Value) -> ValidationResult {
        self.validate_with(Validator::shared(), instance)
    }

    /// Validate an instance with a specific validator.
    pub fn validate_with(&self, validator: &Validator, instance: &Value) -> ValidationResult {
        validator.validate(&self.root, instance, &JsonPointer::root())
    }

    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validate(instance).is_valid()
    }

    /// Project to JSON. Document keys are merged into the root object; a
    /// literal root is written as `{}` (true) or `{"not": {}}` (false).
    pub fn to_json(&self) -> Value {
        let mut root = match self.root.to_json() {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                if other == Value::Bool(false) {
                    map.insert(Keyword::Not.as_str().to_string(), json!({}));
                }
                map
            }
        };
        root.insert(SCHEMA_KEY.to_string(), Value::String(self.dialect.clone()));
        if let Some(id) = &self.id {
            root.insert(Keyword::Id.as_str().to_string(), Value::String(id.clone()));
        }
        if let Some(comment) = &self.comment {
            root.insert(Keyword::Comment.as_str().to_string(), Value::String(comment.clone()));
        }
        Value::Object(root)
    }

    /// Parse a document. `$schema`, `$id` and `$comment` at the top level
    /// belong to the document; everything else is the root schema.
    ///
    /// # Errors
    ///
    /// `InvalidKeywordValue` for malformed document keys, otherwise any
    /// error from [`SchemaNode::from_json`].
    pub fn from_json(value: &Value) -> Result<Self, SchemaConstructionError> {
        let Value::Object(fields) = value else {
            return Ok(Self::new(SchemaNode::from_json(value)?));
        };
        let mut rest = fields.clone();
        let mut doc_text = |key: &str| -> Result<Option<String>, SchemaConstructionError> {
            match rest.remove(key) {
                None => Ok(None),
                Some(Value::String(s)) => Ok(Some(s)),
                Some(_) => Err(SchemaConstructionError::invalid(key, "expected a string")),
            }
        };
        let dialect = doc_text(SCHEMA_KEY)?;
        let id = doc_text(Keyword::Id.as_str())?;
        let comment = doc_text(Keyword::Comment.as_str())?;

        let mut document = Self::new(SchemaNode::from_json(&Value::Object(rest))?);
        if let Some(dialect) = dialect {
            if dialect != DRAFT_07 {
                tracing::debug!(%dialect, "non-default dialect; evaluating with draft-07 rules");
            }
            document.set_dialect(&dialect)?;
        }
        if let Some(id) = id {
            document.set_id(&id)?;
        }
        if let Some(comment) = comment {
            document.set_comment(comment);
        }
        Ok(document)
    }
}

impl Serialize for SchemaDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SchemaDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        SchemaDocument::from_json(&value).map_err(serde::de::Error::custom)
    }
}

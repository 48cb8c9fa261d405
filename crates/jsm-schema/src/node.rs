//! # Schema Nodes: Self-Validating Schema Representation
//!
//! A [`SchemaNode`] is one constraint-bearing unit of a schema tree: the
//! generic keywords every schema may carry, plus a [`KindKeywords`] payload
//! holding the keywords of its kind (string, number, object, array) or the
//! boolean verdict of a literal `true`/`false` schema.
//!
//! ## Construction Invariant
//!
//! A node is never observable in an internally contradictory state. Every
//! setter follows the same snapshot protocol:
//!
//! 1. clone the node into a candidate;
//! 2. apply the assignment to the candidate (kind and domain checks);
//! 3. run the consistency pass on the candidate: paired bounds,
//!    `readOnly`/`writeOnly`, and `default`, `const` and every `enum` member
//!    validated against the candidate itself;
//! 4. commit the candidate, or return the error and keep the old state.
//!
//! ## Kinds and Types
//!
//! The kind is fixed at construction ([`SchemaNode::string`],
//! [`SchemaNode::object`], ...) or, for an `Any` node, by setting a
//! single-valued type. Afterwards the declared type-set may only contain the
//! kind's own JSON types, optionally together with `null`.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use jsm_core::{canonical, CanonicalBytes, JsonPointer, JsonType};
use serde_json::Value;

use crate::array::ArrayKeywords;
use crate::engine::Validator;
use crate::error::SchemaConstructionError;
use crate::keyword::Keyword;
use crate::number::NumberKeywords;
use crate::object::ObjectKeywords;
use crate::report::ValidationResult;
use crate::string::StringKeywords;

/// The kind discriminant of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Unconstrained kind; only generic keywords.
    Any,
    /// `string` keywords.
    String,
    /// `number` / `integer` keywords.
    Number,
    /// `boolean`; no kind keywords.
    Boolean,
    /// `null`; no kind keywords.
    Null,
    /// `object` keywords.
    Object,
    /// `array` keywords.
    Array,
    /// The boolean schemas `true` and `false`.
    Literal,
}

impl Kind {
    /// Lowercase kind name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
            Self::Object => "object",
            Self::Array => "array",
            Self::Literal => "literal",
        }
    }

    /// The kind a single JSON type fixes.
    pub fn for_type(t: JsonType) -> Self {
        match t {
            JsonType::Null => Self::Null,
            JsonType::Boolean => Self::Boolean,
            JsonType::Object => Self::Object,
            JsonType::Array => Self::Array,
            JsonType::Number | JsonType::Integer => Self::Number,
            JsonType::String => Self::String,
        }
    }

    /// JSON types a node of this kind may declare (besides `null`).
    pub fn permitted_types(self) -> &'static [JsonType] {
        match self {
            Self::Any => &JsonType::ALL,
            Self::String => &[JsonType::String],
            Self::Number => &[JsonType::Number, JsonType::Integer],
            Self::Boolean => &[JsonType::Boolean],
            Self::Null => &[JsonType::Null],
            Self::Object => &[JsonType::Object],
            Self::Array => &[JsonType::Array],
            Self::Literal => &[],
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-specific payload of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum KindKeywords {
    Any,
    String(StringKeywords),
    Number(NumberKeywords),
    Boolean,
    Null,
    Object(ObjectKeywords),
    Array(ArrayKeywords),
    Literal(bool),
}

impl KindKeywords {
    /// An empty payload for `kind`. `Literal` yields the `true` schema.
    pub fn empty(kind: Kind) -> Self {
        match kind {
            Kind::Any => Self::Any,
            Kind::String => Self::String(StringKeywords::default()),
            Kind::Number => Self::Number(NumberKeywords::default()),
            Kind::Boolean => Self::Boolean,
            Kind::Null => Self::Null,
            Kind::Object => Self::Object(ObjectKeywords::default()),
            Kind::Array => Self::Array(ArrayKeywords::default()),
            Kind::Literal => Self::Literal(true),
        }
    }

    /// The discriminant.
    pub fn kind(&self) -> Kind {
        match self {
            Self::Any => Kind::Any,
            Self::String(_) => Kind::String,
            Self::Number(_) => Kind::Number,
            Self::Boolean => Kind::Boolean,
            Self::Null => Kind::Null,
            Self::Object(_) => Kind::Object,
            Self::Array(_) => Kind::Array,
            Self::Literal(_) => Kind::Literal,
        }
    }
}

/// Keywords every non-literal node may carry.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct GenericKeywords {
    pub(crate) id: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) comment: Option<String>,
    pub(crate) types: Option<BTreeSet<JsonType>>,
    pub(crate) default: Option<Value>,
    pub(crate) examples: Option<Vec<Value>>,
    pub(crate) read_only: bool,
    pub(crate) write_only: bool,
    pub(crate) enum_values: Option<Vec<Value>>,
    pub(crate) const_value: Option<Value>,
    pub(crate) all_of: Option<Vec<SchemaNode>>,
    pub(crate) any_of: Option<Vec<SchemaNode>>,
    pub(crate) one_of: Option<Vec<SchemaNode>>,
    pub(crate) not: Option<Box<SchemaNode>>,
    pub(crate) if_schema: Option<Box<SchemaNode>>,
    pub(crate) then_schema: Option<Box<SchemaNode>>,
    pub(crate) else_schema: Option<Box<SchemaNode>>,
}

/// A schema node. See the module documentation for the construction
/// invariant.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    pub(crate) generic: GenericKeywords,
    pub(crate) kind: KindKeywords,
}

impl Default for SchemaNode {
    fn default() -> Self {
        Self::any()
    }
}

impl From<bool> for SchemaNode {
    fn from(verdict: bool) -> Self {
        Self::literal(verdict)
    }
}

// ── Construction ────────────────────────────────────────────────────────

impl SchemaNode {
    /// A node of `kind` with no declared type-set.
    ///
    /// Kind keywords then apply to instances of the kind's JSON type and
    /// every other instance passes them untouched.
    pub fn untyped(kind: Kind) -> Self {
        Self {
            generic: GenericKeywords::default(),
            kind: KindKeywords::empty(kind),
        }
    }

    fn typed(kind: Kind, t: JsonType) -> Self {
        let mut node = Self::untyped(kind);
        node.generic.types = Some(BTreeSet::from([t]));
        node
    }

    /// The unconstrained schema (`{}`).
    pub fn any() -> Self {
        Self::untyped(Kind::Any)
    }

    /// `{"type": "string"}`
    pub fn string() -> Self {
        Self::typed(Kind::String, JsonType::String)
    }

    /// `{"type": "number"}`
    pub fn number() -> Self {
        Self::typed(Kind::Number, JsonType::Number)
    }

    /// `{"type": "integer"}`
    pub fn integer() -> Self {
        Self::typed(Kind::Number, JsonType::Integer)
    }

    /// `{"type": "boolean"}`
    pub fn boolean() -> Self {
        Self::typed(Kind::Boolean, JsonType::Boolean)
    }

    /// `{"type": "null"}`
    pub fn null() -> Self {
        Self::typed(Kind::Null, JsonType::Null)
    }

    /// `{"type": "object"}`
    pub fn object() -> Self {
        Self::typed(Kind::Object, JsonType::Object)
    }

    /// `{"type": "array"}`
    pub fn array() -> Self {
        Self::typed(Kind::Array, JsonType::Array)
    }

    /// The boolean schema: `true` accepts everything, `false` nothing.
    pub fn literal(verdict: bool) -> Self {
        Self {
            generic: GenericKeywords::default(),
            kind: KindKeywords::Literal(verdict),
        }
    }

    /// Apply a chain of setters to an owned node.
    ///
    /// ```
    /// # use jsm_schema::SchemaNode;
    /// let name = SchemaNode::string().with(|n| n.set_min_length(1)?.set_max_length(64))?;
    /// # Ok::<(), jsm_schema::SchemaConstructionError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns the first setter error.
    pub fn with<F>(mut self, build: F) -> Result<Self, SchemaConstructionError>
    where
        F: FnOnce(&mut Self) -> Result<&mut Self, SchemaConstructionError>,
    {
        build(&mut self)?;
        Ok(self)
    }
}

// ── Accessors ───────────────────────────────────────────────────────────

impl SchemaNode {
    /// The kind discriminant.
    pub fn kind(&self) -> Kind {
        self.kind.kind()
    }

    /// The kind-specific payload.
    pub fn keywords(&self) -> &KindKeywords {
        &self.kind
    }

    /// `Some(verdict)` for the boolean schemas.
    pub fn literal_value(&self) -> Option<bool> {
        match self.kind {
            KindKeywords::Literal(b) => Some(b),
            _ => None,
        }
    }

    /// True for the `false` schema.
    pub fn is_false(&self) -> bool {
        self.literal_value() == Some(false)
    }

    pub fn id(&self) -> Option<&str> {
        self.generic.id.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.generic.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.generic.description.as_deref()
    }

    pub fn comment(&self) -> Option<&str> {
        self.generic.comment.as_deref()
    }

    /// The declared type-set, if any.
    pub fn types(&self) -> Option<&BTreeSet<JsonType>> {
        self.generic.types.as_ref()
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.generic.default.as_ref()
    }

    pub fn examples(&self) -> Option<&[Value]> {
        self.generic.examples.as_deref()
    }

    pub fn read_only(&self) -> bool {
        self.generic.read_only
    }

    pub fn write_only(&self) -> bool {
        self.generic.write_only
    }

    pub fn enum_values(&self) -> Option<&[Value]> {
        self.generic.enum_values.as_deref()
    }

    pub fn const_value(&self) -> Option<&Value> {
        self.generic.const_value.as_ref()
    }

    pub fn all_of(&self) -> Option<&[SchemaNode]> {
        self.generic.all_of.as_deref()
    }

    pub fn any_of(&self) -> Option<&[SchemaNode]> {
        self.generic.any_of.as_deref()
    }

    pub fn one_of(&self) -> Option<&[SchemaNode]> {
        self.generic.one_of.as_deref()
    }

    pub fn not(&self) -> Option<&SchemaNode> {
        self.generic.not.as_deref()
    }

    pub fn if_schema(&self) -> Option<&SchemaNode> {
        self.generic.if_schema.as_deref()
    }

    pub fn then_schema(&self) -> Option<&SchemaNode> {
        self.generic.then_schema.as_deref()
    }

    pub fn else_schema(&self) -> Option<&SchemaNode> {
        self.generic.else_schema.as_deref()
    }

    /// Validate an instance at the root path with the shared validator.
    pub fn validate(&self, instance: &Value) -> ValidationResult {
        Validator::shared().validate(self, instance, &JsonPointer::root())
    }

    /// Boolean verdict with the shared validator.
    pub fn is_valid(&self, instance: &Value) -> bool {
        Validator::shared().is_valid(self, instance)
    }
}

// ── Snapshot protocol ───────────────────────────────────────────────────

impl SchemaNode {
    /// Apply `apply` to a candidate copy, run the consistency pass, and
    /// commit only on success.
    pub(crate) fn update<F>(
        &mut self,
        keyword: Keyword,
        apply: F,
    ) -> Result<&mut Self, SchemaConstructionError>
    where
        F: FnOnce(&mut SchemaNode) -> Result<(), SchemaConstructionError>,
    {
        if let KindKeywords::Literal(verdict) = self.kind {
            let err = SchemaConstructionError::type_conflict(
                keyword.as_str(),
                format!("the boolean schema `{verdict}` carries no keywords"),
            );
            tracing::debug!(%keyword, error = %err, "schema keyword assignment rejected");
            return Err(err);
        }
        let mut candidate = self.clone();
        match apply(&mut candidate).and_then(|()| candidate.check_consistency()) {
            Ok(()) => {
                *self = candidate;
                Ok(self)
            }
            Err(err) => {
                tracing::debug!(%keyword, error = %err, "schema keyword assignment rejected");
                Err(err)
            }
        }
    }

    pub(crate) fn wrong_kind(keyword: Keyword, wanted: Kind, actual: Kind) -> SchemaConstructionError {
        SchemaConstructionError::type_conflict(
            keyword.as_str(),
            format!("'{keyword}' applies to {wanted} schemas, this is a {actual} schema"),
        )
    }

    fn check_consistency(&self) -> Result<(), SchemaConstructionError> {
        if self.generic.read_only && self.generic.write_only {
            return Err(SchemaConstructionError::invalid(
                Keyword::WriteOnly.as_str(),
                "a schema cannot be both readOnly and writeOnly",
            ));
        }
        match &self.kind {
            KindKeywords::String(k) => k.check_bounds()?,
            KindKeywords::Number(k) => k.check_bounds()?,
            KindKeywords::Object(k) => k.check_bounds()?,
            KindKeywords::Array(k) => k.check_bounds()?,
            KindKeywords::Any
            | KindKeywords::Boolean
            | KindKeywords::Null
            | KindKeywords::Literal(_) => {}
        }
        self.check_own_values()
    }

    fn check_own_values(&self) -> Result<(), SchemaConstructionError> {
        let validator = Validator::shared();
        if let Some(value) = &self.generic.default {
            self.check_own_value(validator, Keyword::Default, value)?;
        }
        if let Some(value) = &self.generic.const_value {
            self.check_own_value(validator, Keyword::Const, value)?;
        }
        if let Some(values) = &self.generic.enum_values {
            for value in values {
                self.check_own_value(validator, Keyword::Enum, value)?;
            }
        }
        Ok(())
    }

    fn check_own_value(
        &self,
        validator: &Validator,
        keyword: Keyword,
        value: &Value,
    ) -> Result<(), SchemaConstructionError> {
        let result = validator.validate(self, value, &JsonPointer::root());
        if result.is_valid() {
            return Ok(());
        }
        let reason = result
            .errors()
            .iter()
            .map(|e| format!("{} [{}]", e.message, e.keyword))
            .collect::<Vec<_>>()
            .join("; ");
        Err(SchemaConstructionError::ValueViolatesOwnConstraint {
            keyword: keyword.as_str().to_string(),
            value: value.clone(),
            reason,
        })
    }
}

fn non_empty<T>(keyword: Keyword, items: &[T]) -> Result<(), SchemaConstructionError> {
    if items.is_empty() {
        Err(SchemaConstructionError::invalid(
            keyword.as_str(),
            "must be non-empty when present",
        ))
    } else {
        Ok(())
    }
}

// ── Generic setters ─────────────────────────────────────────────────────

impl SchemaNode {
    /// Set `$id`.
    pub fn set_id(&mut self, id: impl Into<String>) -> Result<&mut Self, SchemaConstructionError> {
        let id = id.into();
        self.update(Keyword::Id, move |node| {
            node.generic.id = Some(id);
            Ok(())
        })
    }

    /// Set `title`.
    pub fn set_title(
        &mut self,
        title: impl Into<String>,
    ) -> Result<&mut Self, SchemaConstructionError> {
        let title = title.into();
        self.update(Keyword::Title, move |node| {
            node.generic.title = Some(title);
            Ok(())
        })
    }

    /// Set `description`.
    pub fn set_description(
        &mut self,
        description: impl Into<String>,
    ) -> Result<&mut Self, SchemaConstructionError> {
        let description = description.into();
        self.update(Keyword::Description, move |node| {
            node.generic.description = Some(description);
            Ok(())
        })
    }

    /// Set `$comment`.
    pub fn set_comment(
        &mut self,
        comment: impl Into<String>,
    ) -> Result<&mut Self, SchemaConstructionError> {
        let comment = comment.into();
        self.update(Keyword::Comment, move |node| {
            node.generic.comment = Some(comment);
            Ok(())
        })
    }

    /// Declare a single type.
    ///
    /// On an `Any` node this fixes the kind (`integer` fixes the number
    /// kind).
    ///
    /// # Errors
    ///
    /// `TypeConflict` when the type does not belong to the node's kind.
    pub fn set_type(&mut self, t: JsonType) -> Result<&mut Self, SchemaConstructionError> {
        self.set_type_set([t])
    }

    /// Declare the type-set.
    ///
    /// # Errors
    ///
    /// `InvalidKeywordValue` for an empty set; `TypeConflict` when a type
    /// other than `null` falls outside the node's kind, or when a kind node
    /// would be left without any of its own types.
    pub fn set_type_set<I>(&mut self, types: I) -> Result<&mut Self, SchemaConstructionError>
    where
        I: IntoIterator<Item = JsonType>,
    {
        let types: BTreeSet<JsonType> = types.into_iter().collect();
        self.update(Keyword::Type, move |node| {
            if types.is_empty() {
                return Err(SchemaConstructionError::invalid(
                    Keyword::Type.as_str(),
                    "the type set must not be empty",
                ));
            }
            let current = node.kind();
            if current == Kind::Any && types.len() == 1 {
                if let Some(only) = types.first() {
                    node.kind = KindKeywords::empty(Kind::for_type(*only));
                }
            } else if current != Kind::Any {
                let permitted = current.permitted_types();
                if let Some(bad) = types
                    .iter()
                    .find(|t| **t != JsonType::Null && !permitted.contains(t))
                {
                    return Err(SchemaConstructionError::type_conflict(
                        Keyword::Type.as_str(),
                        format!("a {current} schema cannot declare type '{bad}'"),
                    ));
                }
                if !types.iter().any(|t| permitted.contains(t)) {
                    return Err(SchemaConstructionError::type_conflict(
                        Keyword::Type.as_str(),
                        format!("a {current} schema must keep one of its own types"),
                    ));
                }
            }
            node.generic.types = Some(types);
            Ok(())
        })
    }

    /// Set `default`.
    ///
    /// # Errors
    ///
    /// `ValueViolatesOwnConstraint` if the value does not validate against
    /// this node.
    pub fn set_default(&mut self, value: Value) -> Result<&mut Self, SchemaConstructionError> {
        self.update(Keyword::Default, move |node| {
            node.generic.default = Some(value);
            Ok(())
        })
    }

    /// Set `examples`. Examples are annotations and are not checked.
    pub fn set_examples(
        &mut self,
        examples: Vec<Value>,
    ) -> Result<&mut Self, SchemaConstructionError> {
        self.update(Keyword::Examples, move |node| {
            node.generic.examples = Some(examples);
            Ok(())
        })
    }

    /// Set `readOnly`.
    pub fn set_read_only(&mut self, flag: bool) -> Result<&mut Self, SchemaConstructionError> {
        self.update(Keyword::ReadOnly, move |node| {
            node.generic.read_only = flag;
            Ok(())
        })
    }

    /// Set `writeOnly`.
    pub fn set_write_only(&mut self, flag: bool) -> Result<&mut Self, SchemaConstructionError> {
        self.update(Keyword::WriteOnly, move |node| {
            node.generic.write_only = flag;
            Ok(())
        })
    }

    /// Set `enum`.
    ///
    /// # Errors
    ///
    /// `InvalidKeywordValue` for an empty or duplicate-bearing list;
    /// `ValueViolatesOwnConstraint` if any member fails this node.
    pub fn set_enum<I>(&mut self, values: I) -> Result<&mut Self, SchemaConstructionError>
    where
        I: IntoIterator<Item = Value>,
    {
        let values: Vec<Value> = values.into_iter().collect();
        self.update(Keyword::Enum, move |node| {
            non_empty(Keyword::Enum, &values)?;
            let mut seen = HashSet::new();
            for value in &values {
                let key = CanonicalBytes::of_value(value).map_err(|e| {
                    SchemaConstructionError::invalid(Keyword::Enum.as_str(), e.to_string())
                })?;
                if !seen.insert(key) {
                    return Err(SchemaConstructionError::invalid(
                        Keyword::Enum.as_str(),
                        format!("duplicate member {}", canonical::render(value)),
                    ));
                }
            }
            node.generic.enum_values = Some(values);
            Ok(())
        })
    }

    /// Set `const`.
    ///
    /// # Errors
    ///
    /// `ValueViolatesOwnConstraint` if the value fails this node.
    pub fn set_const(&mut self, value: Value) -> Result<&mut Self, SchemaConstructionError> {
        self.update(Keyword::Const, move |node| {
            node.generic.const_value = Some(value);
            Ok(())
        })
    }

    /// Set `allOf`.
    ///
    /// # Errors
    ///
    /// `InvalidKeywordValue` for an empty list.
    pub fn set_all_of(
        &mut self,
        schemas: Vec<SchemaNode>,
    ) -> Result<&mut Self, SchemaConstructionError> {
        self.update(Keyword::AllOf, move |node| {
            non_empty(Keyword::AllOf, &schemas)?;
            node.generic.all_of = Some(schemas);
            Ok(())
        })
    }

    /// Set `anyOf`.
    ///
    /// # Errors
    ///
    /// `InvalidKeywordValue` for an empty list.
    pub fn set_any_of(
        &mut self,
        schemas: Vec<SchemaNode>,
    ) -> Result<&mut Self, SchemaConstructionError> {
        self.update(Keyword::AnyOf, move |node| {
            non_empty(Keyword::AnyOf, &schemas)?;
            node.generic.any_of = Some(schemas);
            Ok(())
        })
    }

    /// Set `oneOf`.
    ///
    /// # Errors
    ///
    /// `InvalidKeywordValue` for an empty list.
    pub fn set_one_of(
        &mut self,
        schemas: Vec<SchemaNode>,
    ) -> Result<&mut Self, SchemaConstructionError> {
        self.update(Keyword::OneOf, move |node| {
            non_empty(Keyword::OneOf, &schemas)?;
            node.generic.one_of = Some(schemas);
            Ok(())
        })
    }

    /// Set `not`.
    pub fn set_not(&mut self, schema: SchemaNode) -> Result<&mut Self, SchemaConstructionError> {
        self.update(Keyword::Not, move |node| {
            node.generic.not = Some(Box::new(schema));
            Ok(())
        })
    }

    /// Set `if`.
    pub fn set_if(&mut self, schema: SchemaNode) -> Result<&mut Self, SchemaConstructionError> {
        self.update(Keyword::If, move |node| {
            node.generic.if_schema = Some(Box::new(schema));
            Ok(())
        })
    }

    /// Set `then`.
    pub fn set_then(&mut self, schema: SchemaNode) -> Result<&mut Self, SchemaConstructionError> {
        self.update(Keyword::Then, move |node| {
            node.generic.then_schema = Some(Box::new(schema));
            Ok(())
        })
    }

    /// Set `else`.
    pub fn set_else(&mut self, schema: SchemaNode) -> Result<&mut Self, SchemaConstructionError> {
        self.update(Keyword::Else, move |node| {
            node.generic.else_schema = Some(Box::new(schema));
            Ok(())
        })
    }

    /// Unset a keyword. Clearing a keyword the node's kind does not carry is
    /// a no-op.
    ///
    /// # Errors
    ///
    /// `TypeConflict` on boolean schemas.
    pub fn clear(&mut self, keyword: Keyword) -> Result<&mut Self, SchemaConstructionError> {
        self.update(keyword, move |node| {
            node.clear_slot(keyword);
            Ok(())
        })
    }

    fn clear_slot(&mut self, keyword: Keyword) {
        let g = &mut self.generic;
        match keyword {
            Keyword::Id => g.id = None,
            Keyword::Title => g.title = None,
            Keyword::Description => g.description = None,
            Keyword::Comment => g.comment = None,
            Keyword::Default => g.default = None,
            Keyword::Examples => g.examples = None,
            Keyword::ReadOnly => g.read_only = false,
            Keyword::WriteOnly => g.write_only = false,
            Keyword::Type => g.types = None,
            Keyword::Enum => g.enum_values = None,
            Keyword::Const => g.const_value = None,
            Keyword::AllOf => g.all_of = None,
            Keyword::AnyOf => g.any_of = None,
            Keyword::OneOf => g.one_of = None,
            Keyword::Not => g.not = None,
            Keyword::If => g.if_schema = None,
            Keyword::Then => g.then_schema = None,
            Keyword::Else => g.else_schema = None,
            Keyword::False => {}
            other => match &mut self.kind {
                KindKeywords::String(k) => k.clear(other),
                KindKeywords::Number(k) => k.clear(other),
                KindKeywords::Object(k) => k.clear(other),
                KindKeywords::Array(k) => k.clear(other),
                KindKeywords::Any
                | KindKeywords::Boolean
                | KindKeywords::Null
                | KindKeywords::Literal(_) => {}
            },
        }
    }
}

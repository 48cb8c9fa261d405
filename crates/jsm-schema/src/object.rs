//! Object-kind keywords.
//!
//! `properties` and `patternProperties` are kept in sorted maps so that
//! serialization and error order do not depend on insertion order.
//! `additionalProperties: false` is stored as the literal `false` node.

use std::collections::{BTreeMap, HashSet};

use jsm_core::Pattern;

use crate::error::SchemaConstructionError;
use crate::keyword::Keyword;
use crate::node::{Kind, KindKeywords, SchemaNode};

/// The value side of a `dependencies` entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Dependency {
    /// When the trigger is present, these properties must be too.
    Properties(Vec<String>),
    /// When the trigger is present, the whole object must match.
    Schema(Box<SchemaNode>),
}

impl From<Vec<String>> for Dependency {
    fn from(names: Vec<String>) -> Self {
        Self::Properties(names)
    }
}

impl From<SchemaNode> for Dependency {
    fn from(node: SchemaNode) -> Self {
        Self::Schema(Box::new(node))
    }
}

/// A compiled `patternProperties` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternProperty {
    pub(crate) pattern: Pattern,
    pub(crate) schema: SchemaNode,
}

impl PatternProperty {
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn schema(&self) -> &SchemaNode {
        &self.schema
    }
}

/// Keywords carried by object nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectKeywords {
    pub(crate) properties: BTreeMap<String, SchemaNode>,
    pub(crate) pattern_properties: BTreeMap<String, PatternProperty>,
    pub(crate) additional_properties: Option<Box<SchemaNode>>,
    pub(crate) required: Option<Vec<String>>,
    pub(crate) min_properties: Option<u64>,
    pub(crate) max_properties: Option<u64>,
    pub(crate) dependencies: BTreeMap<String, Dependency>,
    pub(crate) property_names: Option<Box<SchemaNode>>,
}

impl ObjectKeywords {
    pub fn properties(&self) -> &BTreeMap<String, SchemaNode> {
        &self.properties
    }

    pub fn pattern_properties(&self) -> &BTreeMap<String, PatternProperty> {
        &self.pattern_properties
    }

    pub fn additional_properties(&self) -> Option<&SchemaNode> {
        self.additional_properties.as_deref()
    }

    pub fn required(&self) -> Option<&[String]> {
        self.required.as_deref()
    }

    pub fn min_properties(&self) -> Option<u64> {
        self.min_properties
    }

    pub fn max_properties(&self) -> Option<u64> {
        self.max_properties
    }

    pub fn dependencies(&self) -> &BTreeMap<String, Dependency> {
        &self.dependencies
    }

    pub fn property_names(&self) -> Option<&SchemaNode> {
        self.property_names.as_deref()
    }

    pub(crate) fn check_bounds(&self) -> Result<(), SchemaConstructionError> {
        if let (Some(min), Some(max)) = (self.min_properties, self.max_properties) {
            if min > max {
                return Err(SchemaConstructionError::invalid(
                    Keyword::MaxProperties.as_str(),
                    format!("maxProperties {max} is below minProperties {min}"),
                ));
            }
        }
        Ok(())
    }

    pub(crate) fn clear(&mut self, keyword: Keyword) {
        match keyword {
            Keyword::Properties => self.properties.clear(),
            Keyword::PatternProperties => self.pattern_properties.clear(),
            Keyword::AdditionalProperties => self.additional_properties = None,
            Keyword::Required => self.required = None,
            Keyword::MinProperties => self.min_properties = None,
            Keyword::MaxProperties => self.max_properties = None,
            Keyword::Dependencies => self.dependencies.clear(),
            Keyword::PropertyNames => self.property_names = None,
            _ => {}
        }
    }
}

impl SchemaNode {
    /// The object keywords, if this is an object node.
    pub fn as_object(&self) -> Option<&ObjectKeywords> {
        match &self.kind {
            KindKeywords::Object(k) => Some(k),
            _ => None,
        }
    }

    fn update_object<F>(
        &mut self,
        keyword: Keyword,
        apply: F,
    ) -> Result<&mut Self, SchemaConstructionError>
    where
        F: FnOnce(&mut ObjectKeywords) -> Result<(), SchemaConstructionError>,
    {
        self.update(keyword, move |node| match &mut node.kind {
            KindKeywords::Object(k) => apply(k),
            other => Err(SchemaNode::wrong_kind(keyword, Kind::Object, other.kind())),
        })
    }

    /// Add or replace one entry of `properties`.
    pub fn set_property(
        &mut self,
        name: impl Into<String>,
        schema: SchemaNode,
    ) -> Result<&mut Self, SchemaConstructionError> {
        let name = name.into();
        self.update_object(Keyword::Properties, move |k| {
            k.properties.insert(name, schema);
            Ok(())
        })
    }

    /// Replace the whole `properties` map.
    pub fn set_properties<I, S>(&mut self, entries: I) -> Result<&mut Self, SchemaConstructionError>
    where
        I: IntoIterator<Item = (S, SchemaNode)>,
        S: Into<String>,
    {
        let properties: BTreeMap<String, SchemaNode> =
            entries.into_iter().map(|(name, node)| (name.into(), node)).collect();
        self.update_object(Keyword::Properties, move |k| {
            k.properties = properties;
            Ok(())
        })
    }

    /// Remove one entry of `properties`. Removing an absent name is a no-op.
    pub fn remove_property(&mut self, name: &str) -> Result<&mut Self, SchemaConstructionError> {
        self.update_object(Keyword::Properties, |k| {
            k.properties.remove(name);
            Ok(())
        })
    }

    /// Compile and add one entry of `patternProperties`.
    ///
    /// # Errors
    ///
    /// `InvalidPattern` if the key does not compile.
    pub fn set_pattern_property(
        &mut self,
        source: &str,
        schema: SchemaNode,
    ) -> Result<&mut Self, SchemaConstructionError> {
        let compiled = Pattern::compile(source);
        self.update_object(Keyword::PatternProperties, move |k| {
            let pattern = compiled.map_err(|source_error| SchemaConstructionError::InvalidPattern {
                keyword: Keyword::PatternProperties.as_str().to_string(),
                source_error,
            })?;
            k.pattern_properties.insert(
                pattern.as_str().to_string(),
                PatternProperty { pattern, schema },
            );
            Ok(())
        })
    }

    /// Set `additionalProperties` to a node, or to `true`/`false` via
    /// `SchemaNode::from(bool)`.
    pub fn set_additional_properties(
        &mut self,
        schema: impl Into<SchemaNode>,
    ) -> Result<&mut Self, SchemaConstructionError> {
        let schema = schema.into();
        self.update_object(Keyword::AdditionalProperties, move |k| {
            k.additional_properties = Some(Box::new(schema));
            Ok(())
        })
    }

    /// Set `required`.
    ///
    /// # Errors
    ///
    /// `InvalidKeywordValue` for an empty list or a repeated name.
    pub fn set_required<I, S>(&mut self, names: I) -> Result<&mut Self, SchemaConstructionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        self.update_object(Keyword::Required, move |k| {
            if names.is_empty() {
                return Err(SchemaConstructionError::invalid(
                    Keyword::Required.as_str(),
                    "must be non-empty when present",
                ));
            }
            let mut seen = HashSet::new();
            if let Some(dup) = names.iter().find(|n| !seen.insert(n.as_str())) {
                return Err(SchemaConstructionError::invalid(
                    Keyword::Required.as_str(),
                    format!("property {dup:?} listed twice"),
                ));
            }
            k.required = Some(names);
            Ok(())
        })
    }

    pub fn set_min_properties(&mut self, n: u64) -> Result<&mut Self, SchemaConstructionError> {
        self.update_object(Keyword::MinProperties, move |k| {
            k.min_properties = Some(n);
            Ok(())
        })
    }

    pub fn set_max_properties(&mut self, n: u64) -> Result<&mut Self, SchemaConstructionError> {
        self.update_object(Keyword::MaxProperties, move |k| {
            k.max_properties = Some(n);
            Ok(())
        })
    }

    /// Add or replace one `dependencies` entry.
    pub fn set_dependency(
        &mut self,
        trigger: impl Into<String>,
        dependency: impl Into<Dependency>,
    ) -> Result<&mut Self, SchemaConstructionError> {
        let trigger = trigger.into();
        let dependency = dependency.into();
        self.update_object(Keyword::Dependencies, move |k| {
            k.dependencies.insert(trigger, dependency);
            Ok(())
        })
    }

    /// Set `propertyNames`; each key is validated as a string instance.
    pub fn set_property_names(
        &mut self,
        schema: SchemaNode,
    ) -> Result<&mut Self, SchemaConstructionError> {
        self.update_object(Keyword::PropertyNames, move |k| {
            k.property_names = Some(Box::new(schema));
            Ok(())
        })
    }
}

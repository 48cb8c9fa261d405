//! Array-kind keywords. `items` is either one schema for every element or a
//! tuple of positional schemas; `additionalItems` only matters in tuple mode.

use crate::error::SchemaConstructionError;
use crate::keyword::Keyword;
use crate::node::{Kind, KindKeywords, SchemaNode};

/// The two shapes of `items`.
#[derive(Debug, Clone, PartialEq)]
pub enum Items {
    /// Every element validates against this schema.
    Single(Box<SchemaNode>),
    /// Element `i` validates against schema `i`.
    Tuple(Vec<SchemaNode>),
}

/// Keywords carried by array nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArrayKeywords {
    pub(crate) items: Option<Items>,
    pub(crate) additional_items: Option<Box<SchemaNode>>,
    pub(crate) contains: Option<Box<SchemaNode>>,
    pub(crate) min_items: Option<u64>,
    pub(crate) max_items: Option<u64>,
    pub(crate) unique_items: bool,
}

impl ArrayKeywords {
    pub fn items(&self) -> Option<&Items> {
        self.items.as_ref()
    }

    pub fn additional_items(&self) -> Option<&SchemaNode> {
        self.additional_items.as_deref()
    }

    pub fn contains(&self) -> Option<&SchemaNode> {
        self.contains.as_deref()
    }

    pub fn min_items(&self) -> Option<u64> {
        self.min_items
    }

    pub fn max_items(&self) -> Option<u64> {
        self.max_items
    }

    pub fn unique_items(&self) -> bool {
        self.unique_items
    }

    pub(crate) fn check_bounds(&self) -> Result<(), SchemaConstructionError> {
        if let (Some(min), Some(max)) = (self.min_items, self.max_items) {
            if min > max {
                return Err(SchemaConstructionError::invalid(
                    Keyword::MaxItems.as_str(),
                    format!("maxItems {max} is below minItems {min}"),
                ));
            }
        }
        Ok(())
    }

    pub(crate) fn clear(&mut self, keyword: Keyword) {
        match keyword {
            Keyword::Items => self.items = None,
            Keyword::AdditionalItems => self.additional_items = None,
            Keyword::Contains => self.contains = None,
            Keyword::MinItems => self.min_items = None,
            Keyword::MaxItems => self.max_items = None,
            Keyword::UniqueItems => self.unique_items = false,
            _ => {}
        }
    }
}

impl SchemaNode {
    /// The array keywords, if this is an array node.
    pub fn as_array(&self) -> Option<&ArrayKeywords> {
        match &self.kind {
            KindKeywords::Array(k) => Some(k),
            _ => None,
        }
    }

    fn update_array<F>(
        &mut self,
        keyword: Keyword,
        apply: F,
    ) -> Result<&mut Self, SchemaConstructionError>
    where
        F: FnOnce(&mut ArrayKeywords) -> Result<(), SchemaConstructionError>,
    {
        self.update(keyword, move |node| match &mut node.kind {
            KindKeywords::Array(k) => apply(k),
            other => Err(SchemaNode::wrong_kind(keyword, Kind::Array, other.kind())),
        })
    }

    /// Set `items` to a single schema applied to every element.
    pub fn set_items(&mut self, schema: SchemaNode) -> Result<&mut Self, SchemaConstructionError> {
        self.update_array(Keyword::Items, move |k| {
            k.items = Some(Items::Single(Box::new(schema)));
            Ok(())
        })
    }

    /// Set `items` to a tuple of positional schemas.
    ///
    /// # Errors
    ///
    /// `InvalidKeywordValue` for an empty tuple.
    pub fn set_tuple_items(
        &mut self,
        schemas: Vec<SchemaNode>,
    ) -> Result<&mut Self, SchemaConstructionError> {
        self.update_array(Keyword::Items, move |k| {
            if schemas.is_empty() {
                return Err(SchemaConstructionError::invalid(
                    Keyword::Items.as_str(),
                    "a tuple must hold at least one schema",
                ));
            }
            k.items = Some(Items::Tuple(schemas));
            Ok(())
        })
    }

    /// Set `additionalItems` to a node or boolean shorthand.
    pub fn set_additional_items(
        &mut self,
        schema: impl Into<SchemaNode>,
    ) -> Result<&mut Self, SchemaConstructionError> {
        let schema = schema.into();
        self.update_array(Keyword::AdditionalItems, move |k| {
            k.additional_items = Some(Box::new(schema));
            Ok(())
        })
    }

    /// Set `contains`.
    pub fn set_contains(&mut self, schema: SchemaNode) -> Result<&mut Self, SchemaConstructionError> {
        self.update_array(Keyword::Contains, move |k| {
            k.contains = Some(Box::new(schema));
            Ok(())
        })
    }

    pub fn set_min_items(&mut self, n: u64) -> Result<&mut Self, SchemaConstructionError> {
        self.update_array(Keyword::MinItems, move |k| {
            k.min_items = Some(n);
            Ok(())
        })
    }

    pub fn set_max_items(&mut self, n: u64) -> Result<&mut Self, SchemaConstructionError> {
        self.update_array(Keyword::MaxItems, move |k| {
            k.max_items = Some(n);
            Ok(())
        })
    }

    pub fn set_unique_items(&mut self, flag: bool) -> Result<&mut Self, SchemaConstructionError> {
        self.update_array(Keyword::UniqueItems, move |k| {
            k.unique_items = flag;
            Ok(())
        })
    }
}

//! Projection of schema nodes to JSON with canonical keyword names.
//!
//! Unset keywords are omitted, `readOnly`/`writeOnly`/`uniqueItems` appear
//! only when true, and literal nodes project to `true`/`false`. The output
//! map is key-sorted.

use std::collections::BTreeSet;

use jsm_core::JsonType;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};

use crate::array::{ArrayKeywords, Items};
use crate::keyword::Keyword;
use crate::node::{KindKeywords, SchemaNode};
use crate::number::NumberKeywords;
use crate::object::{Dependency, ObjectKeywords};
use crate::string::StringKeywords;

/// Largest magnitude below which every integral `f64` is exact.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Integral values become JSON integers, everything else a float.
pub(crate) fn number_value(x: f64) -> Value {
    if x.fract() == 0.0 && x.abs() < MAX_SAFE_INTEGER {
        return Value::from(x as i64);
    }
    Number::from_f64(x).map_or(Value::Null, Value::Number)
}

/// A single type as a string, several as an array.
pub(crate) fn types_value(types: &BTreeSet<JsonType>) -> Value {
    if types.len() == 1 {
        if let Some(only) = types.first() {
            return Value::String(only.as_str().to_string());
        }
    }
    Value::Array(
        types
            .iter()
            .map(|t| Value::String(t.as_str().to_string()))
            .collect(),
    )
}

struct Out(Map<String, Value>);

impl Out {
    fn put(&mut self, keyword: Keyword, value: Value) {
        self.0.insert(keyword.as_str().to_string(), value);
    }

    fn text(&mut self, keyword: Keyword, text: Option<&str>) {
        if let Some(text) = text {
            self.put(keyword, Value::String(text.to_string()));
        }
    }

    fn count(&mut self, keyword: Keyword, n: Option<u64>) {
        if let Some(n) = n {
            self.put(keyword, Value::from(n));
        }
    }

    fn number(&mut self, keyword: Keyword, x: Option<f64>) {
        if let Some(x) = x {
            self.put(keyword, number_value(x));
        }
    }

    fn flag(&mut self, keyword: Keyword, on: bool) {
        if on {
            self.put(keyword, Value::Bool(true));
        }
    }

    fn node(&mut self, keyword: Keyword, node: Option<&SchemaNode>) {
        if let Some(node) = node {
            self.put(keyword, node.to_json());
        }
    }

    fn nodes(&mut self, keyword: Keyword, nodes: Option<&[SchemaNode]>) {
        if let Some(nodes) = nodes {
            self.put(keyword, Value::Array(nodes.iter().map(SchemaNode::to_json).collect()));
        }
    }
}

impl SchemaNode {
    /// Project to a JSON Schema value.
    pub fn to_json(&self) -> Value {
        if let KindKeywords::Literal(verdict) = self.kind {
            return Value::Bool(verdict);
        }
        let mut out = Out(Map::new());
        let g = &self.generic;
        out.text(Keyword::Id, g.id.as_deref());
        out.text(Keyword::Title, g.title.as_deref());
        out.text(Keyword::Description, g.description.as_deref());
        out.text(Keyword::Comment, g.comment.as_deref());
        if let Some(types) = &g.types {
            out.put(Keyword::Type, types_value(types));
        }
        if let Some(default) = &g.default {
            out.put(Keyword::Default, default.clone());
        }
        if let Some(examples) = &g.examples {
            out.put(Keyword::Examples, Value::Array(examples.clone()));
        }
        out.flag(Keyword::ReadOnly, g.read_only);
        out.flag(Keyword::WriteOnly, g.write_only);
        if let Some(members) = &g.enum_values {
            out.put(Keyword::Enum, Value::Array(members.clone()));
        }
        if let Some(constant) = &g.const_value {
            out.put(Keyword::Const, constant.clone());
        }

        match &self.kind {
            KindKeywords::String(k) => project_string(&mut out, k),
            KindKeywords::Number(k) => project_number(&mut out, k),
            KindKeywords::Object(k) => project_object(&mut out, k),
            KindKeywords::Array(k) => project_array(&mut out, k),
            KindKeywords::Any
            | KindKeywords::Boolean
            | KindKeywords::Null
            | KindKeywords::Literal(_) => {}
        }

        out.nodes(Keyword::AllOf, g.all_of.as_deref());
        out.nodes(Keyword::AnyOf, g.any_of.as_deref());
        out.nodes(Keyword::OneOf, g.one_of.as_deref());
        out.node(Keyword::Not, g.not.as_deref());
        out.node(Keyword::If, g.if_schema.as_deref());
        out.node(Keyword::Then, g.then_schema.as_deref());
        out.node(Keyword::Else, g.else_schema.as_deref());
        Value::Object(out.0)
    }
}

fn project_string(out: &mut Out, k: &StringKeywords) {
    out.count(Keyword::MinLength, k.min_length);
    out.count(Keyword::MaxLength, k.max_length);
    out.text(Keyword::Pattern, k.pattern.as_ref().map(|p| p.as_str()));
    out.text(Keyword::Format, k.format.as_deref());
    out.text(Keyword::ContentEncoding, k.content_encoding.as_deref());
    out.text(Keyword::ContentMediaType, k.content_media_type.as_deref());
}

fn project_number(out: &mut Out, k: &NumberKeywords) {
    out.number(Keyword::Minimum, k.minimum);
    out.number(Keyword::Maximum, k.maximum);
    out.number(Keyword::ExclusiveMinimum, k.exclusive_minimum);
    out.number(Keyword::ExclusiveMaximum, k.exclusive_maximum);
    out.number(Keyword::MultipleOf, k.multiple_of);
}

fn project_object(out: &mut Out, k: &ObjectKeywords) {
    if !k.properties.is_empty() {
        let props = k
            .properties
            .iter()
            .map(|(name, node)| (name.clone(), node.to_json()))
            .collect();
        out.put(Keyword::Properties, Value::Object(props));
    }
    if !k.pattern_properties.is_empty() {
        let props = k
            .pattern_properties
            .iter()
            .map(|(source, entry)| (source.clone(), entry.schema.to_json()))
            .collect();
        out.put(Keyword::PatternProperties, Value::Object(props));
    }
    out.node(Keyword::AdditionalProperties, k.additional_properties.as_deref());
    if let Some(required) = &k.required {
        out.put(
            Keyword::Required,
            Value::Array(required.iter().cloned().map(Value::String).collect()),
        );
    }
    out.count(Keyword::MinProperties, k.min_properties);
    out.count(Keyword::MaxProperties, k.max_properties);
    if !k.dependencies.is_empty() {
        let deps = k
            .dependencies
            .iter()
            .map(|(trigger, dependency)| {
                let value = match dependency {
                    Dependency::Properties(names) => {
                        Value::Array(names.iter().cloned().map(Value::String).collect())
                    }
                    Dependency::Schema(node) => node.to_json(),
                };
                (trigger.clone(), value)
            })
            .collect();
        out.put(Keyword::Dependencies, Value::Object(deps));
    }
    out.node(Keyword::PropertyNames, k.property_names.as_deref());
}

fn project_array(out: &mut Out, k: &ArrayKeywords) {
    match &k.items {
        Some(Items::Single(node)) => out.put(Keyword::Items, node.to_json()),
        Some(Items::Tuple(nodes)) => out.nodes(Keyword::Items, Some(nodes.as_slice())),
        None => {}
    }
    out.node(Keyword::AdditionalItems, k.additional_items.as_deref());
    out.node(Keyword::Contains, k.contains.as_deref());
    out.count(Keyword::MinItems, k.min_items);
    out.count(Keyword::MaxItems, k.max_items);
    out.flag(Keyword::UniqueItems, k.unique_items);
}

impl Serialize for SchemaNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SchemaNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        SchemaNode::from_json(&value).map_err(serde::de::Error::custom)
    }
}

//! # jsm-schema: JSON Schema Document Model & Validation Engine
//!
//! Build schema trees that can never be internally contradictory, then match
//! JSON instances against them and get back a structured, filterable list of
//! violations.
//!
//! ## Schema Model (`node`, `string`, `number`, `object`, `array`)
//!
//! [`SchemaNode`] is one tagged variant over the kinds Any, String, Number,
//! Boolean, Null, Object, Array and the literal `true`/`false` schemas. Every
//! setter validates the assignment against the node's kind and re-checks
//! `default`, `const` and `enum` against the updated node. A rejected
//! assignment returns a [`SchemaConstructionError`] and leaves the node
//! untouched.
//!
//! ## Validation (`engine`)
//!
//! [`validate`] walks the tree in a fixed keyword order and never fails:
//! every violation becomes a [`ValidationError`] with a JSON Pointer path,
//! the violated [`Keyword`], a message, and expected/actual values.
//! [`is_valid`] and [`validate_strict`] are thin adapters over it.
//! [`Validator`] carries [`ValidatorOptions`] and the format registry.
//!
//! ## Interchange (`serialize`, `parse`, `document`)
//!
//! [`SchemaNode::to_json`] projects a node to draft-07 JSON;
//! [`SchemaNode::from_json`] parses through the same setters, so parsed
//! schemas obey the same invariants. [`SchemaDocument`] adds `$id`,
//! `$schema` and `$comment`.
//!
//! ## Crate Policy
//!
//! - Depends only on `jsm-core` internally.
//! - No `$ref` resolution: references are rejected at parse time.
//! - No `unsafe`, and no `.unwrap()` outside tests.

pub mod array;
pub mod document;
pub mod engine;
pub mod error;
pub mod keyword;
pub mod node;
pub mod number;
pub mod object;
mod parse;
pub mod report;
mod serialize;
pub mod string;

pub use array::{ArrayKeywords, Items};
pub use document::{SchemaDocument, DRAFT_07};
pub use engine::{is_valid, validate, validate_strict, Validator, ValidatorOptions};
pub use error::{SchemaConstructionError, SchemaValidationError};
pub use keyword::{Keyword, UnknownKeyword};
pub use node::{Kind, KindKeywords, SchemaNode};
pub use number::NumberKeywords;
pub use object::{Dependency, ObjectKeywords, PatternProperty};
pub use report::{ValidationError, ValidationResult};
pub use string::StringKeywords;

pub use jsm_core::{JsonPointer, JsonType};

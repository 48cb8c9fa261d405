//! # jsm-core: JSON Primitives for the Schema Model
//!
//! This crate holds the leaf-level building blocks that the schema model and
//! the validation engine in `jsm-schema` are built on. It knows nothing about
//! schemas; it only knows about JSON values.
//!
//! ## Key Design Principles
//!
//! 1. **One equality.** `const`, `enum` and `uniqueItems` all go through
//!    [`json_equal`]. Numbers compare numerically, objects ignore key order.
//!
//! 2. **Compile once.** [`Pattern`] compiles at construction. Nothing in the
//!    validation path can fail because of a malformed regular expression.
//!
//! 3. **Pluggable formats.** [`FormatRegistry`] maps format names to
//!    predicates. Unknown names are reported as unknown, never as failures.
//!
//! 4. **Escaped pointers.** [`JsonPointer`] always holds RFC 6901 text, so
//!    paths in diagnostics are directly machine-resolvable.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `jsm-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod error;
pub mod format;
pub mod pattern;
pub mod pointer;
pub mod value;
pub mod yaml;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use error::{CanonicalizationError, CoreError, PatternError, PointerError};
pub use format::{FormatPredicate, FormatRegistry};
pub use pattern::Pattern;
pub use pointer::JsonPointer;
pub use value::{is_integral, json_equal, number_equal, JsonType};
pub use yaml::{parse_yaml, yaml_to_json_value};

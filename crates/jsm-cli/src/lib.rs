//! # jsm-cli: Schema Validation Command-Line Interface
//!
//! A thin clap front end over `jsm-schema`.
//!
//! ## Subcommands
//!
//! - `validate`: check an instance file against a schema file
//! - `inspect`: parse a schema and print its canonical JSON form
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to `jsm-schema`; no validation logic here.
//! - Handlers return rendered output instead of printing, so they are
//!   testable without a process boundary.

pub mod input;
pub mod inspect;
pub mod validate;

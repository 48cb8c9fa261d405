//! # String Format Registry
//!
//! Named predicates behind the `format` keyword. The registry is a plain
//! map from format name to predicate; the validation engine looks a name up
//! and treats a missing entry as an unknown, non-fatal format.
//!
//! [`FormatRegistry::with_defaults`] installs the common draft-07 formats:
//!
//! | name        | check                                          |
//! |-------------|------------------------------------------------|
//! | `email`     | `local@domain` with a hostname-shaped domain    |
//! | `hostname`  | RFC 1123 labels, 253 octets max                 |
//! | `ipv4`      | dotted quad                                    |
//! | `ipv6`      | RFC 4291 text form                             |
//! | `uri`       | absolute URI (`url` crate)                     |
//! | `uri-reference` | absolute or relative reference             |
//! | `date-time` | RFC 3339 timestamp (`chrono`)                  |
//! | `date`      | RFC 3339 full-date                             |
//! | `time`      | RFC 3339 full-time                             |
//! | `uuid`      | hyphenated UUID (`uuid` crate)                 |
//! | `regex`     | compiles as a regular expression               |

use std::collections::BTreeMap;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

use chrono::{DateTime, NaiveDate};

/// A format predicate.
pub type FormatPredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Registry of named string format predicates.
#[derive(Clone, Default)]
pub struct FormatRegistry {
    predicates: BTreeMap<String, FormatPredicate>,
}

impl FormatRegistry {
    /// An empty registry; every format is unknown.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in formats listed in the module docs.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("email", is_email);
        registry.register("hostname", is_hostname);
        registry.register("ipv4", |s| s.parse::<Ipv4Addr>().is_ok());
        registry.register("ipv6", |s| s.parse::<Ipv6Addr>().is_ok());
        registry.register("uri", |s| url::Url::parse(s).is_ok());
        registry.register("uri-reference", is_uri_reference);
        registry.register("date-time", |s| DateTime::parse_from_rfc3339(s).is_ok());
        registry.register("date", is_date);
        registry.register("time", is_time);
        registry.register("uuid", |s| {
            s.len() == 36 && uuid::Uuid::parse_str(s).is_ok()
        });
        registry.register("regex", |s| regex::Regex::new(s).is_ok());
        registry
    }

    /// Register (or replace) a predicate under `name`.
    pub fn register<F>(&mut self, name: impl Into<String>, predicate: F) -> &mut Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.predicates.insert(name.into(), Arc::new(predicate));
        self
    }

    /// Remove a predicate, returning whether it existed.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.predicates.remove(name).is_some()
    }

    /// Whether a predicate is registered for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.predicates.contains_key(name)
    }

    /// Evaluate `name` against `text`. `None` means the format is unknown.
    pub fn check(&self, name: &str, text: &str) -> Option<bool> {
        self.predicates.get(name).map(|p| p(text))
    }

    /// Registered format names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.predicates.keys().map(String::as_str)
    }
}

impl fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.predicates.keys()).finish()
    }
}

fn is_hostname(s: &str) -> bool {
    let s = s.strip_suffix('.').unwrap_or(s);
    if s.is_empty() || s.len() > 253 {
        return false;
    }
    s.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

fn is_email(s: &str) -> bool {
    let Some((local, domain)) = s.rsplit_once('@') else {
        return false;
    };
    if local.is_empty() || local.len() > 64 || local.starts_with('.') || local.ends_with('.') {
        return false;
    }
    if local.contains("..") || local.chars().any(|c| c.is_whitespace() || c == '@') {
        return false;
    }
    if let Some(literal) = domain.strip_prefix('[').and_then(|d| d.strip_suffix(']')) {
        return literal.parse::<Ipv4Addr>().is_ok()
            || literal
                .strip_prefix("IPv6:")
                .is_some_and(|v6| v6.parse::<Ipv6Addr>().is_ok());
    }
    is_hostname(domain)
}

fn is_uri_reference(s: &str) -> bool {
    if s.chars().any(|c| c.is_whitespace()) {
        return false;
    }
    if url::Url::parse(s).is_ok() {
        return true;
    }
    url::Url::parse("http://reference.invalid/")
        .and_then(|base| base.join(s))
        .is_ok()
}

fn is_date(s: &str) -> bool {
    s.len() == 10 && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

fn is_time(s: &str) -> bool {
    DateTime::parse_from_rfc3339(&format!("1970-01-01T{s}")).is_ok()
}

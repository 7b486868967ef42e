//! # Automate Catalog
//!
//! The static directory of backend REST operations the command pipeline is
//! allowed to reference. The catalog is pure data:
//! - loaded once, immutable for the process lifetime
//! - keyed by domain area, then by operation name
//! - serialized into the generator directive so the model is restricted to
//!   endpoints that actually exist
//!
//! Path templates may contain `{id}`-style placeholders; the pipeline does
//! not substitute them — the generator is expected to emit fully resolved
//! endpoint strings.

mod builtin;

pub use builtin::{builtin_catalog, quick_actions, QuickAction};

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a string does not name one of the four HTTP verbs.
#[derive(Debug, Error)]
#[error("invalid HTTP method: {0}")]
pub struct MethodParseError(pub String);

/// The closed set of HTTP verbs the backend exposes.
///
/// Anything else in model output is a coercion failure, never a valid plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[serde(alias = "get")]
    Get,
    #[serde(alias = "post")]
    Post,
    #[serde(alias = "put")]
    Put,
    #[serde(alias = "delete")]
    Delete,
}

impl HttpMethod {
    /// Canonical uppercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether the verb mutates backend state.
    pub fn is_mutating(&self) -> bool {
        !matches!(self, HttpMethod::Get)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = MethodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(MethodParseError(s.to_string())),
        }
    }
}

/// One backend operation: a (possibly templated) URL, a verb, and a human
/// description the model sees when picking a call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointDescriptor {
    pub endpoint: String,
    pub method: HttpMethod,
    pub description: String,
}

impl EndpointDescriptor {
    pub fn new(
        endpoint: impl Into<String>,
        method: HttpMethod,
        description: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            method,
            description: description.into(),
        }
    }
}

/// Operations of a single domain area, keyed by operation name.
pub type DomainCatalog = BTreeMap<String, EndpointDescriptor>;

/// Mapping from domain-area key to its operations.
///
/// `BTreeMap` keeps serialization deterministic, which keeps generator
/// directives stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EndpointCatalog {
    areas: BTreeMap<String, DomainCatalog>,
}

impl EndpointCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) a whole domain area.
    pub fn insert_area(&mut self, area: impl Into<String>, operations: DomainCatalog) {
        self.areas.insert(area.into(), operations);
    }

    /// Look up one domain area.
    pub fn area(&self, area: &str) -> Option<&DomainCatalog> {
        self.areas.get(area)
    }

    /// Iterate over domain-area keys.
    pub fn area_names(&self) -> impl Iterator<Item = &str> {
        self.areas.keys().map(String::as_str)
    }

    /// Number of domain areas.
    pub fn area_count(&self) -> usize {
        self.areas.len()
    }

    /// Total number of operations across all areas.
    pub fn operation_count(&self) -> usize {
        self.areas.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// The slice of the catalog relevant to a selected domain area.
    ///
    /// `sales` is an alias for `orders`. An unknown area yields the full
    /// catalog so the generator still sees every real endpoint rather than
    /// an empty directory.
    pub fn slice(&self, domain_area: &str) -> EndpointCatalog {
        let key = match domain_area {
            "sales" => "orders",
            other => other,
        };
        match self.areas.get(key) {
            Some(operations) => {
                let mut areas = BTreeMap::new();
                areas.insert(key.to_string(), operations.clone());
                EndpointCatalog { areas }
            }
            None => self.clone(),
        }
    }
}

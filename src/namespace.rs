//! RDF namespace and prefix management
//!
//! This module resolves names used by callers into full IRIs:
//! - `prefix:local` with a registered prefix expands to `namespace + local`
//! - absolute IRIs and blank node labels (`_:id`) pass through unchanged
//! - anything else is resolved against the model's base namespace

use crate::vocab;
use indexmap::IndexMap;
use oxiri::Iri;
use thiserror::Error;

/// Prefix errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PrefixError {
    /// Unknown prefix
    #[error("Unknown prefix: {0}")]
    UnknownPrefix(String),

    /// Invalid IRI
    #[error("Invalid IRI: {0}")]
    InvalidIri(String),
}

pub type PrefixResult<T> = Result<T, PrefixError>;

/// Namespace (prefix → IRI mapping)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    /// Prefix
    pub prefix: String,
    /// IRI
    pub iri: String,
}

impl Namespace {
    /// Create a new namespace
    pub fn new(prefix: impl Into<String>, iri: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            iri: iri.into(),
        }
    }
}

/// Returns true for blank node labels such as `_:b0`
pub fn is_blank_label(name: &str) -> bool {
    name.starts_with("_:")
}

/// Returns true when `name` parses as an absolute IRI (it carries a scheme)
pub fn is_absolute_iri(name: &str) -> bool {
    Iri::parse(name).is_ok()
}

/// Returns true when `name` starts with a URI scheme (`[A-Za-z][A-Za-z0-9+.-]*:`)
pub fn has_scheme(name: &str) -> bool {
    let Some((scheme, _)) = name.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Namespace manager: a base namespace plus a prefix table
#[derive(Debug, Clone)]
pub struct NamespaceManager {
    /// Namespace for unprefixed names
    base: String,
    /// Prefix → IRI mappings, in registration order
    prefixes: IndexMap<String, String>,
}

impl NamespaceManager {
    /// Create a namespace manager with the given base and the common
    /// RDF/RDFS/XSD/OWL prefixes
    pub fn new(base: impl Into<String>) -> PrefixResult<Self> {
        let base = base.into();
        if !is_absolute_iri(&base) {
            return Err(PrefixError::InvalidIri(base));
        }

        let mut mgr = Self {
            base,
            prefixes: IndexMap::new(),
        };

        mgr.add_prefix("rdf", vocab::IRI_RDF);
        mgr.add_prefix("rdfs", vocab::IRI_RDFS);
        mgr.add_prefix("xsd", vocab::IRI_XSD);
        mgr.add_prefix("owl", vocab::IRI_OWL);

        Ok(mgr)
    }

    /// Add (or replace) a prefix
    pub fn add_prefix(&mut self, prefix: impl Into<String>, iri: impl Into<String>) {
        self.prefixes.insert(prefix.into(), iri.into());
    }

    /// Get IRI for a prefix
    pub fn get_iri(&self, prefix: &str) -> PrefixResult<&str> {
        self.prefixes
            .get(prefix)
            .map(|s| s.as_str())
            .ok_or_else(|| PrefixError::UnknownPrefix(prefix.to_string()))
    }

    /// Base namespace
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Expand a name to a full IRI. Expansion is idempotent.
    pub fn expand(&self, name: &str) -> String {
        if is_blank_label(name) {
            return name.to_string();
        }

        if let Some((prefix, local)) = name.split_once(':') {
            if let Ok(namespace) = self.get_iri(prefix) {
                return format!("{}{}", namespace, local);
            }
            if has_scheme(name) {
                return name.to_string();
            }
        }

        format!("{}{}", self.base, name)
    }

    /// Compact an IRI using the longest matching registered namespace
    pub fn compact(&self, iri: &str) -> Option<String> {
        self.prefixes
            .iter()
            .filter(|(_, namespace)| iri.starts_with(namespace.as_str()))
            .max_by_key(|(_, namespace)| namespace.len())
            .map(|(prefix, namespace)| format!("{}:{}", prefix, &iri[namespace.len()..]))
    }

    /// Get all registered prefixes
    pub fn prefixes(&self) -> Vec<Namespace> {
        self.prefixes
            .iter()
            .map(|(prefix, iri)| Namespace::new(prefix.clone(), iri.clone()))
            .collect()
    }
}

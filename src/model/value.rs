//! Bound values: natives, literals and resource references
//!
//! Equality used by lookups and deletes is [`Value::matches`], which is
//! deliberately asymmetric for language-tagged literals: a query without a
//! language tag matches every language variant of the same text, while a
//! tagged query must match text and tag exactly.

use super::types::ResourceId;
use crate::datatype::{Datatype, DatatypeResult, Native};
use chrono::{DateTime, Utc};
use std::fmt;

/// A typed literal: lexical form, datatype resource, optional language tag
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    lexical: String,
    datatype: ResourceId,
    kind: Datatype,
    language: Option<String>,
}

impl Literal {
    pub(crate) fn new(
        lexical: impl Into<String>,
        datatype: ResourceId,
        kind: Datatype,
        language: Option<String>,
    ) -> Self {
        Self {
            lexical: lexical.into(),
            datatype,
            kind,
            language,
        }
    }

    pub fn lexical(&self) -> &str {
        &self.lexical
    }

    /// The datatype resource
    pub fn datatype(&self) -> ResourceId {
        self.datatype
    }

    /// The well-known datatype, or `Datatype::Custom`
    pub fn kind(&self) -> Datatype {
        self.kind
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Coerce the lexical form to its native value
    pub fn value(&self) -> DatatypeResult<Native> {
        self.kind.coerce(&self.lexical)
    }

    /// Coerce, also enforcing the datatype's facets
    pub fn checked_value(&self) -> DatatypeResult<Native> {
        self.kind.coerce_checked(&self.lexical)
    }

    fn same_term(&self, other: &Literal) -> bool {
        self.lexical == other.lexical && self.datatype == other.datatype
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.language {
            Some(lang) => write!(f, "\"{}\"@{}", self.lexical, lang),
            None => write!(f, "\"{}\"^^{}", self.lexical, self.kind),
        }
    }
}

/// A value bound to a property
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Native(Native),
    Literal(Literal),
    Resource(ResourceId),
}

impl Value {
    pub fn as_resource(&self) -> Option<ResourceId> {
        match self {
            Value::Resource(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_native(&self) -> Option<&Native> {
        match self {
            Value::Native(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Value::Literal(l) => Some(l),
            _ => None,
        }
    }

    pub fn is_resource(&self) -> bool {
        matches!(self, Value::Resource(_))
    }

    pub fn language(&self) -> Option<&str> {
        self.as_literal().and_then(Literal::language)
    }

    /// The coerced native value, `None` for resource references
    pub fn native(&self) -> DatatypeResult<Option<Native>> {
        match self {
            Value::Native(n) => Ok(Some(n.clone())),
            Value::Literal(l) => l.value().map(Some),
            Value::Resource(_) => Ok(None),
        }
    }

    /// True if this bound value matches `query`
    pub fn matches(&self, query: &Value) -> bool {
        match (self, query) {
            (Value::Resource(a), Value::Resource(b)) => a == b,
            (Value::Resource(_), _) | (_, Value::Resource(_)) => false,
            (Value::Native(a), Value::Native(b)) => a == b,
            (Value::Literal(entry), query) if entry.language.is_some() => match query {
                Value::Literal(q) => match &q.language {
                    Some(_) => entry.lexical == q.lexical && entry.language == q.language,
                    None => entry.lexical == q.lexical,
                },
                Value::Native(Native::String(text)) => entry.lexical == *text,
                _ => false,
            },
            (_, Value::Literal(q)) if q.language.is_some() => false,
            (Value::Literal(a), Value::Literal(b)) => {
                if a.kind == Datatype::Custom || b.kind == Datatype::Custom {
                    return a.same_term(b);
                }
                match (a.value(), b.value()) {
                    (Ok(x), Ok(y)) => x == y,
                    _ => a.same_term(b),
                }
            }
            (Value::Literal(l), Value::Native(n)) | (Value::Native(n), Value::Literal(l)) => {
                l.value().map_or(false, |v| v == *n)
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Native(n) => write!(f, "{}", n),
            Value::Literal(l) => write!(f, "{}", l),
            Value::Resource(id) => write!(f, "{}", id),
        }
    }
}

impl From<Native> for Value {
    fn from(n: Native) -> Self {
        Value::Native(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Native(Native::String(s.to_string()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Native(Native::String(s))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Native(Native::Number(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Native(Native::Number(n as f64))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Native(Native::Number(n as f64))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Native(Native::Boolean(b))
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Value::Native(Native::Date(d))
    }
}

impl From<Literal> for Value {
    fn from(l: Literal) -> Self {
        Value::Literal(l)
    }
}

impl From<ResourceId> for Value {
    fn from(id: ResourceId) -> Self {
        Value::Resource(id)
    }
}

//! XML Schema datatype family and lexical ↔ native coercion
//!
//! Literal values are stored in lexical form and coerced on read. Coercion
//! comes in two strengths:
//! - [`Datatype::coerce`] converts the lexical form to a [`Native`] value.
//!   Integer family values must fit the exactly representable `f64` range and
//!   booleans must use one of the four XSD lexical forms.
//! - [`Datatype::coerce_checked`] additionally enforces the value-space facets
//!   of the datatype (for instance `xsd:unsignedByte` is `0..=255`).

use crate::vocab::*;
use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use std::fmt;
use thiserror::Error;

/// Largest integer an `f64` represents exactly (2^53 - 1)
pub const MAX_SAFE_INTEGER: i128 = 9_007_199_254_740_991;

/// Coercion errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DatatypeError {
    /// Integer outside the datatype's bounds
    #[error("Value {value} is out of range for {datatype}")]
    OutOfRange {
        value: String,
        datatype: &'static str,
    },

    /// Boolean lexical form other than true/false/1/0
    #[error("Invalid boolean lexical form: {0:?}")]
    InvalidBoolean(String),

    /// Lexical form that does not parse
    #[error("Cannot coerce {lexical:?} to {datatype}: {reason}")]
    Malformed {
        lexical: String,
        datatype: &'static str,
        reason: String,
    },
}

impl DatatypeError {
    /// Range-class failures (bounds and boolean forms), as opposed to
    /// malformed lexical forms
    pub fn is_range_error(&self) -> bool {
        matches!(
            self,
            DatatypeError::OutOfRange { .. } | DatatypeError::InvalidBoolean(_)
        )
    }
}

pub type DatatypeResult<T> = Result<T, DatatypeError>;

/// Native value a literal coerces to
#[derive(Debug, Clone, PartialEq)]
pub enum Native {
    String(String),
    Number(f64),
    Boolean(bool),
    Date(DateTime<Utc>),
}

impl Native {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Native::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Native::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Native::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Native::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// The datatype a native value is written as
    pub fn datatype(&self) -> Datatype {
        match self {
            Native::String(_) => Datatype::String,
            Native::Number(n) if is_safe_integral(*n) => Datatype::Integer,
            Native::Number(_) => Datatype::Double,
            Native::Boolean(_) => Datatype::Boolean,
            Native::Date(_) => Datatype::DateTime,
        }
    }

    /// Canonical lexical form, paired with [`Native::datatype`]
    pub fn to_lexical(&self) -> String {
        match self {
            Native::String(s) => s.clone(),
            Native::Number(n) if is_safe_integral(*n) => format!("{}", *n as i64),
            Native::Number(n) => canonical_double(*n),
            Native::Boolean(b) => b.to_string(),
            Native::Date(d) => d.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

impl fmt::Display for Native {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Native::String(s) => write!(f, "{}", s),
            Native::Number(n) => write!(f, "{}", n),
            Native::Boolean(b) => write!(f, "{}", b),
            Native::Date(d) => write!(f, "{}", d.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }
}

fn is_safe_integral(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER as f64
}

fn canonical_double(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "INF" } else { "-INF" }.to_string();
    }
    let formatted = format!("{:E}", n);
    match formatted.split_once('E') {
        Some((mantissa, exponent)) if !mantissa.contains('.') => {
            format!("{}.0E{}", mantissa, exponent)
        }
        _ => formatted,
    }
}

/// Known datatypes. Anything else is `Custom` and coerces to its lexical text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Datatype {
    String,
    Boolean,
    Decimal,
    Float,
    Double,
    Integer,
    NonPositiveInteger,
    NegativeInteger,
    Long,
    Int,
    Short,
    Byte,
    NonNegativeInteger,
    UnsignedLong,
    UnsignedInt,
    UnsignedShort,
    UnsignedByte,
    PositiveInteger,
    Date,
    DateTime,
    DateTimeStamp,
    LangString,
    Html,
    XmlLiteral,
    Custom,
}

impl Datatype {
    /// Every datatype with a well-known IRI
    pub const KNOWN: [Datatype; 24] = [
        Datatype::String,
        Datatype::Boolean,
        Datatype::Decimal,
        Datatype::Float,
        Datatype::Double,
        Datatype::Integer,
        Datatype::NonPositiveInteger,
        Datatype::NegativeInteger,
        Datatype::Long,
        Datatype::Int,
        Datatype::Short,
        Datatype::Byte,
        Datatype::NonNegativeInteger,
        Datatype::UnsignedLong,
        Datatype::UnsignedInt,
        Datatype::UnsignedShort,
        Datatype::UnsignedByte,
        Datatype::PositiveInteger,
        Datatype::Date,
        Datatype::DateTime,
        Datatype::DateTimeStamp,
        Datatype::LangString,
        Datatype::Html,
        Datatype::XmlLiteral,
    ];

    pub fn from_iri(iri: &str) -> Self {
        Self::KNOWN
            .iter()
            .copied()
            .find(|dt| dt.iri() == Some(iri))
            .unwrap_or(Datatype::Custom)
    }

    pub fn iri(self) -> Option<&'static str> {
        let iri = match self {
            Datatype::String => IRI_XSD_STRING,
            Datatype::Boolean => IRI_XSD_BOOLEAN,
            Datatype::Decimal => IRI_XSD_DECIMAL,
            Datatype::Float => IRI_XSD_FLOAT,
            Datatype::Double => IRI_XSD_DOUBLE,
            Datatype::Integer => IRI_XSD_INTEGER,
            Datatype::NonPositiveInteger => IRI_XSD_NON_POSITIVE_INTEGER,
            Datatype::NegativeInteger => IRI_XSD_NEGATIVE_INTEGER,
            Datatype::Long => IRI_XSD_LONG,
            Datatype::Int => IRI_XSD_INT,
            Datatype::Short => IRI_XSD_SHORT,
            Datatype::Byte => IRI_XSD_BYTE,
            Datatype::NonNegativeInteger => IRI_XSD_NON_NEGATIVE_INTEGER,
            Datatype::UnsignedLong => IRI_XSD_UNSIGNED_LONG,
            Datatype::UnsignedInt => IRI_XSD_UNSIGNED_INT,
            Datatype::UnsignedShort => IRI_XSD_UNSIGNED_SHORT,
            Datatype::UnsignedByte => IRI_XSD_UNSIGNED_BYTE,
            Datatype::PositiveInteger => IRI_XSD_POSITIVE_INTEGER,
            Datatype::Date => IRI_XSD_DATE,
            Datatype::DateTime => IRI_XSD_DATETIME,
            Datatype::DateTimeStamp => IRI_XSD_DATETIMESTAMP,
            Datatype::LangString => IRI_RDF_LANGSTRING,
            Datatype::Html => IRI_RDF_HTML,
            Datatype::XmlLiteral => IRI_RDF_XMLLITERAL,
            Datatype::Custom => return None,
        };
        Some(iri)
    }

    /// Short prefixed name, used in error messages
    pub fn name(self) -> &'static str {
        match self {
            Datatype::String => "xsd:string",
            Datatype::Boolean => "xsd:boolean",
            Datatype::Decimal => "xsd:decimal",
            Datatype::Float => "xsd:float",
            Datatype::Double => "xsd:double",
            Datatype::Integer => "xsd:integer",
            Datatype::NonPositiveInteger => "xsd:nonPositiveInteger",
            Datatype::NegativeInteger => "xsd:negativeInteger",
            Datatype::Long => "xsd:long",
            Datatype::Int => "xsd:int",
            Datatype::Short => "xsd:short",
            Datatype::Byte => "xsd:byte",
            Datatype::NonNegativeInteger => "xsd:nonNegativeInteger",
            Datatype::UnsignedLong => "xsd:unsignedLong",
            Datatype::UnsignedInt => "xsd:unsignedInt",
            Datatype::UnsignedShort => "xsd:unsignedShort",
            Datatype::UnsignedByte => "xsd:unsignedByte",
            Datatype::PositiveInteger => "xsd:positiveInteger",
            Datatype::Date => "xsd:date",
            Datatype::DateTime => "xsd:dateTime",
            Datatype::DateTimeStamp => "xsd:dateTimeStamp",
            Datatype::LangString => "rdf:langString",
            Datatype::Html => "rdf:HTML",
            Datatype::XmlLiteral => "rdf:XMLLiteral",
            Datatype::Custom => "custom datatype",
        }
    }

    /// The datatype this one is derived from by restriction
    pub fn base(self) -> Option<Datatype> {
        match self {
            Datatype::Integer => Some(Datatype::Decimal),
            Datatype::NonPositiveInteger => Some(Datatype::Integer),
            Datatype::NegativeInteger => Some(Datatype::NonPositiveInteger),
            Datatype::Long => Some(Datatype::Integer),
            Datatype::Int => Some(Datatype::Long),
            Datatype::Short => Some(Datatype::Int),
            Datatype::Byte => Some(Datatype::Short),
            Datatype::NonNegativeInteger => Some(Datatype::Integer),
            Datatype::UnsignedLong => Some(Datatype::NonNegativeInteger),
            Datatype::UnsignedInt => Some(Datatype::UnsignedLong),
            Datatype::UnsignedShort => Some(Datatype::UnsignedInt),
            Datatype::UnsignedByte => Some(Datatype::UnsignedShort),
            Datatype::PositiveInteger => Some(Datatype::NonNegativeInteger),
            Datatype::DateTimeStamp => Some(Datatype::DateTime),
            _ => None,
        }
    }

    /// True if `self` is `other` or derives from it
    pub fn is_derived_from(self, other: Datatype) -> bool {
        let mut current = Some(self);
        while let Some(dt) = current {
            if dt == other {
                return true;
            }
            current = dt.base();
        }
        false
    }

    pub fn is_integer(self) -> bool {
        self.is_derived_from(Datatype::Integer)
    }

    /// Inclusive value-space facets of the integer family
    pub fn bounds(self) -> (Option<i128>, Option<i128>) {
        match self {
            Datatype::NonPositiveInteger => (None, Some(0)),
            Datatype::NegativeInteger => (None, Some(-1)),
            Datatype::Long => (Some(i64::MIN as i128), Some(i64::MAX as i128)),
            Datatype::Int => (Some(i32::MIN as i128), Some(i32::MAX as i128)),
            Datatype::Short => (Some(i16::MIN as i128), Some(i16::MAX as i128)),
            Datatype::Byte => (Some(i8::MIN as i128), Some(i8::MAX as i128)),
            Datatype::NonNegativeInteger => (Some(0), None),
            Datatype::UnsignedLong => (Some(0), Some(u64::MAX as i128)),
            Datatype::UnsignedInt => (Some(0), Some(u32::MAX as i128)),
            Datatype::UnsignedShort => (Some(0), Some(u16::MAX as i128)),
            Datatype::UnsignedByte => (Some(0), Some(u8::MAX as i128)),
            Datatype::PositiveInteger => (Some(1), None),
            _ => (None, None),
        }
    }

    /// Convert a lexical form to its native value
    pub fn coerce(self, lexical: &str) -> DatatypeResult<Native> {
        match self {
            Datatype::Boolean => parse_boolean(lexical).map(Native::Boolean),
            Datatype::Decimal => parse_decimal(lexical).map(Native::Number),
            Datatype::Float | Datatype::Double => parse_double(self, lexical).map(Native::Number),
            dt if dt.is_integer() => {
                let n = parse_integer(dt, lexical)?;
                check_safe(dt, n)?;
                Ok(Native::Number(n as f64))
            }
            Datatype::Date | Datatype::DateTime | Datatype::DateTimeStamp => {
                parse_date(self, lexical).map(Native::Date)
            }
            _ => Ok(Native::String(lexical.to_string())),
        }
    }

    /// Like [`Datatype::coerce`], also enforcing the datatype's facets
    pub fn coerce_checked(self, lexical: &str) -> DatatypeResult<Native> {
        if self.is_integer() {
            let n = parse_integer(self, lexical)?;
            let (min, max) = self.bounds();
            if min.is_some_and(|min| n < min) || max.is_some_and(|max| n > max) {
                return Err(out_of_range(self, n));
            }
            check_safe(self, n)?;
            return Ok(Native::Number(n as f64));
        }
        self.coerce(lexical)
    }

    /// True if a native value lies in this datatype's value space
    pub fn admits(self, value: &Native) -> bool {
        match (self, value) {
            (Datatype::String, Native::String(_)) => true,
            (Datatype::Boolean, Native::Boolean(_)) => true,
            (Datatype::Decimal, Native::Number(n)) => n.is_finite(),
            (Datatype::Float | Datatype::Double, Native::Number(_)) => true,
            (dt, Native::Number(n)) if dt.is_integer() => {
                if !is_safe_integral(*n) {
                    return false;
                }
                let n = *n as i128;
                let (min, max) = dt.bounds();
                min.map_or(true, |min| n >= min) && max.map_or(true, |max| n <= max)
            }
            (Datatype::Date | Datatype::DateTime, Native::Date(_)) => true,
            (Datatype::DateTimeStamp, Native::Date(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn malformed(datatype: Datatype, lexical: &str, reason: impl Into<String>) -> DatatypeError {
    DatatypeError::Malformed {
        lexical: lexical.to_string(),
        datatype: datatype.name(),
        reason: reason.into(),
    }
}

fn out_of_range(datatype: Datatype, value: impl fmt::Display) -> DatatypeError {
    DatatypeError::OutOfRange {
        value: value.to_string(),
        datatype: datatype.name(),
    }
}

fn check_safe(datatype: Datatype, n: i128) -> DatatypeResult<()> {
    if n.unsigned_abs() > MAX_SAFE_INTEGER as u128 {
        return Err(out_of_range(datatype, n));
    }
    Ok(())
}

fn parse_boolean(lexical: &str) -> DatatypeResult<bool> {
    match lexical.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(DatatypeError::InvalidBoolean(lexical.to_string())),
    }
}

fn parse_integer(datatype: Datatype, lexical: &str) -> DatatypeResult<i128> {
    let trimmed = lexical.trim();
    let digits = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed(datatype, lexical, "not an integer"));
    }
    // Too many digits for i128 is still an integer, just out of range
    trimmed
        .parse::<i128>()
        .map_err(|_| out_of_range(datatype, trimmed))
}

fn parse_decimal(lexical: &str) -> DatatypeResult<f64> {
    let trimmed = lexical.trim();
    let unsigned = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    let well_formed = unsigned.bytes().any(|b| b.is_ascii_digit())
        && unsigned.bytes().all(|b| b.is_ascii_digit() || b == b'.')
        && unsigned.bytes().filter(|b| *b == b'.').count() <= 1;
    if !well_formed {
        return Err(malformed(Datatype::Decimal, lexical, "not a decimal"));
    }
    trimmed
        .parse::<f64>()
        .map_err(|e| malformed(Datatype::Decimal, lexical, e.to_string()))
}

fn parse_double(datatype: Datatype, lexical: &str) -> DatatypeResult<f64> {
    match lexical.trim() {
        "INF" | "+INF" => Ok(f64::INFINITY),
        "-INF" => Ok(f64::NEG_INFINITY),
        "NaN" => Ok(f64::NAN),
        trimmed => {
            // Rust also accepts "inf" and "nan", XSD does not
            let numeric = !trimmed.is_empty()
                && trimmed
                    .bytes()
                    .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
            if !numeric {
                return Err(malformed(datatype, lexical, "not a floating point number"));
            }
            trimmed
                .parse::<f64>()
                .map_err(|e| malformed(datatype, lexical, e.to_string()))
        }
    }
}

fn parse_date(datatype: Datatype, lexical: &str) -> DatatypeResult<DateTime<Utc>> {
    let trimmed = lexical.trim();
    match datatype {
        Datatype::Date => {
            let (day, zone) = match (trimmed.get(..10), trimmed.get(10..)) {
                (Some(day), Some(zone)) => (day, zone),
                _ => return Err(malformed(datatype, lexical, "expected YYYY-MM-DD")),
            };
            let zone = if zone.is_empty() { "Z" } else { zone };
            DateTime::parse_from_rfc3339(&format!("{}T00:00:00{}", day, zone))
                .map(|d| d.with_timezone(&Utc))
                .map_err(|e| malformed(datatype, lexical, e.to_string()))
        }
        Datatype::DateTime => match DateTime::parse_from_rfc3339(trimmed) {
            Ok(d) => Ok(d.with_timezone(&Utc)),
            Err(_) => NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|naive| Utc.from_utc_datetime(&naive))
                .map_err(|e| malformed(datatype, lexical, e.to_string())),
        },
        _ => DateTime::parse_from_rfc3339(trimmed)
            .map(|d| d.with_timezone(&Utc))
            .map_err(|e| malformed(datatype, lexical, e.to_string())),
    }
}

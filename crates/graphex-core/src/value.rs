//! Property values, before and after unwrapping.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered property mapping. Iteration order is insertion order, which the
/// label rules depend on.
pub type Properties = IndexMap<String, Scalar>;

/// A property value as the query executor delivers it.
///
/// Plain JSON scalars map onto the scalar variants; cast-capable wrappers
/// arrive as single-key objects such as `{"geography": "POINT(1 2)"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Wrapped(WrappedValue),
}

/// Values that only expose a textual cast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrappedValue {
    Geography(String),
    Date(String),
    Time(String),
    #[serde(rename = "datetime", alias = "date_time")]
    DateTime(String),
    Duration(String),
}

impl WrappedValue {
    pub fn as_text(&self) -> &str {
        match self {
            WrappedValue::Geography(s)
            | WrappedValue::Date(s)
            | WrappedValue::Time(s)
            | WrappedValue::DateTime(s)
            | WrappedValue::Duration(s) => s,
        }
    }
}

impl RawValue {
    /// Unwrap into a [`Scalar`]. Plain scalars keep their type, anything
    /// cast-capable becomes its string form.
    pub fn cast(&self) -> Scalar {
        match self {
            RawValue::Null => Scalar::Null,
            RawValue::Bool(b) => Scalar::Bool(*b),
            RawValue::Int(i) => Scalar::Int(*i),
            RawValue::Float(f) => Scalar::Float(*f),
            RawValue::Str(s) => Scalar::Str(s.clone()),
            RawValue::Wrapped(w) => Scalar::Str(w.as_text().to_string()),
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Wrapped(w) => f.write_str(w.as_text()),
            other => fmt::Display::fmt(&other.cast(), f),
        }
    }
}

/// An unwrapped property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Scalar {
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => f.write_str("NULL"),
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Int(i) => write!(f, "{i}"),
            // Keep a trailing ".0" on integral floats so they stay
            // distinguishable from integers in labels.
            Scalar::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{x:.1}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Str(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Str(s)
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Scalar::Int(i)
    }
}

impl From<f64> for Scalar {
    fn from(x: f64) -> Self {
        Scalar::Float(x)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

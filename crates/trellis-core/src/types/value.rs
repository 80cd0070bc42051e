//! Decoded graph values.
//!
//! This module provides the [`Value`] enum, the fully materialized datum a
//! storage backend produces from a [`Ref`](crate::Ref).
//!
//! # Example
//!
//! ```
//! use trellis_core::Value;
//!
//! let name: Value = "Alice".into();
//! let age: Value = 30i64.into();
//! let score: Value = 95.5f64.into();
//! let active: Value = true.into();
//!
//! assert_eq!(name.as_str(), Some("Alice"));
//! assert_eq!(age.as_int(), Some(30));
//! assert_eq!(score.as_float(), Some(95.5));
//! assert_eq!(active.as_bool(), Some(true));
//!
//! let typed = Value::typed("2024-01-01", "http://www.w3.org/2001/XMLSchema#date");
//! assert_eq!(typed.to_string(), "\"2024-01-01\"^^<http://www.w3.org/2001/XMLSchema#date>");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A decoded value stored in the graph.
///
/// | Variant | Rust Type | Written as |
/// |---------|-----------|------------|
/// | `String` | `String` | `"text"` |
/// | `Iri` | `String` | `<http://...>` |
/// | `BlankNode` | `String` | `_:b0` |
/// | `TypedString` | `String`, `String` | `"v"^^<type>` |
/// | `LangString` | `String`, `String` | `"v"@en` |
/// | `Int` | `i64` | `42` |
/// | `Float` | `f64` | `4.2` |
/// | `Bool` | `bool` | `true` |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Plain string literal
    String(String),
    /// IRI naming a node
    Iri(String),
    /// Blank node label
    BlankNode(String),
    /// Literal with an explicit datatype IRI
    TypedString {
        /// Lexical form
        value: String,
        /// Datatype IRI
        datatype: String,
    },
    /// Literal with a language tag
    LangString {
        /// Lexical form
        value: String,
        /// BCP 47 language tag
        lang: String,
    },
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point number
    Float(f64),
    /// Boolean value
    Bool(bool),
}

impl Value {
    /// Creates an IRI value.
    #[must_use]
    pub fn iri(iri: impl Into<String>) -> Self {
        Self::Iri(iri.into())
    }

    /// Creates a blank node value.
    #[must_use]
    pub fn blank(label: impl Into<String>) -> Self {
        Self::BlankNode(label.into())
    }

    /// Creates a typed literal.
    #[must_use]
    pub fn typed(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self::TypedString { value: value.into(), datatype: datatype.into() }
    }

    /// Creates a language-tagged literal.
    #[must_use]
    pub fn lang(value: impl Into<String>, lang: impl Into<String>) -> Self {
        Self::LangString { value: value.into(), lang: lang.into() }
    }

    /// Returns the name of this value's type, as used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Iri(_) => "iri",
            Self::BlankNode(_) => "blank node",
            Self::TypedString { .. } => "typed string",
            Self::LangString { .. } => "lang string",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
        }
    }

    /// Returns `true` for IRIs and blank nodes, which name graph nodes rather than literals.
    #[inline]
    #[must_use]
    pub const fn is_node(&self) -> bool {
        matches!(self, Self::Iri(_) | Self::BlankNode(_))
    }

    /// Returns the lexical form of any string-like literal.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s)
            | Self::TypedString { value: s, .. }
            | Self::LangString { value: s, .. } => Some(s),
            _ => None,
        }
    }

    /// Returns the IRI if this value is one.
    #[must_use]
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Self::Iri(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as an integer if it is one.
    #[inline]
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a float, widening integers.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Returns the value as a boolean if it is one.
    #[inline]
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            _ => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write_quoted(f, s),
            Self::Iri(iri) => write!(f, "<{iri}>"),
            Self::BlankNode(label) => write!(f, "_:{label}"),
            Self::TypedString { value, datatype } => {
                write_quoted(f, value)?;
                write!(f, "^^<{datatype}>")
            }
            Self::LangString { value, lang } => {
                write_quoted(f, value)?;
                write!(f, "@{lang}")
            }
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl TryFrom<&Value> for i64 {
    type Error = CoreError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value.as_int().ok_or_else(|| CoreError::type_mismatch_with_value("int", value.type_name(), value))
    }
}

impl TryFrom<&Value> for f64 {
    type Error = CoreError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value
            .as_float()
            .ok_or_else(|| CoreError::type_mismatch_with_value("float", value.type_name(), value))
    }
}

impl TryFrom<&Value> for bool {
    type Error = CoreError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value.as_bool().ok_or_else(|| CoreError::type_mismatch_with_value("bool", value.type_name(), value))
    }
}

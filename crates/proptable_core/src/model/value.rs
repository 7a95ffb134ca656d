//! Typed property values and untyped store cells.
//!
//! # Responsibility
//! - Define the closed set of property kinds and their typed values.
//! - Define the untyped cell shape read from a backing store.
//! - Own the per-kind string converters (tolerant read, strict edit).
//!
//! # Invariants
//! - Canonical boolean text is exactly `true` or `false`.
//! - `PropertyKind::parse_text` never accepts text that
//!   `PropertyValue::to_canonical_text` would not produce for that kind.
//! - `PropertyKind::coerce_text` accepts a superset of `parse_text`.

use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

const CANONICAL_TRUE: &str = "true";
const CANONICAL_FALSE: &str = "false";

/// Closed set of kinds a logical property may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    Bool,
    String,
    Integer,
}

impl PropertyKind {
    /// Stable string id used in registration manifests.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::String => "string",
            Self::Integer => "integer",
        }
    }

    /// Zero value used when a manifest entry omits its default.
    pub fn zero_value(self) -> PropertyValue {
        match self {
            Self::Bool => PropertyValue::Bool(false),
            Self::String => PropertyValue::String(String::new()),
            Self::Integer => PropertyValue::Integer(0),
        }
    }

    /// Strict parse for user-originated text.
    ///
    /// Only canonical text is accepted. Used by the edit path, where a
    /// malformed value must be rejected rather than defaulted.
    pub fn parse_text(self, text: &str) -> Result<PropertyValue, ValueParseError> {
        match self {
            Self::Bool => match text {
                CANONICAL_TRUE => Ok(PropertyValue::Bool(true)),
                CANONICAL_FALSE => Ok(PropertyValue::Bool(false)),
                other => Err(ValueParseError::InvalidBool(other.to_string())),
            },
            Self::String => Ok(PropertyValue::String(text.to_string())),
            Self::Integer => match text.parse::<i64>() {
                // Rejects `+5`, `007` and `-0`, which parse but are not canonical.
                Ok(value) if value.to_string() == text => Ok(PropertyValue::Integer(value)),
                _ => Err(ValueParseError::InvalidInteger(text.to_string())),
            },
        }
    }

    /// Tolerant conversion for text found in a persisted store.
    ///
    /// Returns `None` when the text cannot be interpreted as this kind.
    /// Persisted data may be hand-edited, so case and surrounding whitespace
    /// are not significant here.
    pub fn coerce_text(self, text: &str) -> Option<PropertyValue> {
        let trimmed = text.trim();
        match self {
            Self::Bool => {
                if trimmed.eq_ignore_ascii_case(CANONICAL_TRUE) {
                    Some(PropertyValue::Bool(true))
                } else if trimmed.eq_ignore_ascii_case(CANONICAL_FALSE) {
                    Some(PropertyValue::Bool(false))
                } else {
                    None
                }
            }
            Self::String => Some(PropertyValue::String(text.to_string())),
            Self::Integer => trimmed.parse::<i64>().ok().map(PropertyValue::Integer),
        }
    }
}

impl Display for PropertyKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed value of a logical property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Bool(bool),
    Integer(i64),
    String(String),
}

impl PropertyValue {
    pub fn kind(&self) -> PropertyKind {
        match self {
            Self::Bool(_) => PropertyKind::Bool,
            Self::String(_) => PropertyKind::String,
            Self::Integer(_) => PropertyKind::Integer,
        }
    }

    /// Canonical interchange text for this value.
    ///
    /// Booleans render as lowercase `true`/`false` regardless of locale.
    pub fn to_canonical_text(&self) -> String {
        match self {
            Self::Bool(true) => CANONICAL_TRUE.to_string(),
            Self::Bool(false) => CANONICAL_FALSE.to_string(),
            Self::String(value) => value.clone(),
            Self::Integer(value) => value.to_string(),
        }
    }
}

impl Display for PropertyValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_canonical_text())
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// Untyped cell as found in a backing store.
///
/// Only the descriptor's declared kind decides how a cell is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredValue {
    Bool(bool),
    Text(String),
    Integer(i64),
    /// Present, but of a type outside the supported set.
    Other(&'static str),
}

impl StoredValue {
    /// Kind this cell already satisfies without conversion.
    pub fn native_kind(&self) -> Option<PropertyKind> {
        match self {
            Self::Bool(_) => Some(PropertyKind::Bool),
            Self::Text(_) => Some(PropertyKind::String),
            Self::Integer(_) => Some(PropertyKind::Integer),
            Self::Other(_) => None,
        }
    }

    /// Short type label for diagnostics.
    pub fn type_label(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Text(_) => "string",
            Self::Integer(_) => "integer",
            Self::Other(label) => *label,
        }
    }

    /// Converts the cell into a typed value when no conversion is needed.
    pub fn into_native(self) -> Option<PropertyValue> {
        match self {
            Self::Bool(value) => Some(PropertyValue::Bool(value)),
            Self::Text(value) => Some(PropertyValue::String(value)),
            Self::Integer(value) => Some(PropertyValue::Integer(value)),
            Self::Other(_) => None,
        }
    }
}

impl From<PropertyValue> for StoredValue {
    fn from(value: PropertyValue) -> Self {
        match value {
            PropertyValue::Bool(value) => Self::Bool(value),
            PropertyValue::String(value) => Self::Text(value),
            PropertyValue::Integer(value) => Self::Integer(value),
        }
    }
}

impl PartialEq<PropertyValue> for StoredValue {
    fn eq(&self, other: &PropertyValue) -> bool {
        match (self, other) {
            (Self::Bool(left), PropertyValue::Bool(right)) => left == right,
            (Self::Text(left), PropertyValue::String(right)) => left == right,
            (Self::Integer(left), PropertyValue::Integer(right)) => left == right,
            _ => false,
        }
    }
}

/// Strict text parse errors for user-originated edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueParseError {
    InvalidBool(String),
    InvalidInteger(String),
}

impl Display for ValueParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBool(value) => {
                write!(f, "`{value}` is not a boolean (expected true|false)")
            }
            Self::InvalidInteger(value) => write!(f, "`{value}` is not a 64-bit integer"),
        }
    }
}

impl Error for ValueParseError {}

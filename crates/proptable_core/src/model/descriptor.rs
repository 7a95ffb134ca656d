//! Property descriptor declaration and validation.

use crate::model::value::{PropertyKind, PropertyValue};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static LOGICAL_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.\-]*$").expect("valid logical name regex"));

/// Immutable declaration of one logical property.
///
/// A descriptor binds a consumer-facing name to the key it is physically
/// stored under, and fixes its kind and default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDescriptor {
    logical_name: String,
    backing_key: String,
    kind: PropertyKind,
    default_value: PropertyValue,
}

impl PropertyDescriptor {
    /// Creates a validated descriptor.
    ///
    /// # Errors
    /// - `logical_name` is empty or not an identifier-like token.
    /// - `backing_key` is empty or carries surrounding whitespace.
    /// - `default_value` is not of `kind`.
    pub fn new(
        logical_name: impl Into<String>,
        backing_key: impl Into<String>,
        kind: PropertyKind,
        default_value: PropertyValue,
    ) -> Result<Self, DescriptorError> {
        let logical_name = logical_name.into();
        let backing_key = backing_key.into();

        if logical_name.is_empty() {
            return Err(DescriptorError::EmptyLogicalName);
        }
        if !LOGICAL_NAME_RE.is_match(&logical_name) {
            return Err(DescriptorError::InvalidLogicalName(logical_name));
        }
        if backing_key.trim().is_empty() {
            return Err(DescriptorError::EmptyBackingKey(logical_name));
        }
        if backing_key.trim() != backing_key {
            return Err(DescriptorError::InvalidBackingKey(backing_key));
        }
        if default_value.kind() != kind {
            return Err(DescriptorError::DefaultKindMismatch {
                logical_name,
                expected: kind,
                actual: default_value.kind(),
            });
        }

        Ok(Self {
            logical_name,
            backing_key,
            kind,
            default_value,
        })
    }

    /// Boolean property stored under its own name.
    pub fn boolean(logical_name: &str, default_value: bool) -> Result<Self, DescriptorError> {
        Self::new(
            logical_name,
            logical_name,
            PropertyKind::Bool,
            PropertyValue::Bool(default_value),
        )
    }

    /// String property stored under its own name.
    pub fn string(logical_name: &str, default_value: &str) -> Result<Self, DescriptorError> {
        Self::new(
            logical_name,
            logical_name,
            PropertyKind::String,
            PropertyValue::from(default_value),
        )
    }

    /// Integer property stored under its own name.
    pub fn integer(logical_name: &str, default_value: i64) -> Result<Self, DescriptorError> {
        Self::new(
            logical_name,
            logical_name,
            PropertyKind::Integer,
            PropertyValue::Integer(default_value),
        )
    }

    /// Returns a copy stored under a different backing key.
    pub fn with_backing_key(self, backing_key: impl Into<String>) -> Result<Self, DescriptorError> {
        Self::new(
            self.logical_name,
            backing_key,
            self.kind,
            self.default_value,
        )
    }

    pub fn logical_name(&self) -> &str {
        &self.logical_name
    }

    pub fn backing_key(&self) -> &str {
        &self.backing_key
    }

    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    pub fn default_value(&self) -> &PropertyValue {
        &self.default_value
    }
}

/// Descriptor declaration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    EmptyLogicalName,
    InvalidLogicalName(String),
    EmptyBackingKey(String),
    InvalidBackingKey(String),
    DefaultKindMismatch {
        logical_name: String,
        expected: PropertyKind,
        actual: PropertyKind,
    },
}

impl Display for DescriptorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyLogicalName => write!(f, "property logical name must not be empty"),
            Self::InvalidLogicalName(value) => {
                write!(f, "property logical name is invalid: {value}")
            }
            Self::EmptyBackingKey(name) => {
                write!(f, "property `{name}` has an empty backing key")
            }
            Self::InvalidBackingKey(value) => write!(
                f,
                "property backing key has surrounding whitespace: `{value}`"
            ),
            Self::DefaultKindMismatch {
                logical_name,
                expected,
                actual,
            } => write!(
                f,
                "property `{logical_name}` declares kind {expected} but its default is {actual}"
            ),
        }
    }
}

impl Error for DescriptorError {}

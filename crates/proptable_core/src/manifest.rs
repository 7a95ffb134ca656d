//! Declarative registration manifest.
//!
//! # Responsibility
//! - Parse the JSON list of logical properties a provider handles.
//! - Turn that list into a validated `PropertyRegistry`.
//!
//! # Invariants
//! - `backing_key` defaults to `logical_name` when omitted.
//! - `default` defaults to the kind's zero value when omitted; when present it
//!   must already be of the declared kind, with no text coercion. An explicit
//!   `null` is a present default of the wrong kind, not an omitted one.
//! - Unknown fields are rejected so typos surface at load time.

use crate::model::descriptor::{DescriptorError, PropertyDescriptor};
use crate::model::value::PropertyKind;
use crate::registry::{PropertyRegistry, RegistryError};
use crate::store::stored_from_json;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// One manifest entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertyEntry {
    pub logical_name: String,
    #[serde(default)]
    pub backing_key: Option<String>,
    pub kind: PropertyKind,
    #[serde(default, deserialize_with = "present_value")]
    pub default: Option<Value>,
}

fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl PropertyEntry {
    /// Validates this entry into a descriptor.
    pub fn to_descriptor(&self) -> Result<PropertyDescriptor, ManifestError> {
        let default_value = match &self.default {
            None => self.kind.zero_value(),
            Some(raw) => stored_from_json(raw)
                .into_native()
                .filter(|value| value.kind() == self.kind)
                .ok_or_else(|| ManifestError::InvalidDefault {
                    logical_name: self.logical_name.clone(),
                    kind: self.kind,
                })?,
        };
        let backing_key = self
            .backing_key
            .clone()
            .unwrap_or_else(|| self.logical_name.clone());

        Ok(PropertyDescriptor::new(
            self.logical_name.clone(),
            backing_key,
            self.kind,
            default_value,
        )?)
    }
}

/// Registration manifest listing every logical property of a provider.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistrationManifest {
    pub properties: Vec<PropertyEntry>,
}

impl RegistrationManifest {
    pub fn from_json_str(text: &str) -> Result<Self, ManifestError> {
        serde_json::from_str(text).map_err(ManifestError::Json)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(ManifestError::Io)?;
        Self::from_json_str(&text)
    }

    /// Validates every entry and builds the registry in manifest order.
    pub fn into_registry(self) -> Result<PropertyRegistry, ManifestError> {
        let descriptors = self
            .properties
            .iter()
            .map(PropertyEntry::to_descriptor)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PropertyRegistry::from_descriptors(descriptors)?)
    }
}

/// Manifest loading errors.
#[derive(Debug)]
pub enum ManifestError {
    Io(std::io::Error),
    Json(serde_json::Error),
    InvalidDefault {
        logical_name: String,
        kind: PropertyKind,
    },
    Descriptor(DescriptorError),
    Registry(RegistryError),
}

impl Display for ManifestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read manifest: {err}"),
            Self::Json(err) => write!(f, "failed to parse manifest: {err}"),
            Self::InvalidDefault { logical_name, kind } => write!(
                f,
                "property `{logical_name}` default is not a {kind} value"
            ),
            Self::Descriptor(err) => write!(f, "invalid property declaration: {err}"),
            Self::Registry(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ManifestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Descriptor(err) => Some(err),
            Self::Registry(err) => Some(err),
            Self::InvalidDefault { .. } => None,
        }
    }
}

impl From<RegistryError> for ManifestError {
    fn from(value: RegistryError) -> Self {
        Self::Registry(value)
    }
}

impl From<DescriptorError> for ManifestError {
    fn from(value: DescriptorError) -> Self {
        Self::Descriptor(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{ManifestError, RegistrationManifest};
    use crate::model::value::{PropertyKind, PropertyValue};

    #[test]
    fn fills_backing_key_and_zero_default() {
        let manifest = RegistrationManifest::from_json_str(
            r#"{"properties":[{"logical_name":"Args","kind":"string"}]}"#,
        )
        .expect("manifest should parse");
        let registry = manifest.into_registry().expect("registry should build");
        let descriptor = registry.get("Args").expect("registered");
        assert_eq!(descriptor.backing_key(), "Args");
        assert_eq!(descriptor.default_value(), &PropertyValue::from(""));
    }

    #[test]
    fn rejects_default_of_wrong_json_type() {
        let manifest = RegistrationManifest::from_json_str(
            r#"{"properties":[{"logical_name":"Flag","kind":"bool","default":"true"}]}"#,
        )
        .expect("manifest should parse");
        let err = manifest
            .into_registry()
            .expect_err("text default for bool must fail");
        assert!(matches!(
            err,
            ManifestError::InvalidDefault {
                kind: PropertyKind::Bool,
                ..
            }
        ));
    }

    #[test]
    fn rejects_unknown_fields_and_kinds() {
        let err = RegistrationManifest::from_json_str(
            r#"{"properties":[{"logical_name":"Flag","kind":"bool","defualt":true}]}"#,
        )
        .expect_err("typo field must fail");
        assert!(matches!(err, ManifestError::Json(_)));

        let err = RegistrationManifest::from_json_str(
            r#"{"properties":[{"logical_name":"Ratio","kind":"float"}]}"#,
        )
        .expect_err("unsupported kind must fail");
        assert!(matches!(err, ManifestError::Json(_)));
    }

    #[test]
    fn rejects_explicit_null_default() {
        let manifest = RegistrationManifest::from_json_str(
            r#"{"properties":[{"logical_name":"Flag","kind":"bool","default":null}]}"#,
        )
        .expect("manifest should parse");
        assert_eq!(manifest.properties[0].default, Some(serde_json::Value::Null));

        let err = manifest
            .into_registry()
            .expect_err("null default must fail");
        assert!(matches!(
            err,
            ManifestError::InvalidDefault {
                kind: PropertyKind::Bool,
                ..
            }
        ));
    }
}

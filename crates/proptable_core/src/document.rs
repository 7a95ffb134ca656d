//! Profile document owning a JSON side-table and its dirty state.
//!
//! # Responsibility
//! - Hold one parsed profile object as the backing store for properties.
//! - Track whether an edit actually changed persisted content.
//!
//! # Invariants
//! - Only a write that changed the side-table marks the document dirty.
//! - A rejected edit never touches the side-table or the dirty flag.
//! - The document is not internally synchronized.

use crate::dispatch::PropertyProvider;
use crate::engine::PropertyResult;
use crate::model::value::PropertyValue;
use log::info;
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Profile document loading/serialization errors.
#[derive(Debug)]
pub enum DocumentError {
    Json(serde_json::Error),
    NotAnObject(&'static str),
}

impl Display for DocumentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid profile json: {err}"),
            Self::NotAnObject(found) => {
                write!(f, "profile json must be an object, found {found}")
            }
        }
    }
}

impl Error for DocumentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::NotAnObject(_) => None,
        }
    }
}

impl From<serde_json::Error> for DocumentError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// One editable profile whose top-level object is the property side-table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileDocument {
    settings: Map<String, Value>,
    dirty: bool,
}

impl ProfileDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: Map<String, Value>) -> Self {
        Self {
            settings,
            dirty: false,
        }
    }

    /// Parses a profile from JSON text. The result starts clean.
    pub fn from_json_str(text: &str) -> Result<Self, DocumentError> {
        match serde_json::from_str::<Value>(text)? {
            Value::Object(settings) => Ok(Self::from_settings(settings)),
            other => Err(DocumentError::NotAnObject(json_type_name(&other))),
        }
    }

    pub fn to_json_string_pretty(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(&self.settings)?)
    }

    pub fn settings(&self) -> &Map<String, Value> {
        &self.settings
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clears the dirty flag, typically after the caller persisted the document.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn property_value(
        &self,
        provider: &PropertyProvider,
        logical_name: &str,
    ) -> PropertyResult<PropertyValue> {
        provider.get_value(logical_name, Some(&self.settings))
    }

    pub fn property_text(
        &self,
        provider: &PropertyProvider,
        logical_name: &str,
    ) -> PropertyResult<String> {
        provider.get_as_text(logical_name, Some(&self.settings))
    }

    /// Applies a text edit; returns whether the document changed.
    pub fn set_property_text(
        &mut self,
        provider: &PropertyProvider,
        logical_name: &str,
        text: &str,
    ) -> PropertyResult<bool> {
        let changed = provider.set_from_text(logical_name, text, &mut self.settings)?;
        self.record_edit(logical_name, changed);
        Ok(changed)
    }

    /// Applies a typed edit; returns whether the document changed.
    pub fn set_property_value(
        &mut self,
        provider: &PropertyProvider,
        logical_name: &str,
        value: PropertyValue,
    ) -> PropertyResult<bool> {
        let changed = provider.set_value(logical_name, value, &mut self.settings)?;
        self.record_edit(logical_name, changed);
        Ok(changed)
    }

    fn record_edit(&mut self, logical_name: &str, changed: bool) {
        if changed {
            self.dirty = true;
        }
        info!(
            "event=profile_edit module=document status=ok name={} changed={}",
            logical_name, changed
        );
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

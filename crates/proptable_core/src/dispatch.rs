//! Name-keyed property access over a registry.
//!
//! # Responsibility
//! - Route logical property names to their descriptors.
//! - Project typed values to and from canonical text for text-only consumers.
//!
//! # Invariants
//! - Unknown names fail with `PropertyError::UnknownProperty`, never default.
//! - Text edits are parsed strictly; a rejected edit leaves the store as is.
//! - Reads stay tolerant of malformed persisted data.

use crate::engine::{self, PropertyError, PropertyResult};
use crate::model::descriptor::PropertyDescriptor;
use crate::model::value::PropertyValue;
use crate::registry::PropertyRegistry;
use crate::store::BackingStore;
use log::warn;
use std::sync::Arc;

/// Stateless property accessor bound to one shared registry.
#[derive(Debug, Clone)]
pub struct PropertyProvider {
    registry: Arc<PropertyRegistry>,
}

impl PropertyProvider {
    pub fn new(registry: Arc<PropertyRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &PropertyRegistry {
        &self.registry
    }

    /// Registered logical names in registration order.
    pub fn property_names(&self) -> Vec<&str> {
        self.registry.names()
    }

    /// Returns the effective typed value of `logical_name`.
    pub fn get_value<S>(
        &self,
        logical_name: &str,
        store: Option<&S>,
    ) -> PropertyResult<PropertyValue>
    where
        S: BackingStore + ?Sized,
    {
        let descriptor = self.descriptor(logical_name)?;
        Ok(engine::read(store, descriptor))
    }

    /// Returns the canonical text of `logical_name`.
    ///
    /// Booleans render as exactly `true` or `false`.
    pub fn get_as_text<S>(&self, logical_name: &str, store: Option<&S>) -> PropertyResult<String>
    where
        S: BackingStore + ?Sized,
    {
        self.get_value(logical_name, store)
            .map(|value| value.to_canonical_text())
    }

    /// Writes a typed value; returns whether the store changed.
    pub fn set_value<S>(
        &self,
        logical_name: &str,
        value: PropertyValue,
        store: &mut S,
    ) -> PropertyResult<bool>
    where
        S: BackingStore + ?Sized,
    {
        let descriptor = self.descriptor(logical_name)?;
        engine::write(store, descriptor, value)
    }

    /// Parses `text` as the property's kind and writes it.
    ///
    /// # Errors
    /// - `PropertyError::UnknownProperty` for an unregistered name.
    /// - `PropertyError::InvalidText` when `text` is not canonical for the kind.
    pub fn set_from_text<S>(
        &self,
        logical_name: &str,
        text: &str,
        store: &mut S,
    ) -> PropertyResult<bool>
    where
        S: BackingStore + ?Sized,
    {
        let descriptor = self.descriptor(logical_name)?;
        let value = descriptor.kind().parse_text(text).map_err(|source| {
            warn!(
                "event=property_edit module=dispatch status=error reason=invalid_text name={} kind={}",
                logical_name,
                descriptor.kind()
            );
            PropertyError::InvalidText {
                logical_name: logical_name.to_string(),
                source,
            }
        })?;
        engine::write(store, descriptor, value)
    }

    fn descriptor(&self, logical_name: &str) -> PropertyResult<&PropertyDescriptor> {
        self.registry.get(logical_name).ok_or_else(|| {
            warn!(
                "event=property_lookup module=dispatch status=error reason=unknown_property name={}",
                logical_name
            );
            PropertyError::UnknownProperty(logical_name.to_string())
        })
    }
}

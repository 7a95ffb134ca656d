//! Property descriptor registry.

use crate::model::descriptor::PropertyDescriptor;
use log::info;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Registry construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    DuplicateLogicalName(String),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateLogicalName(value) => {
                write!(f, "property already registered: {value}")
            }
        }
    }
}

impl Error for RegistryError {}

/// Ordered set of property descriptors keyed by logical name.
///
/// Built once at startup and read-only afterwards, so one instance can be
/// shared across threads behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct PropertyRegistry {
    descriptors: Vec<PropertyDescriptor>,
    index: BTreeMap<String, usize>,
}

impl PropertyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from an explicit descriptor list.
    ///
    /// Registration order is preserved for iteration.
    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = PropertyDescriptor>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for descriptor in descriptors {
            registry.register(descriptor)?;
        }
        info!(
            "event=registry_built module=registry status=ok properties={}",
            registry.len()
        );
        Ok(registry)
    }

    /// Registers one descriptor.
    pub fn register(&mut self, descriptor: PropertyDescriptor) -> Result<(), RegistryError> {
        let name = descriptor.logical_name().to_string();
        if self.index.contains_key(name.as_str()) {
            return Err(RegistryError::DuplicateLogicalName(name));
        }

        self.index.insert(name, self.descriptors.len());
        self.descriptors.push(descriptor);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Returns the descriptor governing `logical_name`.
    pub fn get(&self, logical_name: &str) -> Option<&PropertyDescriptor> {
        self.index
            .get(logical_name)
            .and_then(|position| self.descriptors.get(*position))
    }

    pub fn contains(&self, logical_name: &str) -> bool {
        self.index.contains_key(logical_name)
    }

    /// Iterates descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.descriptors.iter()
    }

    /// Returns logical names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.iter().map(PropertyDescriptor::logical_name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{PropertyRegistry, RegistryError};
    use crate::model::descriptor::PropertyDescriptor;

    fn descriptor(name: &str) -> PropertyDescriptor {
        PropertyDescriptor::boolean(name, false).expect("valid descriptor")
    }

    #[test]
    fn registers_and_resolves_by_name() {
        let mut registry = PropertyRegistry::new();
        assert!(registry.is_empty());
        registry
            .register(descriptor("NativeDebugging"))
            .expect("descriptor should register");

        assert_eq!(registry.len(), 1);
        assert!(registry.contains("NativeDebugging"));
        let found = registry.get("NativeDebugging").expect("registered descriptor");
        assert_eq!(found.backing_key(), "NativeDebugging");
        assert!(registry.get("nativedebugging").is_none());
    }

    #[test]
    fn rejects_duplicate_logical_name() {
        let mut registry = PropertyRegistry::new();
        registry
            .register(descriptor("NativeDebugging"))
            .expect("first registration should succeed");
        let err = registry
            .register(descriptor("NativeDebugging"))
            .expect_err("duplicate registration must fail");
        assert_eq!(
            err,
            RegistryError::DuplicateLogicalName("NativeDebugging".to_string())
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn preserves_registration_order() {
        let registry = PropertyRegistry::from_descriptors([
            descriptor("Zeta"),
            descriptor("Alpha"),
            descriptor("Mid"),
        ])
        .expect("registry should build");
        assert_eq!(registry.names(), vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn from_descriptors_stops_at_first_duplicate() {
        let err = PropertyRegistry::from_descriptors([descriptor("A"), descriptor("A")])
            .expect_err("duplicate in list must fail");
        assert!(matches!(err, RegistryError::DuplicateLogicalName(_)));
    }

    #[test]
    fn registry_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PropertyRegistry>();
    }
}

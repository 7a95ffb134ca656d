//! Typed property indirection over loosely-typed side-tables.
//! This crate owns the property kinds, coercion rules and change detection.

pub mod dispatch;
pub mod document;
pub mod engine;
pub mod logging;
pub mod manifest;
pub mod model;
pub mod registry;
pub mod store;

pub use dispatch::PropertyProvider;
pub use document::{DocumentError, ProfileDocument};
pub use engine::{read, write, PropertyError, PropertyResult};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use manifest::{ManifestError, PropertyEntry, RegistrationManifest};
pub use model::descriptor::{DescriptorError, PropertyDescriptor};
pub use model::value::{PropertyKind, PropertyValue, StoredValue, ValueParseError};
pub use registry::{PropertyRegistry, RegistryError};
pub use store::BackingStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

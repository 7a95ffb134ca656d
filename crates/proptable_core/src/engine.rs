//! Coercion engine: typed reads and change-suppressing writes.
//!
//! # Responsibility
//! - Resolve a descriptor against a store into a typed value.
//! - Write typed values only when the raw stored cell would change.
//!
//! # Invariants
//! - Reads never fail: absent, mistyped or malformed cells yield the default.
//! - A write whose value equals the current raw cell (or the default, when
//!   the key is absent) leaves the store untouched and reports `false`.
//! - Writes of a value whose kind differs from the descriptor are rejected.

use crate::model::descriptor::PropertyDescriptor;
use crate::model::value::{PropertyKind, PropertyValue, StoredValue, ValueParseError};
use crate::store::BackingStore;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type PropertyResult<T> = Result<T, PropertyError>;

/// Property access errors surfaced to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyError {
    /// Logical name is not registered. Indicates a caller or registration bug.
    UnknownProperty(String),
    /// User-supplied text could not be parsed as the property's kind.
    InvalidText {
        logical_name: String,
        source: ValueParseError,
    },
    /// Typed value does not match the property's declared kind.
    KindMismatch {
        logical_name: String,
        expected: PropertyKind,
        actual: PropertyKind,
    },
}

impl Display for PropertyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownProperty(name) => write!(f, "unknown property: {name}"),
            Self::InvalidText {
                logical_name,
                source,
            } => write!(f, "invalid value for property `{logical_name}`: {source}"),
            Self::KindMismatch {
                logical_name,
                expected,
                actual,
            } => write!(
                f,
                "property `{logical_name}` expects a {expected} value, got {actual}"
            ),
        }
    }
}

impl Error for PropertyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidText { source, .. } => Some(source),
            Self::UnknownProperty(_) | Self::KindMismatch { .. } => None,
        }
    }
}

/// Reads the effective typed value of `descriptor` from `store`.
///
/// A missing store, a missing key, a cell of an unsupported type and text
/// that does not convert all resolve to the descriptor default.
pub fn read<S>(store: Option<&S>, descriptor: &PropertyDescriptor) -> PropertyValue
where
    S: BackingStore + ?Sized,
{
    let Some(store) = store else {
        return descriptor.default_value().clone();
    };
    let Some(cell) = store.lookup(descriptor.backing_key()) else {
        return descriptor.default_value().clone();
    };

    if cell.native_kind() == Some(descriptor.kind()) {
        return cell
            .into_native()
            .unwrap_or_else(|| descriptor.default_value().clone());
    }

    match cell {
        StoredValue::Text(text) => match descriptor.kind().coerce_text(&text) {
            Some(value) => value,
            None => {
                debug!(
                    "event=property_read module=engine status=fallback reason=unparsable key={} kind={}",
                    descriptor.backing_key(),
                    descriptor.kind()
                );
                descriptor.default_value().clone()
            }
        },
        other => {
            debug!(
                "event=property_read module=engine status=fallback reason=type_mismatch key={} kind={} stored={}",
                descriptor.backing_key(),
                descriptor.kind(),
                other.type_label()
            );
            descriptor.default_value().clone()
        }
    }
}

/// Writes `new_value` for `descriptor` into `store`.
///
/// Returns `Ok(true)` when the store was modified and `Ok(false)` when the
/// write was suppressed because the raw cell already holds `new_value`.
/// Comparison is on the raw cell, so a legacy text cell is replaced by its
/// typed equivalent.
///
/// # Errors
/// - `PropertyError::KindMismatch` when `new_value` is not of the declared
///   kind. The store is not modified.
pub fn write<S>(
    store: &mut S,
    descriptor: &PropertyDescriptor,
    new_value: PropertyValue,
) -> PropertyResult<bool>
where
    S: BackingStore + ?Sized,
{
    if new_value.kind() != descriptor.kind() {
        return Err(PropertyError::KindMismatch {
            logical_name: descriptor.logical_name().to_string(),
            expected: descriptor.kind(),
            actual: new_value.kind(),
        });
    }

    let current = store
        .lookup(descriptor.backing_key())
        .unwrap_or_else(|| StoredValue::from(descriptor.default_value().clone()));
    if current == new_value {
        return Ok(false);
    }

    store.upsert(descriptor.backing_key(), new_value);
    debug!(
        "event=property_write module=engine status=ok key={} kind={}",
        descriptor.backing_key(),
        descriptor.kind()
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::{read, write, PropertyError};
    use crate::model::descriptor::PropertyDescriptor;
    use crate::model::value::{PropertyKind, PropertyValue, StoredValue};
    use std::collections::BTreeMap;

    type Store = BTreeMap<String, StoredValue>;

    fn native_debugging() -> PropertyDescriptor {
        PropertyDescriptor::boolean("NativeDebugging", false).expect("valid descriptor")
    }

    fn store_with(key: &str, cell: StoredValue) -> Store {
        let mut store = Store::new();
        store.insert(key.to_string(), cell);
        store
    }

    #[test]
    fn missing_store_reads_default() {
        let value = read::<Store>(None, &native_debugging());
        assert_eq!(value, PropertyValue::Bool(false));
    }

    #[test]
    fn native_cell_is_returned_unchanged() {
        let store = store_with("NativeDebugging", StoredValue::Bool(true));
        assert_eq!(
            read(Some(&store), &native_debugging()),
            PropertyValue::Bool(true)
        );
    }

    #[test]
    fn unsupported_cell_type_reads_default() {
        let store = store_with("NativeDebugging", StoredValue::Integer(1));
        assert_eq!(
            read(Some(&store), &native_debugging()),
            PropertyValue::Bool(false)
        );

        let store = store_with("NativeDebugging", StoredValue::Other("null"));
        assert_eq!(
            read(Some(&store), &native_debugging()),
            PropertyValue::Bool(false)
        );
    }

    #[test]
    fn string_property_does_not_coerce_non_text_cells() {
        let descriptor = PropertyDescriptor::string("Args", "none").expect("valid descriptor");
        let store = store_with("Args", StoredValue::Bool(true));
        assert_eq!(read(Some(&store), &descriptor), PropertyValue::from("none"));
    }

    #[test]
    fn write_rejects_kind_mismatch_without_touching_store() {
        let mut store = Store::new();
        let err = write(&mut store, &native_debugging(), PropertyValue::from("true"))
            .expect_err("string value for bool property must fail");
        assert_eq!(
            err,
            PropertyError::KindMismatch {
                logical_name: "NativeDebugging".to_string(),
                expected: PropertyKind::Bool,
                actual: PropertyKind::String,
            }
        );
        assert!(store.is_empty());
    }

    #[test]
    fn writing_default_to_empty_store_is_suppressed() {
        let mut store = Store::new();
        let changed = write(&mut store, &native_debugging(), PropertyValue::Bool(false))
            .expect("write should succeed");
        assert!(!changed);
        assert!(store.is_empty());
    }

    #[test]
    fn legacy_text_cell_is_replaced_by_typed_value() {
        let mut store = store_with("NativeDebugging", StoredValue::Text("true".to_string()));
        let changed = write(&mut store, &native_debugging(), PropertyValue::Bool(true))
            .expect("write should succeed");
        assert!(changed);
        assert_eq!(
            store.get("NativeDebugging"),
            Some(&StoredValue::Bool(true))
        );
    }
}

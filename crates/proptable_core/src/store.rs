//! Backing store contract and built-in implementations.
//!
//! # Responsibility
//! - Define the minimal keyed-store contract the property layer consumes.
//! - Adapt in-memory maps and parsed JSON objects to that contract.
//!
//! # Invariants
//! - `lookup` distinguishes absence (`None`) from a present value of an
//!   unsupported type (`StoredValue::Other`).
//! - The property layer never owns a store; it borrows one per call.

use crate::model::value::{PropertyValue, StoredValue};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Flat keyed side-table supplied by a profile or document model.
///
/// Implementations are not expected to synchronize access; callers that share
/// one store across threads serialize access themselves.
pub trait BackingStore {
    /// Returns the cell under `key`, or `None` when the key is absent.
    fn lookup(&self, key: &str) -> Option<StoredValue>;

    /// Inserts or replaces the cell under `key`.
    fn upsert(&mut self, key: &str, value: PropertyValue);
}

impl BackingStore for BTreeMap<String, StoredValue> {
    fn lookup(&self, key: &str) -> Option<StoredValue> {
        self.get(key).cloned()
    }

    fn upsert(&mut self, key: &str, value: PropertyValue) {
        self.insert(key.to_string(), StoredValue::from(value));
    }
}

impl BackingStore for Map<String, Value> {
    fn lookup(&self, key: &str) -> Option<StoredValue> {
        self.get(key).map(stored_from_json)
    }

    fn upsert(&mut self, key: &str, value: PropertyValue) {
        self.insert(key.to_string(), json_from_property(value));
    }
}

/// Maps one JSON value to a store cell.
pub fn stored_from_json(value: &Value) -> StoredValue {
    match value {
        Value::Bool(value) => StoredValue::Bool(*value),
        Value::String(value) => StoredValue::Text(value.clone()),
        Value::Number(number) => match number.as_i64() {
            Some(value) => StoredValue::Integer(value),
            None => StoredValue::Other("number"),
        },
        Value::Null => StoredValue::Other("null"),
        Value::Array(_) => StoredValue::Other("array"),
        Value::Object(_) => StoredValue::Other("object"),
    }
}

fn json_from_property(value: PropertyValue) -> Value {
    match value {
        PropertyValue::Bool(value) => Value::Bool(value),
        PropertyValue::String(value) => Value::String(value),
        PropertyValue::Integer(value) => Value::from(value),
    }
}

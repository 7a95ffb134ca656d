use proptable_core::{
    PropertyDescriptor, PropertyError, PropertyProvider, PropertyRegistry, StoredValue,
    ValueParseError,
};
use std::collections::BTreeMap;
use std::sync::Arc;

type Store = BTreeMap<String, StoredValue>;

fn provider() -> PropertyProvider {
    let registry = PropertyRegistry::from_descriptors([
        PropertyDescriptor::boolean("NativeDebugging", false).unwrap(),
        PropertyDescriptor::boolean("RemoteDebugEnabled", true).unwrap(),
        PropertyDescriptor::string("RemoteDebugMachine", "").unwrap(),
        PropertyDescriptor::integer("Port", 5000).unwrap(),
    ])
    .unwrap();
    PropertyProvider::new(Arc::new(registry))
}

fn store_with(key: &str, cell: StoredValue) -> Store {
    let mut store = Store::new();
    store.insert(key.to_string(), cell);
    store
}

#[test]
fn empty_store_renders_bool_default_as_false() {
    let provider = provider();
    let store = Store::new();
    assert_eq!(
        provider.get_as_text("NativeDebugging", Some(&store)).unwrap(),
        "false"
    );
    assert_eq!(
        provider
            .get_as_text::<Store>("RemoteDebugEnabled", None)
            .unwrap(),
        "true"
    );
}

#[test]
fn bool_text_is_always_canonical() {
    let provider = provider();
    for cell in [
        StoredValue::Bool(true),
        StoredValue::Bool(false),
        StoredValue::Text("TRUE".to_string()),
        StoredValue::Text(" False ".to_string()),
        StoredValue::Text("1".to_string()),
        StoredValue::Integer(1),
    ] {
        let store = store_with("NativeDebugging", cell);
        let text = provider.get_as_text("NativeDebugging", Some(&store)).unwrap();
        assert!(text == "true" || text == "false", "unexpected text: {text}");
    }
}

#[test]
fn text_round_trip_is_a_no_op_on_consistent_store() {
    let provider = provider();
    let mut store = Store::new();
    provider
        .set_from_text("NativeDebugging", "true", &mut store)
        .unwrap();
    provider
        .set_from_text("RemoteDebugMachine", "build-01", &mut store)
        .unwrap();

    for name in provider.property_names() {
        let text = provider.get_as_text(name, Some(&store)).unwrap();
        let changed = provider.set_from_text(name, &text, &mut store).unwrap();
        assert!(!changed, "round trip of `{name}` should not change the store");
    }
}

#[test]
fn malformed_bool_edit_fails_and_leaves_store_unmodified() {
    let provider = provider();
    let mut store = store_with("NativeDebugging", StoredValue::Bool(true));
    let snapshot = store.clone();

    let err = provider
        .set_from_text("NativeDebugging", "not-a-bool", &mut store)
        .unwrap_err();
    assert_eq!(
        err,
        PropertyError::InvalidText {
            logical_name: "NativeDebugging".to_string(),
            source: ValueParseError::InvalidBool("not-a-bool".to_string()),
        }
    );
    assert_eq!(store, snapshot);
}

#[test]
fn non_canonical_bool_edit_is_rejected() {
    let provider = provider();
    let mut store = Store::new();
    for text in ["True", "FALSE", "1", "yes"] {
        let err = provider
            .set_from_text("NativeDebugging", text, &mut store)
            .unwrap_err();
        assert!(matches!(err, PropertyError::InvalidText { .. }));
    }
    assert!(store.is_empty());
}

#[test]
fn unknown_property_fails_on_get_and_set() {
    let provider = provider();
    let mut store = Store::new();

    let err = provider.set_from_text("Unknown", "x", &mut store).unwrap_err();
    assert_eq!(err, PropertyError::UnknownProperty("Unknown".to_string()));

    let err = provider.get_as_text("Unknown", Some(&store)).unwrap_err();
    assert_eq!(err, PropertyError::UnknownProperty("Unknown".to_string()));
    assert!(store.is_empty());
}

#[test]
fn setting_default_text_on_empty_store_reports_unchanged() {
    let provider = provider();
    let mut store = Store::new();
    let changed = provider
        .set_from_text("NativeDebugging", "false", &mut store)
        .unwrap();
    assert!(!changed);
    assert!(store.is_empty());

    let changed = provider
        .set_from_text("NativeDebugging", "true", &mut store)
        .unwrap();
    assert!(changed);
    assert_eq!(
        store.get("NativeDebugging"),
        Some(&StoredValue::Bool(true))
    );
}

#[test]
fn registry_can_be_shared_between_threads() {
    let provider = provider();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let provider = provider.clone();
            std::thread::spawn(move || {
                let mut store = Store::new();
                provider.set_from_text("Port", "9000", &mut store).unwrap();
                provider.get_as_text("Port", Some(&store)).unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), "9000");
    }
}

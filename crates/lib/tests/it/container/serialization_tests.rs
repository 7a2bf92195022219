//! State round-trips and the JSON view of storage.

use std::sync::Arc;

use keyarray::{
    IterationStrategy, Key, Mode, OrderedContainer, Registered, Storage, StrategyRegistry, Value,
};
use serde_json::json;

use crate::helpers::*;

#[derive(Debug, Default)]
struct EvenKeys;

impl Registered for EvenKeys {
    fn type_id() -> &'static str {
        "even_keys"
    }
}

impl IterationStrategy for EvenKeys {
    fn traverse(&self, snapshot: Storage) -> Box<dyn Iterator<Item = (Key, Value)>> {
        Box::new(
            snapshot
                .into_iter()
                .filter(|(k, _)| k.as_int().is_some_and(|n| n % 2 == 0)),
        )
    }
}

// ===== ROUND-TRIP =====

#[test]
fn test_round_trip_preserves_state() {
    let mut container = setup_mixed_container();
    container.set_mode(Mode::StandardProperties);
    container.set_iteration_strategy("reverse").unwrap();
    container.set_property("label", "kept").unwrap();

    let bytes = container.serialize().unwrap();
    let mut restored = OrderedContainer::deserialize(&bytes).unwrap();

    assert_eq!(restored, container);
    assert_eq!(key_strings(&restored), ["a", "0", "b"]);
    assert_eq!(restored.mode(), Mode::StandardProperties);
    assert_eq!(restored.iteration_strategy(), "reverse");
    assert_eq!(restored.property("label").unwrap(), Some(&json!("kept")));
    assert_eq!(iterated_keys(&mut restored), ["b", "0", "a"]);
    assert_eq!(restored.append(9).unwrap(), Key::Int(3));
}

#[test]
fn test_round_trip_of_empty_container() {
    let container = OrderedContainer::default();
    let restored = OrderedContainer::deserialize(&container.serialize().unwrap()).unwrap();
    assert_eq!(restored, container);
    assert!(restored.is_empty());
}

#[test]
fn test_restore_replaces_existing_state() {
    let source = OrderedContainer::new(json!({"k": [1, 2]}));
    let bytes = source.serialize().unwrap();

    let mut target = OrderedContainer::new(json!(["old", "values"]));
    target.set_mode(Mode::StandardProperties);
    target.set_property("stale", true).unwrap();
    target.restore(&bytes).unwrap();

    assert_eq!(target.to_json(), json!({"k": [1, 2]}));
    assert_eq!(target.mode(), Mode::ArrayAsProperties);
    assert!(target.attributes().is_empty());
    assert_eq!(target.next_index(), Some(1));
}

#[test]
fn test_restore_uses_custom_registry() {
    let mut registry = StrategyRegistry::with_builtins();
    registry.register::<EvenKeys>();
    let registry = Arc::new(registry);

    let container = OrderedContainer::builder()
        .input(json!(["a", "b", "c"]))
        .registry(registry.clone())
        .iteration_strategy("even_keys")
        .build()
        .unwrap();
    let bytes = container.serialize().unwrap();

    let err = OrderedContainer::deserialize(&bytes).unwrap_err();
    assert!(err.is_unknown_strategy());

    let mut restored = OrderedContainer::deserialize_with_registry(&bytes, registry).unwrap();
    assert_eq!(iterated_keys(&mut restored), ["0", "2"]);
}

#[test]
fn test_deserialize_with_registry_lacking_builtins() {
    let mut registry = StrategyRegistry::new();
    registry.register::<EvenKeys>();
    let registry = Arc::new(registry);

    let container = OrderedContainer::builder()
        .input(json!({"a": 1, "0": "zero", "1": "one", "2": "two"}))
        .mode(Mode::StandardProperties)
        .registry(registry.clone())
        .iteration_strategy("even_keys")
        .build()
        .unwrap();
    let bytes = container.serialize().unwrap();

    let mut restored = OrderedContainer::deserialize_with_registry(&bytes, registry).unwrap();
    assert_eq!(restored, container);
    assert_eq!(restored.mode(), Mode::StandardProperties);
    assert_eq!(iterated_keys(&mut restored), ["0", "2"]);
    assert!(!restored.registry().contains("array_iterator"));

    // The serialized strategy still has to resolve
    let builtin_bytes = OrderedContainer::new(json!([1])).serialize().unwrap();
    let err = OrderedContainer::deserialize_with_registry(
        &builtin_bytes,
        Arc::new(StrategyRegistry::new()),
    )
    .unwrap_err();
    assert!(err.is_unknown_strategy());
}

#[test]
fn test_restore_rejects_protected_extra_field() {
    let bytes = serde_json::to_vec(&json!({
        "storage": [],
        "mode": "array_as_properties",
        "iteration_strategy": "array_iterator",
        "attributes": {"sneaky": true}
    }))
    .unwrap();

    let mut container = OrderedContainer::new(json!([1]));
    let err = container.restore(&bytes).unwrap_err();
    assert!(err.is_protected_name());
    assert_eq!(container.to_json(), json!([1]));
}

#[test]
fn test_restore_ignores_protected_names_snapshot() {
    let bytes = serde_json::to_vec(&json!({
        "storage": [[0, "x"]],
        "mode": "standard_properties",
        "iteration_strategy": "array_iterator",
        "protected_names": ["label"]
    }))
    .unwrap();

    let mut container = OrderedContainer::deserialize(&bytes).unwrap();
    assert!(!container.is_protected("label"));
    container.set_property("label", 1).unwrap();
    assert!(container.set_property("storage", 1).is_err());
}

#[test]
fn test_malformed_state() {
    let mut container = OrderedContainer::new(json!([1]));
    let cases: [&[u8]; 4] = [
        b"{",
        br#"{"storage": {}, "mode": "array_as_properties", "iteration_strategy": "array_iterator"}"#,
        br#"{"storage": [], "mode": "sideways", "iteration_strategy": "array_iterator"}"#,
        br#"[1, 2, 3]"#,
    ];
    for bytes in cases {
        let err = container.restore(bytes).unwrap_err();
        assert!(err.is_malformed_state(), "unexpected error: {err}");
    }
    assert_eq!(container.to_json(), json!([1]));
}

#[test]
fn test_restore_unknown_strategy_leaves_container() {
    let bytes = serde_json::to_vec(&json!({
        "storage": [["a", 1]],
        "mode": "standard_properties",
        "iteration_strategy": "does_not_exist"
    }))
    .unwrap();

    let mut container = OrderedContainer::new(json!([1]));
    assert!(container.restore(&bytes).unwrap_err().is_unknown_strategy());
    assert_eq!(container.mode(), Mode::ArrayAsProperties);
    assert_eq!(container.to_json(), json!([1]));
}

// ===== JSON VIEW =====

#[test]
fn test_json_view_shapes() {
    assert_eq!(OrderedContainer::default().to_json(), json!([]));
    assert_eq!(OrderedContainer::new(json!([1, 2])).to_json(), json!([1, 2]));
    assert_eq!(
        OrderedContainer::new(json!({"1": "b", "0": "a"})).to_json(),
        json!({"1": "b", "0": "a"})
    );

    let mut gapped = OrderedContainer::new(json!([1, 2, 3]));
    gapped.delete(1);
    assert_eq!(gapped.to_json(), json!({"0": 1, "2": 3}));
}

#[test]
fn test_serialize_impl_matches_json_view() {
    let container = setup_mixed_container();
    let via_serde = serde_json::to_value(&container).unwrap();
    assert_eq!(via_serde, container.to_json());
    assert_eq!(
        serde_json::to_string(&container).unwrap(),
        r#"{"a":1,"0":"zero","b":2}"#
    );
}

#[test]
fn test_json_view_ignores_mode_and_attributes() {
    let mut container = OrderedContainer::new(json!(["x"]));
    container.set_mode(Mode::StandardProperties);
    container.set_property("hidden", true).unwrap();
    assert_eq!(container.to_json(), json!(["x"]));
}

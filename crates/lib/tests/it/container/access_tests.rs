//! Key-level access: reads, writes, append, delete, count and storage replacement.

use keyarray::{Input, Key, OrderedContainer, Storage};
use serde_json::json;

use crate::helpers::*;

// ===== APPEND =====

#[test]
fn test_append_after_string_keys() {
    let mut container = OrderedContainer::new(json!({"a": 1, "b": 2}));
    assert_eq!(container.append(3).unwrap(), Key::Int(2));

    assert_eq!(container.get(2), Some(&json!(3)));
    assert!(!container.exists(0));
    assert_eq!(container.count(), 3);
    assert_eq!(container.to_json(), json!({"a": 1, "b": 2, "2": 3}));
}

#[test]
fn test_append_to_list() {
    let mut container = OrderedContainer::new(json!(["x", "y"]));
    let key = container.append("z").unwrap();

    assert_eq!(key, Key::Int(2));
    assert_eq!(container.to_json(), json!(["x", "y", "z"]));
}

#[test]
fn test_append_continues_after_largest_key() {
    let mut container = OrderedContainer::default();
    container.set(7, "seven");
    container.set(3, "three");
    assert_eq!(container.append("next").unwrap(), Key::Int(8));
}

#[test]
fn test_append_never_lands_below_existing_keys() {
    let mut container = OrderedContainer::new(json!({"x": "a", "y": "b", "z": "c"}));
    container.set(1, "one");

    assert_eq!(container.offset_set(None, "next").unwrap(), Key::Int(4));
    assert_eq!(container.get(1), Some(&json!("one")));
    assert_eq!(container.count(), 5);
}

#[test]
fn test_append_past_largest_possible_key_is_rejected() {
    let mut container = OrderedContainer::new(json!(["kept"]));
    container.set(i64::MAX, "last");

    let err = container.append("lost").unwrap_err();
    assert!(err.is_index_overflow());
    assert_eq!(container.count(), 2);
    assert_eq!(container.get(i64::MAX), Some(&json!("last")));
    assert_eq!(container.get(0), Some(&json!("kept")));
}

#[test]
fn test_count_tracks_mutations() {
    let mut container = setup_mixed_container();
    assert_eq!(container.count(), 3);

    container.set("a", "overwrite");
    assert_eq!(container.count(), 3);

    container.delete("a");
    container.delete("a");
    assert_eq!(container.count(), 2);
}

// ===== READS AND WRITES =====

#[test]
fn test_integer_and_string_keys_coexist() {
    let container = setup_mixed_container();

    assert_eq!(key_strings(&container), ["a", "0", "b"]);
    assert_eq!(container.get("0"), Some(&json!("zero")));
    assert_eq!(container.get(0), Some(&json!("zero")));
    assert!(container.exists("b"));
    assert!(!container.exists(1));
}

#[test]
fn test_mutable_reference_writes_through() {
    let mut container = OrderedContainer::new(json!({"list": [1]}));
    container
        .get_mut("list")
        .and_then(|v| v.as_array_mut())
        .unwrap()
        .push(json!(2));

    assert_eq!(container.get("list"), Some(&json!([1, 2])));
}

#[test]
fn test_slot_editor_on_nested_values() {
    let mut container = OrderedContainer::new(json!({"user": {"name": "ann"}}));
    let mut slot = container.slot("user");
    *slot.child_mut("name").unwrap() = json!("bob");
    assert!(slot.exists());

    let counter = container.slot("counter").or_insert(0);
    *counter = json!(counter.as_i64().unwrap() + 1);

    assert_eq!(
        container.to_json(),
        json!({"user": {"name": "bob"}, "counter": 1})
    );
}

// ===== STORAGE REPLACEMENT =====

#[test]
fn test_exchange_array_scenario() {
    let mut container = OrderedContainer::new(json!({"a": 1}));
    let previous = container.exchange_array(json!([10, 20])).unwrap();

    assert_eq!(previous, Storage::from_iter([(Key::from("a"), json!(1))]));
    assert_eq!(container.count(), 2);
    assert_eq!(container.get(0), Some(&json!(10)));
    assert_eq!(container.get(1), Some(&json!(20)));
}

#[test]
fn test_exchange_array_with_another_container() {
    let mut container = OrderedContainer::new(json!([1]));
    let other = OrderedContainer::new(json!({"k": "v"}));
    container.exchange_array(&other).unwrap();

    assert_eq!(container.to_json(), json!({"k": "v"}));
    assert_eq!(other.count(), 1);
}

#[test]
fn test_exchange_array_rejects_non_structured_input() {
    let mut container = setup_mixed_container();
    let before = container.get_array_copy();

    for input in [json!(1), json!("s"), json!(true), json!(null)] {
        let err = container.exchange_array(input).unwrap_err();
        assert!(err.is_invalid_input());
    }
    assert_eq!(container.get_array_copy(), before);
}

#[test]
fn test_construct_from_vec_and_storage() {
    let from_vec = OrderedContainer::new(vec!["a", "b"]);
    assert_eq!(from_vec.to_json(), json!(["a", "b"]));

    let storage: Storage = [(Key::from("k"), json!(1))].into_iter().collect();
    let from_storage = OrderedContainer::new(storage);
    assert_eq!(from_storage.to_json(), json!({"k": 1}));

    assert!(OrderedContainer::new(Input::empty()).is_empty());
}

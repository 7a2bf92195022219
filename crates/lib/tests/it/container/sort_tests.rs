//! The sorting family: flag-driven sorts, comparator sorts and natural order.

use std::cmp::Ordering;

use keyarray::{Key, OrderedContainer, SortFlags};
use serde_json::json;

use crate::helpers::*;

// ===== VALUE SORTS =====

#[test]
fn test_sort_by_value_keeps_keys() {
    let mut container = OrderedContainer::new(json!({"x": 3, "y": 1, "z": 2}));
    container.sort_by_value_keep_keys(SortFlags::Regular);

    assert_eq!(key_strings(&container), ["y", "z", "x"]);
    assert_eq!(container.get("x"), Some(&json!(3)));
}

#[test]
fn test_sort_values_reindexes() {
    let mut container = OrderedContainer::new(json!({"x": "b", "y": "c", "z": "a"}));
    container.sort_values_ascending(SortFlags::Regular);
    assert_eq!(container.to_json(), json!(["a", "b", "c"]));
    assert_eq!(container.append("d").unwrap(), Key::Int(3));

    container.sort_values_descending(SortFlags::Regular);
    assert_eq!(container.to_json(), json!(["d", "c", "b", "a"]));
}

#[test]
fn test_ascending_then_descending_reverses_distinct_values() {
    let mut container = OrderedContainer::new(json!([5, 3, 9, 1]));
    container.sort_values_ascending(SortFlags::Regular);
    let ascending: Vec<_> = container.values().cloned().collect();

    container.sort_values_descending(SortFlags::Regular);
    let mut descending: Vec<_> = container.values().cloned().collect();
    descending.reverse();

    assert_eq!(ascending, descending);
    assert_eq!(key_strings(&container), ["0", "1", "2", "3"]);
}

#[test]
fn test_regular_sort_mixes_numbers_and_numeric_strings() {
    let mut container = OrderedContainer::new(json!(["10", 9, "8.5", "apple", null]));
    container.sort_values_ascending(SortFlags::Regular);
    assert_eq!(container.to_json(), json!([null, "8.5", 9, "10", "apple"]));
}

#[test]
fn test_sort_flags_change_order() {
    let mut container = OrderedContainer::new(json!([10, 9, 100]));
    container.sort_values_ascending(SortFlags::String);
    assert_eq!(container.to_json(), json!([10, 100, 9]));

    container.sort_values_ascending(SortFlags::Numeric);
    assert_eq!(container.to_json(), json!([9, 10, 100]));
}

#[test]
fn test_value_sort_is_stable() {
    let mut container = OrderedContainer::new(json!({"a": 1, "b": 0, "c": 1, "d": 0}));
    container.sort_by_value_keep_keys(SortFlags::Regular);
    assert_eq!(key_strings(&container), ["b", "d", "a", "c"]);
}

// ===== KEY SORTS =====

#[test]
fn test_sort_by_key() {
    let mut container = OrderedContainer::new(json!({"b": 1, "a": 2, "10": 3, "9": 4}));
    container.sort_by_key_ascending(SortFlags::Regular);
    assert_eq!(key_strings(&container), ["9", "10", "a", "b"]);

    container.sort_by_key_descending(SortFlags::Regular);
    assert_eq!(key_strings(&container), ["b", "a", "10", "9"]);
    assert_eq!(container.get("a"), Some(&json!(2)));
}

#[test]
fn test_key_sort_keeps_next_index() {
    let mut container = OrderedContainer::new(json!({"5": "e", "1": "a"}));
    container.sort_by_key_ascending(SortFlags::Regular);
    assert_eq!(container.append("f").unwrap(), Key::Int(6));
}

// ===== COMPARATOR SORTS =====

#[test]
fn test_sort_by_key_with_is_idempotent() {
    let by_length = |a: &Key, b: &Key| a.to_string().len().cmp(&b.to_string().len());

    let mut container = OrderedContainer::new(json!({"ccc": 1, "a": 2, "bb": 3, "d": 4}));
    container.sort_by_key_with(by_length);
    let once = key_strings(&container);
    container.sort_by_key_with(by_length);

    assert_eq!(once, ["a", "d", "bb", "ccc"]);
    assert_eq!(key_strings(&container), once);
}

#[test]
fn test_sort_by_value_with_comparator() {
    let mut container = OrderedContainer::new(json!({"p": [1, 2, 3], "q": [], "r": [1]}));
    container.sort_by_value_with(|a, b| {
        let len = |v: &serde_json::Value| v.as_array().map_or(0, Vec::len);
        len(b).cmp(&len(a))
    });
    assert_eq!(key_strings(&container), ["p", "r", "q"]);
}

#[test]
fn test_failing_comparator_leaves_storage_untouched() {
    let mut container = OrderedContainer::new(json!({"b": 2, "a": 1, "c": "x"}));
    let before = key_strings(&container);

    let result = container.try_sort_by_value_with(|a, b| match (a.as_i64(), b.as_i64()) {
        (Some(l), Some(r)) => Ok(l.cmp(&r)),
        _ => Err("not an integer"),
    });

    assert_eq!(result.unwrap_err(), "not an integer");
    assert_eq!(key_strings(&container), before);
}

#[test]
fn test_try_sort_by_key_with_success() {
    let mut container = OrderedContainer::new(json!({"2": "b", "1": "a"}));
    container
        .try_sort_by_key_with(|a, b| {
            Ok::<_, String>(a.as_int().unwrap_or(0).cmp(&b.as_int().unwrap_or(0)))
        })
        .unwrap();
    assert_eq!(key_strings(&container), ["1", "2"]);
}

#[test]
fn test_panicking_comparator_leaves_storage_untouched() {
    let mut container = OrderedContainer::new(json!([3, 1, 2]));
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        container.sort_by_value_with(|_, _| -> Ordering { panic!("comparator failed") });
    }));

    assert!(result.is_err());
    assert_eq!(container.to_json(), json!([3, 1, 2]));
}

// ===== NATURAL ORDER =====

#[test]
fn test_natural_sort_keeps_keys() {
    let mut container = OrderedContainer::new(json!(["img10", "img2", "img1"]));
    container.natural_sort(false);

    let entries: Vec<(String, String)> = container
        .iter()
        .map(|(k, v)| (k.to_string(), v.as_str().unwrap_or_default().to_string()))
        .collect();
    assert_eq!(
        entries,
        [
            ("2".to_string(), "img1".to_string()),
            ("1".to_string(), "img2".to_string()),
            ("0".to_string(), "img10".to_string()),
        ]
    );
}

#[test]
fn test_natural_sort_case_insensitive() {
    let mut container = OrderedContainer::new(json!(["b10", "A2", "a1", "B1"]));
    container.natural_sort(true);
    assert_eq!(
        container.values().cloned().collect::<Vec<_>>(),
        [json!("a1"), json!("A2"), json!("B1"), json!("b10")]
    );

    container.natural_sort(false);
    assert_eq!(
        container.values().cloned().collect::<Vec<_>>(),
        [json!("A2"), json!("B1"), json!("a1"), json!("b10")]
    );
}

#[test]
fn test_sorts_chain() {
    let mut container = OrderedContainer::new(json!([2, 1]));
    let count = container
        .sort_values_ascending(SortFlags::Regular)
        .sort_by_key_descending(SortFlags::Regular)
        .count();
    assert_eq!(count, 2);
    assert_eq!(key_strings(&container), ["1", "0"]);
}

use keyarray::{Key, OrderedContainer};
use serde_json::json;

/// Create a container mixing string and integer keys: `{a: 1, 0: "zero", b: 2}`
pub fn setup_mixed_container() -> OrderedContainer {
    let mut container = OrderedContainer::new(json!({"a": 1}));
    container.set(0, "zero");
    container.set("b", 2);
    container
}

/// Keys of a container in storage order, as strings
pub fn key_strings(container: &OrderedContainer) -> Vec<String> {
    container.keys().map(Key::to_string).collect()
}

/// Keys yielded by the container's configured iteration strategy, as strings
pub fn iterated_keys(container: &mut OrderedContainer) -> Vec<String> {
    container
        .produce_iterator()
        .map(|(key, _)| key.to_string())
        .collect()
}

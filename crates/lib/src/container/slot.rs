//! SlotEditor for mutable access to a single storage slot.

use super::OrderedContainer;
use crate::{Key, Value};

static NULL: Value = Value::Null;

/// An editor for the slot at one key of an [`OrderedContainer`].
///
/// The editor holds the container mutably, so no other access can change the
/// container's shape while the editor is alive. Reading a missing slot yields
/// `Value::Null` and never creates the key; only [`SlotEditor::set`] and
/// [`SlotEditor::or_insert`] create it.
///
/// ```
/// use keyarray::OrderedContainer;
/// use serde_json::json;
///
/// let mut container = OrderedContainer::new(json!({"tags": ["a"]}));
///
/// container.slot("tags").update(|tags| {
///     tags.as_array_mut().unwrap().push(json!("b"));
/// });
/// assert_eq!(container.get("tags"), Some(&json!(["a", "b"])));
///
/// assert!(container.slot("missing").get().is_null());
/// assert!(!container.exists("missing"));
/// ```
pub struct SlotEditor<'a> {
    container: &'a mut OrderedContainer,
    key: Key,
}

impl<'a> SlotEditor<'a> {
    /// Edit the slot at `key` in `container`. The slot need not exist yet.
    pub fn new(container: &'a mut OrderedContainer, key: Key) -> Self {
        Self { container, key }
    }

    /// The key this editor points at
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Check if the slot currently holds a value
    pub fn exists(&self) -> bool {
        self.container.storage.contains_key(&self.key)
    }

    /// The stored value, or `Value::Null` if the slot is empty.
    pub fn get(&self) -> &Value {
        self.container.storage.get(&self.key).unwrap_or(&NULL)
    }

    /// Mutable access to the stored value, if present.
    pub fn get_mut(&mut self) -> Option<&mut Value> {
        self.container.storage.get_mut(&self.key)
    }

    /// Write `value` into the slot, creating it if needed.
    pub fn set(&mut self, value: impl Into<Value>) {
        self.container.insert_entry(self.key.clone(), value.into());
    }

    /// Apply `f` to the stored value in place. Returns false, without creating the
    /// slot, if it is empty.
    pub fn update<F>(&mut self, f: F) -> bool
    where
        F: FnOnce(&mut Value),
    {
        match self.get_mut() {
            Some(value) => {
                f(value);
                true
            }
            None => false,
        }
    }

    /// Mutable access to the stored value, first writing `default` if the slot is empty.
    pub fn or_insert(self, default: impl Into<Value>) -> &'a mut Value {
        let SlotEditor { container, key } = self;
        if !container.storage.contains_key(&key) {
            container.insert_entry(key.clone(), default.into());
        }
        container.storage.entry(key).or_insert(Value::Null)
    }

    /// Remove the slot, returning its value.
    pub fn delete(self) -> Option<Value> {
        self.container.remove_entry(&self.key)
    }

    /// Mutable access to a child of the value stored here.
    ///
    /// Returns `None` if the slot is not a JSON object or array, or if the child is
    /// missing. Array children are addressed by their index.
    pub fn child_mut(&mut self, child: &str) -> Option<&mut Value> {
        match self.get_mut()? {
            Value::Object(map) => map.get_mut(child),
            Value::Array(items) => child.parse::<usize>().ok().and_then(|i| items.get_mut(i)),
            _ => None,
        }
    }
}

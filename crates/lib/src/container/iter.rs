//! Iteration over a container through its configured strategy.
//!
//! [`OrderedContainer::produce_iterator`] yields `(Key, Slot)` pairs. With the default
//! `array_iterator` strategy every [`Slot`] is [`Slot::Live`]: it points into storage and
//! writes through it are visible in the container. Any other strategy walks a snapshot
//! and yields [`Slot::Detached`] values; writes to those are not reflected in storage.
//! A strategy may reorder, filter or synthesize entries, so its output need not
//! correspond to stored slots.
//!
//! ```
//! use keyarray::OrderedContainer;
//! use serde_json::json;
//!
//! let mut container = OrderedContainer::new(json!([1, 2, 3]));
//! for (_, mut value) in container.produce_iterator() {
//!     *value = json!(value.as_i64().unwrap() * 10);
//! }
//! assert_eq!(container.to_json(), json!([10, 20, 30]));
//!
//! container.set_iteration_strategy("reverse").unwrap();
//! let keys: Vec<_> = container.produce_iterator().map(|(k, _)| k.to_string()).collect();
//! assert_eq!(keys, ["2", "1", "0"]);
//! for (_, mut value) in container.produce_iterator() {
//!     *value = json!(0); // detached: storage is not touched
//! }
//! assert_eq!(container.to_json(), json!([10, 20, 30]));
//! ```

use std::ops::{Deref, DerefMut};

use super::OrderedContainer;
use crate::{Key, Value};

/// A value yielded during iteration.
#[derive(Debug)]
pub enum Slot<'a> {
    /// Points into storage; writes are visible in the container
    Live(&'a mut Value),
    /// A copy produced by a non-default strategy; writes are not reflected
    Detached(Value),
}

impl Slot<'_> {
    /// Returns true if writes through this slot reach storage
    pub fn is_live(&self) -> bool {
        matches!(self, Slot::Live(_))
    }

    /// Take the value out, cloning it if the slot is live.
    pub fn into_value(self) -> Value {
        match self {
            Slot::Live(value) => value.clone(),
            Slot::Detached(value) => value,
        }
    }
}

impl Deref for Slot<'_> {
    type Target = Value;

    fn deref(&self) -> &Value {
        match self {
            Slot::Live(value) => value,
            Slot::Detached(value) => value,
        }
    }
}

impl DerefMut for Slot<'_> {
    fn deref_mut(&mut self) -> &mut Value {
        match self {
            Slot::Live(value) => value,
            Slot::Detached(value) => value,
        }
    }
}

enum Inner<'a> {
    Live(indexmap::map::IterMut<'a, Key, Value>),
    Snapshot(Box<dyn Iterator<Item = (Key, Value)>>),
}

/// A one-shot traversal of a container in its strategy's order.
pub struct Entries<'a> {
    inner: Inner<'a>,
}

impl<'a> Iterator for Entries<'a> {
    type Item = (Key, Slot<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            Inner::Live(iter) => iter.next().map(|(k, v)| (k.clone(), Slot::Live(v))),
            Inner::Snapshot(iter) => iter.next().map(|(k, v)| (k, Slot::Detached(v))),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            Inner::Live(iter) => iter.size_hint(),
            Inner::Snapshot(iter) => iter.size_hint(),
        }
    }
}

impl OrderedContainer {
    /// Produce a fresh traversal of the current storage in the strategy's order.
    ///
    /// The default strategy walks storage directly and yields [`Slot::Live`] values.
    /// Other strategies receive a snapshot and yield [`Slot::Detached`] values.
    pub fn produce_iterator(&mut self) -> Entries<'_> {
        let inner = if self.strategy.is_live() {
            Inner::Live(self.storage.iter_mut())
        } else {
            Inner::Snapshot(self.strategy.traverse(self.storage.clone()))
        };
        Entries { inner }
    }
}

impl<'a> IntoIterator for &'a mut OrderedContainer {
    type Item = (Key, Slot<'a>);
    type IntoIter = Entries<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.produce_iterator()
    }
}

impl<'a> IntoIterator for &'a OrderedContainer {
    type Item = (&'a Key, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.storage.iter()
    }
}

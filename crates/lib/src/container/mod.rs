//! The ordered key/value container.
//!
//! [`OrderedContainer`] owns one insertion-ordered mapping ("storage") from [`Key`] to
//! [`Value`] together with a [`Mode`], an iteration strategy identifier and its own
//! attribute namespace. It behaves like an array (key-level access, append, count),
//! an iterable (see [`OrderedContainer::produce_iterator`]) and a JSON value (see
//! [`OrderedContainer::to_json`]).
//!
//! # Property-style access
//!
//! The property surface (`has_property`, `property`, `set_property`, `remove_property`)
//! is routed by [`Mode`]:
//!
//! - [`Mode::ArrayAsProperties`]: names are storage keys.
//! - [`Mode::StandardProperties`]: names address the container's own attributes. Names
//!   in the protected-name snapshot fail with [`ContainerError::ProtectedName`].
//!
//! # References
//!
//! Mutable references and handles into storage (`get_mut`, `property_mut`, [`SlotEditor`],
//! [`Entries`]) borrow the container mutably, so they are valid until the next structural
//! mutation by construction.
//!
//! ```
//! use keyarray::{Mode, OrderedContainer};
//! use serde_json::json;
//!
//! let mut container = OrderedContainer::new(json!({"a": 1, "b": 2}));
//! container.append(3).unwrap();
//! assert_eq!(container.get(2), Some(&json!(3)));
//!
//! // Property access reads storage in the default mode
//! assert_eq!(container.property("a").unwrap(), Some(&json!(1)));
//!
//! // and the container's own attributes in standard-properties mode
//! container.set_mode(Mode::StandardProperties);
//! container.set_property("a", json!("attribute")).unwrap();
//! assert_eq!(container.get("a"), Some(&json!(1)));
//! assert!(container.set_property("storage", json!([])).is_err());
//! ```

use std::{collections::BTreeSet, fmt, sync::Arc};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    Key, Result, Storage, Value,
    coerce::{self, Input},
    constants,
    strategy::{ArrayIterator, IterationStrategy, StrategyRegistry},
};

pub mod builder;
pub mod errors;
pub mod iter;
pub mod property;
pub mod slot;
pub mod sort;
pub mod state;


pub use builder::ContainerBuilder;
pub use errors::ContainerError;
pub use iter::{Entries, Slot};
pub use property::{DirectAttribute, PropertyAccess, RedirectToStorage};
pub use slot::SlotEditor;
pub use state::SerializedState;

/// Selects where property-style access is routed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Properties are the container's own attributes; protected names are rejected
    StandardProperties,
    /// Properties are storage keys
    #[default]
    ArrayAsProperties,
}

impl Mode {
    /// Returns the dispatcher implementing property access for this mode.
    pub fn dispatcher(self) -> &'static dyn PropertyAccess {
        match self {
            Mode::StandardProperties => &DirectAttribute,
            Mode::ArrayAsProperties => &RedirectToStorage,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::StandardProperties => write!(f, "standard_properties"),
            Mode::ArrayAsProperties => write!(f, "array_as_properties"),
        }
    }
}

/// An insertion-ordered key/value container with array semantics.
#[derive(Clone)]
pub struct OrderedContainer {
    storage: Storage,
    mode: Mode,
    strategy_id: String,
    strategy: Arc<dyn IterationStrategy>,
    registry: Arc<StrategyRegistry>,
    attributes: IndexMap<String, Value>,
    /// Fields declared by an extension of the container, on top of the builtin ones
    declared: Vec<String>,
    protected_names: BTreeSet<String>,
    /// Largest integer key currently in storage
    max_int_key: Option<i64>,
}

impl OrderedContainer {
    /// Create a container in [`Mode::ArrayAsProperties`] with the default strategy.
    ///
    /// Input is normalized by [`coerce::to_storage`]; another container is unwrapped
    /// to its storage.
    pub fn new(input: impl Into<Input>) -> Self {
        Self::from_parts(
            coerce::to_storage(input),
            Mode::default(),
            constants::DEFAULT_STRATEGY.to_string(),
            Arc::new(ArrayIterator),
            StrategyRegistry::global(),
            Vec::new(),
        )
    }

    /// Create a container with an explicit mode and strategy identifier.
    ///
    /// Fails with [`ContainerError::UnknownStrategy`] if the strategy does not resolve
    /// in the global registry.
    pub fn with_options(input: impl Into<Input>, mode: Mode, strategy: &str) -> Result<Self> {
        Self::builder()
            .input(input)
            .mode(mode)
            .iteration_strategy(strategy)
            .build()
    }

    /// Start building a container.
    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::new()
    }

    pub(crate) fn from_parts(
        storage: Storage,
        mode: Mode,
        strategy_id: String,
        strategy: Arc<dyn IterationStrategy>,
        registry: Arc<StrategyRegistry>,
        declared: Vec<String>,
    ) -> Self {
        let mut container = Self {
            storage,
            mode,
            strategy_id,
            strategy,
            registry,
            attributes: IndexMap::new(),
            declared,
            protected_names: BTreeSet::new(),
            max_int_key: None,
        };
        container.protected_names = container.declared_field_names();
        container.recompute_max_int_key();
        container
    }

    /// Names of every field this container declares: the builtin fields plus any
    /// declared by an extension.
    fn declared_field_names(&self) -> BTreeSet<String> {
        constants::DECLARED_FIELDS
            .iter()
            .map(|name| name.to_string())
            .chain(self.declared.iter().cloned())
            .collect()
    }

    // ===== MODE, STRATEGY, METADATA =====

    /// Current property-access mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Change the property-access mode.
    pub fn set_mode(&mut self, mode: Mode) -> &mut Self {
        if self.mode != mode {
            tracing::debug!(from = %self.mode, to = %mode, "Changed container mode");
        }
        self.mode = mode;
        self
    }

    /// Identifier of the current iteration strategy
    pub fn iteration_strategy(&self) -> &str {
        &self.strategy_id
    }

    /// Change the iteration strategy.
    ///
    /// The identifier is resolved through this container's registry (primary namespace,
    /// then one fallback lookup in the builtin namespace). On failure the current
    /// strategy is kept and [`ContainerError::UnknownStrategy`] is returned.
    pub fn set_iteration_strategy(&mut self, id: &str) -> Result<&mut Self> {
        let strategy = self.registry.resolve(id)?;
        self.apply_strategy(id.to_string(), strategy);
        Ok(self)
    }

    fn apply_strategy(&mut self, id: String, strategy: Arc<dyn IterationStrategy>) {
        tracing::debug!(from = %self.strategy_id, to = %id, "Changed iteration strategy");
        self.strategy_id = id;
        self.strategy = strategy;
    }

    /// Registry used to resolve strategy identifiers
    pub fn registry(&self) -> &Arc<StrategyRegistry> {
        &self.registry
    }

    /// Names reserved for the container's own fields, snapshotted at construction.
    pub fn protected_names(&self) -> &BTreeSet<String> {
        &self.protected_names
    }

    /// Check if `name` is reserved for the container's own fields
    pub fn is_protected(&self, name: &str) -> bool {
        self.protected_names.contains(name)
    }

    /// The container's own attributes, written in standard-properties mode
    pub fn attributes(&self) -> &IndexMap<String, Value> {
        &self.attributes
    }

    // ===== KEY-LEVEL ACCESS =====

    /// Check if `key` is present in storage
    pub fn exists(&self, key: impl Into<Key>) -> bool {
        self.storage.contains_key(&key.into())
    }

    /// Get the value stored at `key`. A missing key yields `None` and is not created.
    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        self.storage.get(&key.into())
    }

    /// Get a mutable reference to the slot at `key`. A missing key yields `None` and is
    /// not created.
    pub fn get_mut(&mut self, key: impl Into<Key>) -> Option<&mut Value> {
        self.storage.get_mut(&key.into())
    }

    /// Get an editing handle for the slot at `key`.
    pub fn slot(&mut self, key: impl Into<Key>) -> SlotEditor<'_> {
        SlotEditor::new(self, key.into())
    }

    /// Insert or overwrite the value at `key`.
    ///
    /// Existing keys keep their position; new keys are appended.
    pub fn set(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> &mut Self {
        self.insert_entry(key.into(), value.into());
        self
    }

    /// Append `value` under [`next_index`](Self::next_index) and return that key.
    ///
    /// Never replaces an existing entry: fails with [`ContainerError::IndexOverflow`],
    /// leaving storage unchanged, when the largest integer key is `i64::MAX`.
    pub fn append(&mut self, value: impl Into<Value>) -> Result<Key> {
        let next = self.next_index().ok_or(ContainerError::IndexOverflow {
            max: self.max_int_key.unwrap_or(i64::MAX),
        })?;
        let key = Key::Int(next);
        self.insert_entry(key.clone(), value.into());
        Ok(key)
    }

    /// Write `value` at `key`, or append it when `key` is `None`. Returns the key written.
    ///
    /// Only the append path can fail, see [`append`](Self::append).
    pub fn offset_set(&mut self, key: Option<Key>, value: impl Into<Value>) -> Result<Key> {
        match key {
            Some(key) => {
                self.insert_entry(key.clone(), value.into());
                Ok(key)
            }
            None => self.append(value),
        }
    }

    /// Remove `key`, returning its value. Removing a missing key is a no-op.
    pub fn delete(&mut self, key: impl Into<Key>) -> Option<Value> {
        self.remove_entry(&key.into())
    }

    /// The integer key the next append will use, or `None` if none is left.
    ///
    /// This is the larger of the entry count and one past the largest integer key, so
    /// `{a: 1, b: 2}` appends under `2` and the result is always above every integer
    /// key in storage.
    pub fn next_index(&self) -> Option<i64> {
        let after_max = match self.max_int_key {
            Some(max) => max.checked_add(1)?,
            None => 0,
        };
        let count = i64::try_from(self.storage.len()).ok()?;
        Some(after_max.max(count))
    }

    /// Number of entries in storage
    pub fn count(&self) -> usize {
        self.storage.len()
    }

    /// Number of entries in storage
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Check if storage is empty
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// A detached copy of storage.
    pub fn get_array_copy(&self) -> Storage {
        self.storage.clone()
    }

    /// Consume the container, returning its storage.
    pub fn into_storage(self) -> Storage {
        self.storage
    }

    /// Iterate storage in insertion order, independent of the iteration strategy.
    pub fn iter(&self) -> indexmap::map::Iter<'_, Key, Value> {
        self.storage.iter()
    }

    /// Keys in insertion order
    pub fn keys(&self) -> indexmap::map::Keys<'_, Key, Value> {
        self.storage.keys()
    }

    /// Values in insertion order
    pub fn values(&self) -> indexmap::map::Values<'_, Key, Value> {
        self.storage.values()
    }

    /// Replace storage wholesale, returning the previous storage.
    ///
    /// Fails with [`ContainerError::InvalidInput`] if `input` is neither array-like nor
    /// object-like; storage is unchanged in that case.
    pub fn exchange_array(&mut self, input: impl Into<Input>) -> Result<Storage> {
        let storage = coerce::to_storage_strict(input)?;
        tracing::debug!(
            previous = self.storage.len(),
            replacement = storage.len(),
            "Replaced container storage"
        );
        Ok(self.replace_storage(storage))
    }

    // ===== PROPERTY ACCESS =====

    /// Check if a property exists. Routed by [`Mode`].
    pub fn has_property(&self, name: &str) -> Result<bool> {
        self.mode.dispatcher().has(self, name)
    }

    /// Read a property. Routed by [`Mode`]. A missing property yields `None`.
    pub fn property(&self, name: &str) -> Result<Option<&Value>> {
        self.mode.dispatcher().get(self, name)
    }

    /// Get a mutable reference to a property. Routed by [`Mode`]. A missing property
    /// yields `None` and is not created.
    pub fn property_mut(&mut self, name: &str) -> Result<Option<&mut Value>> {
        self.mode.dispatcher().get_mut(self, name)
    }

    /// Write a property. Routed by [`Mode`].
    pub fn set_property(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        self.mode.dispatcher().set(self, name, value.into())
    }

    /// Remove a property, returning its value. Routed by [`Mode`]. Removing a missing
    /// property is a no-op.
    pub fn remove_property(&mut self, name: &str) -> Result<Option<Value>> {
        self.mode.dispatcher().remove(self, name)
    }

    // ===== STORAGE MUTATION =====

    fn insert_entry(&mut self, key: Key, value: Value) {
        if let Key::Int(n) = key {
            self.max_int_key = Some(self.max_int_key.map_or(n, |max| max.max(n)));
        }
        self.storage.insert(key, value);
    }

    fn remove_entry(&mut self, key: &Key) -> Option<Value> {
        let removed = self.storage.shift_remove(key);
        if removed.is_some() && key.as_int().is_some() && key.as_int() == self.max_int_key {
            self.recompute_max_int_key();
        }
        removed
    }

    fn replace_storage(&mut self, storage: Storage) -> Storage {
        let previous = std::mem::replace(&mut self.storage, storage);
        self.recompute_max_int_key();
        previous
    }

    fn recompute_max_int_key(&mut self) {
        self.max_int_key = self.storage.keys().filter_map(Key::as_int).max();
    }
}

impl Default for OrderedContainer {
    fn default() -> Self {
        Self::new(Input::empty())
    }
}

impl fmt::Debug for OrderedContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedContainer")
            .field("storage", &self.storage)
            .field("mode", &self.mode)
            .field("iteration_strategy", &self.strategy_id)
            .field("attributes", &self.attributes)
            .field("protected_names", &self.protected_names)
            .finish()
    }
}

/// Containers are equal when storage, mode, strategy identifier and attributes match.
impl PartialEq for OrderedContainer {
    fn eq(&self, other: &Self) -> bool {
        self.storage == other.storage
            && self.mode == other.mode
            && self.strategy_id == other.strategy_id
            && self.attributes == other.attributes
    }
}

impl<K, V> FromIterator<(K, V)> for OrderedContainer
where
    K: Into<Key>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let storage: Storage = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::new(storage)
    }
}

impl<K, V> Extend<(K, V)> for OrderedContainer
where
    K: Into<Key>,
    V: Into<Value>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert_entry(k.into(), v.into());
        }
    }
}

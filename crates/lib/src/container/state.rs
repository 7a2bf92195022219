//! Full-state serialization and the JSON view of a container.
//!
//! [`OrderedContainer::serialize`] captures storage, mode and iteration strategy (plus the
//! container's own attributes) as a [`SerializedState`] encoded with `serde_json`.
//! Storage is written as a list of `[key, value]` pairs so integer and string keys
//! survive the trip. The protected-name snapshot is never written; it describes the live
//! container, not transferable data, and is recomputed on restore.
//!
//! [`OrderedContainer::to_json`] and the [`Serialize`] impl expose storage alone, with no
//! envelope: a JSON array when the keys are exactly `0..n` in order, otherwise a JSON
//! object with stringified keys in insertion order.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};

use super::{ContainerError, Mode, OrderedContainer};
use crate::{
    Key, Result, Storage, Value, constants,
    strategy::{IterationStrategy, StrategyRegistry},
};

/// The encoded form of a container's state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedState {
    /// Storage entries in order
    pub storage: Vec<(Key, Value)>,
    /// Property-access mode
    pub mode: Mode,
    /// Iteration strategy identifier
    pub iteration_strategy: String,
    /// Any further fields: the container's own attributes
    #[serde(flatten)]
    pub attributes: IndexMap<String, Value>,
}

impl SerializedState {
    /// Decode state from bytes produced by [`OrderedContainer::serialize`].
    pub fn decode(bytes: &[u8]) -> std::result::Result<Self, ContainerError> {
        serde_json::from_slice(bytes).map_err(|e| ContainerError::MalformedState {
            reason: e.to_string(),
        })
    }
}

impl OrderedContainer {
    /// Capture the full state: storage, mode, iteration strategy and attributes.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let state = SerializedState {
            storage: self
                .storage
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            mode: self.mode,
            iteration_strategy: self.strategy_id.clone(),
            attributes: self.attributes.clone(),
        };
        Ok(serde_json::to_vec(&state)?)
    }

    /// Restore state produced by [`serialize`](Self::serialize) into this container.
    ///
    /// The mode is re-applied through [`set_mode`](Self::set_mode), the strategy is
    /// resolved through this container's registry, storage is replaced wholesale and
    /// every additional field is written through the attribute path, subject to
    /// protected-name enforcement. A `protected_names` field is ignored and the snapshot
    /// is recomputed from this container's declared fields.
    ///
    /// Everything is validated before the first change: on error the container is left
    /// as it was.
    ///
    /// # Errors
    ///
    /// * [`ContainerError::MalformedState`] if the bytes do not decode to the expected shape
    /// * [`ContainerError::UnknownStrategy`] if the strategy does not resolve
    /// * [`ContainerError::ProtectedName`] if an additional field uses a protected name
    pub fn restore(&mut self, bytes: &[u8]) -> Result<()> {
        let state = SerializedState::decode(bytes)?;
        let strategy = self.registry.resolve(&state.iteration_strategy)?;
        self.apply_state(state, strategy)
    }

    /// Construct a container from serialized state using the global registry.
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        Self::deserialize_with_registry(bytes, StrategyRegistry::global())
    }

    /// Construct a container from serialized state, resolving the strategy in `registry`.
    ///
    /// Only the serialized strategy has to resolve; `registry` need not carry the
    /// builtins.
    pub fn deserialize_with_registry(
        bytes: &[u8],
        registry: Arc<StrategyRegistry>,
    ) -> Result<Self> {
        let state = SerializedState::decode(bytes)?;
        let strategy = registry.resolve(&state.iteration_strategy)?;
        let mut container = Self::from_parts(
            Storage::new(),
            state.mode,
            state.iteration_strategy.clone(),
            Arc::clone(&strategy),
            registry,
            Vec::new(),
        );
        container.apply_state(state, strategy)?;
        Ok(container)
    }

    /// Apply decoded state whose strategy is already resolved. Fails before any change
    /// if an additional field uses a protected name.
    fn apply_state(
        &mut self,
        state: SerializedState,
        strategy: Arc<dyn IterationStrategy>,
    ) -> Result<()> {
        let SerializedState {
            storage,
            mode,
            iteration_strategy,
            mut attributes,
        } = state;

        if attributes.shift_remove(constants::PROTECTED_NAMES).is_some() {
            tracing::warn!("Ignoring serialized protected-name snapshot");
        }
        let protected_names = self.declared_field_names();
        if let Some(name) = attributes.keys().find(|name| protected_names.contains(*name)) {
            return Err(ContainerError::ProtectedName { name: name.clone() }.into());
        }

        tracing::debug!(
            entries = storage.len(),
            attributes = attributes.len(),
            %mode,
            strategy = %iteration_strategy,
            "Restoring container state"
        );
        self.protected_names = protected_names;
        self.set_mode(mode);
        self.apply_strategy(iteration_strategy, strategy);
        self.replace_storage(storage.into_iter().collect());
        self.attributes = attributes;
        Ok(())
    }

    /// Storage as a bare JSON value.
    ///
    /// Keys exactly `0..n` in order produce an array; anything else an object.
    pub fn to_json(&self) -> Value {
        if is_list(&self.storage) {
            Value::Array(self.storage.values().cloned().collect())
        } else {
            Value::Object(
                self.storage
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect(),
            )
        }
    }
}

fn is_list(storage: &Storage) -> bool {
    storage
        .keys()
        .enumerate()
        .all(|(i, key)| key.as_int() == i64::try_from(i).ok())
}

/// Serializes storage only, in the same shape as [`OrderedContainer::to_json`].
impl Serialize for OrderedContainer {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if is_list(&self.storage) {
            serializer.collect_seq(self.storage.values())
        } else {
            serializer.collect_map(self.storage.iter().map(|(k, v)| (k.to_string(), v)))
        }
    }
}

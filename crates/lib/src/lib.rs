//!
//! keyarray: an ordered key/value container with array semantics.
//!
//! ## Core Concepts
//!
//! * **Container (`container::OrderedContainer`)**: owns an insertion-ordered mapping from
//!   [`Key`] to [`Value`] and can be used as an array, an iterable, a countable collection
//!   and a JSON-serializable value.
//! * **Keys (`key::Key`)**: integers or strings. Canonical integer strings such as `"5"`
//!   normalize to integer keys, so `"5"` and `5` address the same slot.
//! * **Modes (`container::Mode`)**: select whether property-style access is redirected into
//!   storage or targets the container's own attribute namespace, where a fixed set of
//!   protected names can never be shadowed.
//! * **Iteration strategies (`strategy::IterationStrategy`)**: pluggable traversal orders
//!   resolved by identifier through a [`strategy::StrategyRegistry`].
//! * **Sorting (`container::sort`)**: in-place value, key, comparator and natural-order sorts.
//! * **State round-trip (`container::state`)**: full-state serialization that restores storage,
//!   mode and strategy, plus a bare JSON view of storage.
//!
//! ```
//! use keyarray::{Key, OrderedContainer};
//! use serde_json::json;
//!
//! let mut container = OrderedContainer::new(json!({"a": 1, "b": 2}));
//! let key = container.append(3).unwrap();
//! assert_eq!(key, Key::Int(2));
//! assert_eq!(container.count(), 3);
//! assert_eq!(container.to_json(), json!({"a": 1, "b": 2, "2": 3}));
//! ```

pub mod coerce;
pub mod compare;
pub mod constants;
pub mod container;
pub mod key;
pub mod strategy;

pub use coerce::Input;
pub use compare::SortFlags;
pub use container::{ContainerBuilder, ContainerError, Mode, OrderedContainer};
pub use key::Key;
pub use strategy::{IterationStrategy, Registered, StrategyRegistry};

/// Values stored in a container. Arbitrary and untyped.
pub type Value = serde_json::Value;

/// Backing storage of a container: insertion-ordered, keyed by [`Key`].
pub type Storage = indexmap::IndexMap<Key, Value>;

/// Result type used throughout the keyarray library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the keyarray library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured container errors from the container module
    #[error(transparent)]
    Container(container::ContainerError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Container(_) => "container",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error came from a dynamic access to a protected name.
    pub fn is_protected_name(&self) -> bool {
        match self {
            Error::Container(err) => err.is_protected_name(),
            _ => false,
        }
    }

    /// Check if this error indicates unusable input data.
    pub fn is_invalid_input(&self) -> bool {
        match self {
            Error::Container(err) => err.is_invalid_input(),
            _ => false,
        }
    }

    /// Check if this error indicates an iteration strategy that did not resolve.
    pub fn is_unknown_strategy(&self) -> bool {
        match self {
            Error::Container(err) => err.is_unknown_strategy(),
            _ => false,
        }
    }

    /// Check if this error indicates a serialized state that could not be decoded.
    pub fn is_malformed_state(&self) -> bool {
        match self {
            Error::Container(err) => err.is_malformed_state(),
            _ => false,
        }
    }

    /// Check if this error indicates an append with no integer key left.
    pub fn is_index_overflow(&self) -> bool {
        match self {
            Error::Container(err) => err.is_index_overflow(),
            _ => false,
        }
    }

    /// Check if this error is serialization-related.
    pub fn is_serialization_error(&self) -> bool {
        matches!(self, Error::Serialize(_)) || self.is_malformed_state()
    }
}

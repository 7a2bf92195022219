//! Pluggable iteration strategies.
//!
//! A strategy decides how a container's storage is walked when an iterator is produced.
//! Strategies are looked up by identifier in a [`StrategyRegistry`], so a container's
//! strategy survives serialization as a plain string.
//!
//! # Builtin strategies
//!
//! | identifier       | order                                  | live |
//! |------------------|----------------------------------------|------|
//! | `array_iterator` | insertion order                        | yes  |
//! | `reverse`        | reverse insertion order                | no   |
//! | `skip_null`      | insertion order, `null` values omitted | no   |
//!
//! Only the live strategy hands out mutable access to the stored slots. Every other
//! strategy walks a snapshot, so writes through the yielded values are not reflected
//! in the container.

use std::fmt;

use crate::{Key, Storage, Value, constants};

pub mod registry;

pub use registry::StrategyRegistry;

/// Trait for types that can be registered in a [`StrategyRegistry`] by type.
///
/// # Example
///
/// ```
/// use keyarray::Registered;
///
/// struct Sorted;
///
/// impl Registered for Sorted {
///     fn type_id() -> &'static str {
///         "sorted"
///     }
/// }
///
/// assert_eq!(Sorted::type_id(), "sorted");
/// ```
pub trait Registered {
    /// Returns the identifier this type is registered under.
    fn type_id() -> &'static str;
}

/// A traversal order over a container's storage.
///
/// # Example
///
/// ```
/// use keyarray::{IterationStrategy, Key, Storage, Value};
///
/// #[derive(Debug)]
/// struct IntKeysOnly;
///
/// impl IterationStrategy for IntKeysOnly {
///     fn traverse(&self, snapshot: Storage) -> Box<dyn Iterator<Item = (Key, Value)>> {
///         Box::new(snapshot.into_iter().filter(|(k, _)| k.is_int()))
///     }
/// }
/// ```
pub trait IterationStrategy: fmt::Debug + Send + Sync {
    /// Walks a snapshot of storage, yielding entries in this strategy's order.
    fn traverse(&self, snapshot: Storage) -> Box<dyn Iterator<Item = (Key, Value)>>;

    /// Returns true if the container should walk its storage directly instead of a
    /// snapshot, handing out mutable access to the stored slots.
    fn is_live(&self) -> bool {
        false
    }
}

/// Default strategy: insertion order with live access to the stored slots.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArrayIterator;

impl Registered for ArrayIterator {
    fn type_id() -> &'static str {
        constants::DEFAULT_STRATEGY
    }
}

impl IterationStrategy for ArrayIterator {
    fn traverse(&self, snapshot: Storage) -> Box<dyn Iterator<Item = (Key, Value)>> {
        Box::new(snapshot.into_iter())
    }

    fn is_live(&self) -> bool {
        true
    }
}

/// Reverse insertion order.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReverseIterator;

impl Registered for ReverseIterator {
    fn type_id() -> &'static str {
        constants::REVERSE_STRATEGY
    }
}

impl IterationStrategy for ReverseIterator {
    fn traverse(&self, snapshot: Storage) -> Box<dyn Iterator<Item = (Key, Value)>> {
        Box::new(snapshot.into_iter().rev())
    }
}

/// Insertion order with `null` values omitted.
#[derive(Debug, Default, Clone, Copy)]
pub struct SkipNullIterator;

impl Registered for SkipNullIterator {
    fn type_id() -> &'static str {
        constants::SKIP_NULL_STRATEGY
    }
}

impl IterationStrategy for SkipNullIterator {
    fn traverse(&self, snapshot: Storage) -> Box<dyn Iterator<Item = (Key, Value)>> {
        Box::new(snapshot.into_iter().filter(|(_, v)| !v.is_null()))
    }
}

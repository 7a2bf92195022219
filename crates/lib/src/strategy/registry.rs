//! Registry mapping strategy identifiers to factories.
//!
//! The registry has two namespaces. Caller-registered strategies live in the primary
//! namespace; the builtin strategies live in the secondary `builtin` namespace.
//! Resolution looks in the primary namespace, then makes exactly one fallback lookup in
//! the secondary namespace, then fails. A caller registration therefore shadows a builtin
//! with the same identifier.

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, OnceLock},
};

use super::{ArrayIterator, IterationStrategy, Registered, ReverseIterator, SkipNullIterator};
use crate::{constants, container::ContainerError};

/// Constructs a strategy instance.
pub type StrategyFactory = Arc<dyn Fn() -> Arc<dyn IterationStrategy> + Send + Sync>;

/// Maps strategy identifiers to factories.
///
/// ```
/// use std::sync::Arc;
/// use keyarray::{IterationStrategy, Key, Registered, Storage, StrategyRegistry, Value};
///
/// #[derive(Debug, Default)]
/// struct Sorted;
///
/// impl Registered for Sorted {
///     fn type_id() -> &'static str {
///         "sorted"
///     }
/// }
///
/// impl IterationStrategy for Sorted {
///     fn traverse(&self, mut snapshot: Storage) -> Box<dyn Iterator<Item = (Key, Value)>> {
///         snapshot.sort_by(|a, _, b, _| a.to_string().cmp(&b.to_string()));
///         Box::new(snapshot.into_iter())
///     }
/// }
///
/// let mut registry = StrategyRegistry::with_builtins();
/// registry.register::<Sorted>();
///
/// assert!(registry.resolve("sorted").is_ok());
/// assert!(registry.resolve("reverse").is_ok()); // builtin fallback
/// assert!(registry.resolve("missing").is_err());
/// ```
#[derive(Clone, Default)]
pub struct StrategyRegistry {
    primary: HashMap<String, StrategyFactory>,
    builtin: HashMap<String, StrategyFactory>,
}

impl StrategyRegistry {
    /// Create a registry with both namespaces empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry whose secondary namespace holds the builtin strategies.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.insert_builtin::<ArrayIterator>();
        registry.insert_builtin::<ReverseIterator>();
        registry.insert_builtin::<SkipNullIterator>();
        registry
    }

    /// Process-wide registry holding only the builtin strategies.
    ///
    /// Containers built without an explicit registry share this one.
    pub fn global() -> Arc<StrategyRegistry> {
        static GLOBAL: OnceLock<Arc<StrategyRegistry>> = OnceLock::new();
        GLOBAL
            .get_or_init(|| Arc::new(StrategyRegistry::with_builtins()))
            .clone()
    }

    fn insert_builtin<S>(&mut self)
    where
        S: IterationStrategy + Registered + Default + 'static,
    {
        let factory: StrategyFactory =
            Arc::new(|| Arc::new(S::default()) as Arc<dyn IterationStrategy>);
        self.builtin.insert(S::type_id().to_string(), factory);
    }

    /// Register a strategy type in the primary namespace under its [`Registered::type_id`].
    pub fn register<S>(&mut self) -> &mut Self
    where
        S: IterationStrategy + Registered + Default + 'static,
    {
        self.register_factory(S::type_id(), || Arc::new(S::default()))
    }

    /// Register a factory in the primary namespace under `id`.
    pub fn register_factory<F>(&mut self, id: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> Arc<dyn IterationStrategy> + Send + Sync + 'static,
    {
        let id = id.into();
        tracing::debug!(strategy = %id, "Registered iteration strategy");
        self.primary.insert(id, Arc::new(factory));
        self
    }

    /// Resolve `id` to a fresh strategy instance.
    ///
    /// Tries the primary namespace, then one fallback lookup in the builtin namespace.
    pub fn resolve(&self, id: &str) -> Result<Arc<dyn IterationStrategy>, ContainerError> {
        if let Some(factory) = self.primary.get(id) {
            return Ok(factory());
        }
        tracing::trace!(
            strategy = id,
            namespace = constants::BUILTIN_NAMESPACE,
            "Strategy not in primary namespace, trying fallback"
        );
        self.builtin
            .get(id)
            .map(|factory| factory())
            .ok_or_else(|| ContainerError::UnknownStrategy { id: id.to_string() })
    }

    /// Check if `id` resolves in either namespace
    pub fn contains(&self, id: &str) -> bool {
        self.primary.contains_key(id) || self.builtin.contains_key(id)
    }

    /// List all resolvable identifiers, sorted and deduplicated
    pub fn list(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .primary
            .keys()
            .chain(self.builtin.keys())
            .cloned()
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }
}

impl fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut primary: Vec<_> = self.primary.keys().collect();
        primary.sort();
        let mut builtin: Vec<_> = self.builtin.keys().collect();
        builtin.sort();
        f.debug_struct("StrategyRegistry")
            .field("primary", &primary)
            .field("builtin", &builtin)
            .finish()
    }
}

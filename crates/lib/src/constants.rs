//! Reserved names and default identifiers shared across the crate.

/// Field holding the container's storage.
pub const STORAGE: &str = "storage";

/// Field holding the property-access mode.
pub const MODE: &str = "mode";

/// Field holding the iteration strategy identifier.
pub const ITERATION_STRATEGY: &str = "iteration_strategy";

/// Field holding the protected-name snapshot. Never restored from serialized state.
pub const PROTECTED_NAMES: &str = "protected_names";

/// Field holding the container's own dynamic attributes.
pub const ATTRIBUTES: &str = "attributes";

/// Fields every container declares. These are always protected in standard-properties mode.
pub const DECLARED_FIELDS: [&str; 5] = [
    STORAGE,
    MODE,
    ITERATION_STRATEGY,
    PROTECTED_NAMES,
    ATTRIBUTES,
];

/// Identifier of the default strategy, which walks storage in insertion order.
pub const DEFAULT_STRATEGY: &str = "array_iterator";

/// Identifier of the builtin strategy walking storage in reverse insertion order.
pub const REVERSE_STRATEGY: &str = "reverse";

/// Identifier of the builtin strategy that omits `null` values.
pub const SKIP_NULL_STRATEGY: &str = "skip_null";

/// Name of the secondary registry namespace tried once when a lookup misses.
pub const BUILTIN_NAMESPACE: &str = "builtin";

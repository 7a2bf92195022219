//! Builder for creating OrderedContainer instances.

use std::sync::Arc;

use super::{Mode, OrderedContainer};
use crate::{
    Result,
    coerce::{self, Input},
    constants,
    strategy::StrategyRegistry,
};

/// A builder for creating [`OrderedContainer`] instances.
///
/// Every option has a default: empty input, [`Mode::ArrayAsProperties`], the
/// `array_iterator` strategy and the global [`StrategyRegistry`]. The strategy is only
/// resolved in [`build`](Self::build).
///
/// Types that extend the container with fields of their own declare them with
/// [`declare_field`](Self::declare_field); those names join the protected-name snapshot.
///
/// ```
/// use keyarray::{Mode, OrderedContainer};
/// use serde_json::json;
///
/// let mut container = OrderedContainer::builder()
///     .input(json!(["a", "b"]))
///     .mode(Mode::StandardProperties)
///     .iteration_strategy("reverse")
///     .declare_field("owner")
///     .build()
///     .unwrap();
///
/// assert!(container.set_property("owner", json!("me")).is_err());
/// assert_eq!(container.iteration_strategy(), "reverse");
/// ```
#[derive(Debug, Clone)]
pub struct ContainerBuilder {
    input: Input,
    mode: Mode,
    strategy: String,
    registry: Option<Arc<StrategyRegistry>>,
    declared: Vec<String>,
}

impl ContainerBuilder {
    /// Create a builder with every option at its default.
    pub fn new() -> Self {
        Self {
            input: Input::empty(),
            mode: Mode::default(),
            strategy: constants::DEFAULT_STRATEGY.to_string(),
            registry: None,
            declared: Vec::new(),
        }
    }

    /// Initial contents, normalized by [`coerce::to_storage`].
    pub fn input(mut self, input: impl Into<Input>) -> Self {
        self.input = input.into();
        self
    }

    /// Property-access mode of the built container.
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Identifier of the iteration strategy to resolve at build time.
    pub fn iteration_strategy(mut self, id: impl Into<String>) -> Self {
        self.strategy = id.into();
        self
    }

    /// Resolve strategies in `registry` instead of the global one.
    pub fn registry(mut self, registry: Arc<StrategyRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Declare an additional field name, protecting it from dynamic access.
    pub fn declare_field(mut self, name: impl Into<String>) -> Self {
        self.declared.push(name.into());
        self
    }

    /// Build the container.
    ///
    /// Fails with [`ContainerError::UnknownStrategy`](super::ContainerError::UnknownStrategy)
    /// if the strategy identifier does not resolve.
    pub fn build(self) -> Result<OrderedContainer> {
        let registry = self.registry.unwrap_or_else(StrategyRegistry::global);
        let strategy = registry.resolve(&self.strategy)?;
        Ok(OrderedContainer::from_parts(
            coerce::to_storage(self.input),
            self.mode,
            self.strategy,
            strategy,
            registry,
            self.declared,
        ))
    }
}

impl Default for ContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

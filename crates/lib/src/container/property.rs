//! Mode-dependent dispatch for property-style access.
//!
//! [`Mode::dispatcher`](super::Mode::dispatcher) selects one of the two implementations
//! here. [`RedirectToStorage`] forwards names to the key-level operations on storage;
//! [`DirectAttribute`] targets the container's own attribute namespace and rejects
//! protected names before touching anything.

use super::{ContainerError, OrderedContainer};
use crate::{Key, Result, Value};

/// Property-style access to a container.
pub trait PropertyAccess: Sync {
    /// Check if `name` exists.
    fn has(&self, container: &OrderedContainer, name: &str) -> Result<bool>;

    /// Read `name`. A missing name yields `None`.
    fn get<'c>(&self, container: &'c OrderedContainer, name: &str) -> Result<Option<&'c Value>>;

    /// Get a mutable reference to `name`. A missing name yields `None` and is not created.
    fn get_mut<'c>(
        &self,
        container: &'c mut OrderedContainer,
        name: &str,
    ) -> Result<Option<&'c mut Value>>;

    /// Write `value` to `name`.
    fn set(&self, container: &mut OrderedContainer, name: &str, value: Value) -> Result<()>;

    /// Remove `name`, returning its value. Missing names are a no-op.
    fn remove(&self, container: &mut OrderedContainer, name: &str) -> Result<Option<Value>>;
}

/// Forwards property access to storage; names convert with [`Key::from`].
#[derive(Debug, Clone, Copy)]
pub struct RedirectToStorage;

impl PropertyAccess for RedirectToStorage {
    fn has(&self, container: &OrderedContainer, name: &str) -> Result<bool> {
        Ok(container.exists(name))
    }

    fn get<'c>(&self, container: &'c OrderedContainer, name: &str) -> Result<Option<&'c Value>> {
        Ok(container.get(name))
    }

    fn get_mut<'c>(
        &self,
        container: &'c mut OrderedContainer,
        name: &str,
    ) -> Result<Option<&'c mut Value>> {
        Ok(container.get_mut(name))
    }

    fn set(&self, container: &mut OrderedContainer, name: &str, value: Value) -> Result<()> {
        container.insert_entry(Key::from(name), value);
        Ok(())
    }

    fn remove(&self, container: &mut OrderedContainer, name: &str) -> Result<Option<Value>> {
        Ok(container.remove_entry(&Key::from(name)))
    }
}

/// Targets the container's own attributes, rejecting protected names.
#[derive(Debug, Clone, Copy)]
pub struct DirectAttribute;

impl DirectAttribute {
    fn guard(container: &OrderedContainer, name: &str) -> Result<()> {
        if container.is_protected(name) {
            tracing::debug!(name, "Rejected property access to protected name");
            return Err(ContainerError::ProtectedName {
                name: name.to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl PropertyAccess for DirectAttribute {
    fn has(&self, container: &OrderedContainer, name: &str) -> Result<bool> {
        Self::guard(container, name)?;
        Ok(container.attributes.contains_key(name))
    }

    fn get<'c>(&self, container: &'c OrderedContainer, name: &str) -> Result<Option<&'c Value>> {
        Self::guard(container, name)?;
        Ok(container.attributes.get(name))
    }

    fn get_mut<'c>(
        &self,
        container: &'c mut OrderedContainer,
        name: &str,
    ) -> Result<Option<&'c mut Value>> {
        Self::guard(container, name)?;
        Ok(container.attributes.get_mut(name))
    }

    fn set(&self, container: &mut OrderedContainer, name: &str, value: Value) -> Result<()> {
        Self::guard(container, name)?;
        container.attributes.insert(name.to_string(), value);
        Ok(())
    }

    fn remove(&self, container: &mut OrderedContainer, name: &str) -> Result<Option<Value>> {
        Self::guard(container, name)?;
        Ok(container.attributes.shift_remove(name))
    }
}

//! Normalization of caller input into container storage.
//!
//! Containers accept arbitrary input: a JSON value, ready-made [`Storage`], or another
//! [`OrderedContainer`]. [`to_storage`] turns any of these into an ordered mapping;
//! [`to_storage_strict`] additionally rejects scalars, which is what whole-storage
//! replacement requires.
//!
//! | input                | storage                                      |
//! |----------------------|----------------------------------------------|
//! | JSON array           | keys `0..n` in element order                 |
//! | JSON object          | entries in order, keys normalized by [`Key`] |
//! | `Storage`            | used as is                                   |
//! | `OrderedContainer`   | its storage, unwrapped                       |
//! | JSON scalar          | `{0: scalar}` (strict: rejected)             |
//! | JSON `null`          | empty (strict: rejected)                     |

use crate::{Key, Storage, Value, container::ContainerError, container::OrderedContainer};

/// Caller-supplied input for constructing or replacing container storage.
#[derive(Debug, Clone)]
pub enum Input {
    /// Any JSON value
    Json(Value),
    /// Pre-built storage, taken as is
    Storage(Storage),
    /// Another container, unwrapped to its storage
    Container(OrderedContainer),
}

impl Input {
    /// Input producing empty storage.
    pub fn empty() -> Self {
        Input::Storage(Storage::new())
    }

    /// Returns true if this input is array-like or object-like.
    pub fn is_structured(&self) -> bool {
        match self {
            Input::Json(value) => value.is_array() || value.is_object(),
            Input::Storage(_) | Input::Container(_) => true,
        }
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Value> for Input {
    fn from(value: Value) -> Self {
        Input::Json(value)
    }
}

impl From<Storage> for Input {
    fn from(storage: Storage) -> Self {
        Input::Storage(storage)
    }
}

impl From<OrderedContainer> for Input {
    fn from(container: OrderedContainer) -> Self {
        Input::Container(container)
    }
}

impl From<&OrderedContainer> for Input {
    fn from(container: &OrderedContainer) -> Self {
        Input::Storage(container.get_array_copy())
    }
}

impl<T> From<Vec<T>> for Input
where
    T: Into<Value>,
{
    fn from(values: Vec<T>) -> Self {
        Input::Storage(
            values
                .into_iter()
                .enumerate()
                .map(|(i, v)| (Key::from(i), v.into()))
                .collect(),
        )
    }
}

/// Normalizes any input into storage. Scalars are wrapped under key `0`; `null` is empty.
pub fn to_storage(input: impl Into<Input>) -> Storage {
    match input.into() {
        Input::Json(Value::Null) => Storage::new(),
        Input::Json(value @ (Value::Bool(_) | Value::Number(_) | Value::String(_))) => {
            Storage::from_iter([(Key::Int(0), value)])
        }
        Input::Json(value) => structured(value),
        Input::Storage(storage) => storage,
        Input::Container(container) => container.into_storage(),
    }
}

/// Normalizes array-like or object-like input into storage, rejecting everything else.
pub fn to_storage_strict(input: impl Into<Input>) -> Result<Storage, ContainerError> {
    let input = input.into();
    if let Input::Json(value) = &input {
        if !value.is_array() && !value.is_object() {
            return Err(ContainerError::InvalidInput {
                reason: format!(
                    "expected an array or object, found {}",
                    json_type_name(value)
                ),
            });
        }
    }
    Ok(to_storage(input))
}

fn structured(value: Value) -> Storage {
    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, v)| (Key::from(i), v))
            .collect(),
        Value::Object(map) => map.into_iter().map(|(k, v)| (Key::from(k), v)).collect(),
        _ => Storage::new(),
    }
}

/// Human-readable name of a JSON value's type
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

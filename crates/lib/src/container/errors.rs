//! Error types for container operations.
//!
//! This module defines structured error types for the container: protected-name
//! violations on the property surface, unusable input data, iteration strategies
//! that do not resolve, serialized state that cannot be decoded, and appends with no
//! integer key left.

use thiserror::Error;

/// Structured error types for container operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ContainerError {
    /// Property-style access targeted a name reserved for the container's own fields
    #[error("Name '{name}' is reserved for internal container fields")]
    ProtectedName { name: String },

    /// Input could not be used as container storage
    #[error("Invalid container input: {reason}")]
    InvalidInput { reason: String },

    /// Iteration strategy identifier did not resolve, even after the fallback lookup
    #[error("Unknown iteration strategy: {id}")]
    UnknownStrategy { id: String },

    /// Serialized state did not decode to the expected shape
    #[error("Malformed serialized state: {reason}")]
    MalformedState { reason: String },

    /// Append found no integer key left after the largest one in storage
    #[error("Cannot append: no integer key after {max}")]
    IndexOverflow { max: i64 },
}

impl ContainerError {
    /// Check if this error is a protected-name violation
    pub fn is_protected_name(&self) -> bool {
        matches!(self, ContainerError::ProtectedName { .. })
    }

    /// Check if this error is related to unusable input
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, ContainerError::InvalidInput { .. })
    }

    /// Check if this error is an unresolved iteration strategy
    pub fn is_unknown_strategy(&self) -> bool {
        matches!(self, ContainerError::UnknownStrategy { .. })
    }

    /// Check if this error is related to decoding serialized state
    pub fn is_malformed_state(&self) -> bool {
        matches!(self, ContainerError::MalformedState { .. })
    }

    /// Check if this error is an append past the largest integer key
    pub fn is_index_overflow(&self) -> bool {
        matches!(self, ContainerError::IndexOverflow { .. })
    }

    /// Get the offending name if this is a protected-name violation
    pub fn name(&self) -> Option<&str> {
        match self {
            ContainerError::ProtectedName { name } => Some(name),
            _ => None,
        }
    }

    /// Get the strategy identifier if this is an unresolved strategy
    pub fn strategy_id(&self) -> Option<&str> {
        match self {
            ContainerError::UnknownStrategy { id } => Some(id),
            _ => None,
        }
    }
}

// Conversion from ContainerError to the main Error type
impl From<ContainerError> for crate::Error {
    fn from(err: ContainerError) -> Self {
        crate::Error::Container(err)
    }
}

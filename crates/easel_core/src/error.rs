//! Model error types

use thiserror::Error;

use crate::shape::ShapeKind;

/// Errors raised when an authoring operation violates a model invariant
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnimatorError {
    /// Malformed argument: empty name, non-positive dimension, negative time,
    /// end before start, unknown shape kind
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An animation overlaps another of the same kind on the same shape
    #[error("Conflicting animation: {0}")]
    Conflict(String),

    /// A shape with the same kind and name is already in the model
    #[error("Duplicate shape: {kind} '{name}' already exists")]
    DuplicateShape { kind: ShapeKind, name: String },

    /// The shape or keyframe is not present
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AnimatorError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

/// Result alias used throughout the model
pub type Result<T> = std::result::Result<T, AnimatorError>;

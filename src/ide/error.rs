//! Error types for refactoring operations.
//!
//! An unresolved reference is not an error anywhere in this crate: resolution
//! returns an empty target set and callers treat that as a terminal answer.
//! Errors are reserved for operations invoked on the wrong kind of node and
//! for tree states that violate the engine's own invariants.

use thiserror::Error;

/// Errors that can occur while applying a rename or a qualified-name
/// rewrite.
#[derive(Debug, Error)]
pub enum RefactorError {
    /// The operation was invoked on a node it does not apply to.
    #[error("invalid refactoring operation: {0}")]
    InvalidOperation(&'static str),

    /// The tree reached a shape the engine's invariants rule out.
    #[error("inconsistent syntax tree: {0}")]
    InternalConsistency(String),
}

impl RefactorError {
    pub(crate) fn inconsistent(message: impl Into<String>) -> Self {
        RefactorError::InternalConsistency(message.into())
    }
}

/// Result alias for refactoring operations.
pub type RefactorResult<T> = Result<T, RefactorError>;

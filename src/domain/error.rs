//! Unified error type for the domain layer
//!
//! Every precondition and invariant check in the data model reports through
//! `DomainError`; callers (the form/dialog layer) surface the message and
//! re-prompt. Nothing in the domain panics on bad input.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone)]
pub enum DomainError {
    /// A precondition on a single field is violated (blank name, negative
    /// duration, negative coordinate, minimum above maximum)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An identifier does not resolve in the collection it is looked up
    /// against
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// A structural invariant spanning multiple fields would be broken
    #[error("integrity violation: {0}")]
    IntegrityViolation(String),
}

impl DomainError {
    /// Create an invalid-argument error for a single-field precondition
    /// violation.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a not-found error for an identifier that failed to resolve.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Create an integrity-violation error for a broken structural invariant.
    pub fn integrity(msg: impl Into<String>) -> Self {
        Self::IntegrityViolation(msg.into())
    }
}

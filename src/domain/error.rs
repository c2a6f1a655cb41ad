//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent structural violations of the navigation tree.
///
/// Every operation validates before it mutates, so returning one of these
/// always means the tree is unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required node handle does not resolve to a live node.
    #[error("null reference: {0}")]
    NullReference(String),

    /// The request would break a tree invariant or carries bad input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl DomainError {
    pub fn null_reference(what: impl Into<String>) -> Self {
        Self::NullReference(what.into())
    }

    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument(reason.into())
    }

    pub fn is_null_reference(&self) -> bool {
        matches!(self, Self::NullReference(_))
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

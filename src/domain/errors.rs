//! # Domain Errors
//!
//! Error types for domain-level invariant violations.

use thiserror::Error;

/// Result alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// Error raised when a domain invariant is violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A required field is missing or empty.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// The bidding-window length is invalid.
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),

    /// A price failed validation.
    #[error("invalid price: {0}")]
    InvalidPrice(String),

    /// An identifier failed validation.
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

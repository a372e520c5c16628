//! # Application Errors
//!
//! Error types for the use-case layer.
//!
//! # Error Taxonomy
//!
//! ```text
//! ApplicationError
//! ├── Validation(String)   - malformed inbound request, 4xx-equivalent
//! ├── NotFound  {..}       - unknown correlation id at query time
//! ├── Domain(DomainError)  - invariant violation surfaced as validation
//! ├── Store(StoreError)    - durable store unavailable or failing
//! ├── Bus(BusError)        - broadcast or reply channel failing
//! └── Serialization(String)
//! ```
//!
//! Synchronous paths surface these to the caller; asynchronous per-message
//! paths log them and move on to the next message.

use crate::domain::errors::DomainError;
use crate::infrastructure::messaging::traits::BusError;
use crate::infrastructure::persistence::traits::StoreError;
use thiserror::Error;

/// Result alias for use-case operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

/// Error raised by a use case.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Input validation failed; the caller must fix the request.
    #[error("validation error: {0}")]
    Validation(String),

    /// The referenced resource does not exist.
    #[error("not found: {resource} {id}")]
    NotFound {
        /// Kind of resource looked up.
        resource: &'static str,
        /// Identifier that matched nothing.
        id: String,
    },

    /// A domain invariant was violated while building an entity.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The durable store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The message bus failed.
    #[error(transparent)]
    Bus(#[from] BusError),

    /// A payload could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl ApplicationError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a not-found error.
    #[must_use]
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Returns true if the error is the caller's fault (4xx-equivalent).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::NotFound { .. } | Self::Domain(_)
        )
    }
}

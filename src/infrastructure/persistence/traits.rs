//! # Store Traits
//!
//! Port definitions for the durable key-value store.
//!
//! Two tables back the engine: the request table keyed by
//! `(customer_id, correlation_id)` and the response table keyed by
//! `(correlation_id, bidder_id)`. The ports only assume per-key atomic puts
//! with last-write-wins semantics; no cross-key transactions are required.
//!
//! # Available Ports
//!
//! - [`RequestStore`]: persistence for [`RfqRequest`] records
//! - [`ResponseStore`]: persistence for [`RfqResponse`] records

use crate::domain::entities::{RfqRequest, RfqResponse};
use crate::domain::value_objects::{CorrelationId, CustomerId};
use async_trait::async_trait;
use thiserror::Error;

/// Error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached.
    #[error("store connection error: {0}")]
    Connection(String),

    /// A read or write failed inside the store.
    #[error("store query error: {0}")]
    Query(String),

    /// A record could not be encoded or decoded.
    #[error("store serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Creates a query error.
    #[must_use]
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query(message.into())
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence port for request records.
///
/// `put` is an idempotent overwrite: a correlation-id collision silently
/// replaces the previous record, matching the negligible-collision contract
/// of the 128-bit correlation token.
#[async_trait]
pub trait RequestStore: Send + Sync + std::fmt::Debug {
    /// Persists a request record, overwriting any record under the same key.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the write fails; submission treats this
    /// as fatal and broadcasts nothing.
    async fn put(&self, request: &RfqRequest) -> StoreResult<()>;

    /// Fetches the request record for `(customer_id, correlation_id)`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the read fails. A missing record is
    /// `Ok(None)`, not an error.
    async fn get(
        &self,
        customer_id: &CustomerId,
        correlation_id: CorrelationId,
    ) -> StoreResult<Option<RfqRequest>>;
}

/// Persistence port for response records.
///
/// Each upsert to a `(correlation_id, bidder_id)` key is atomic and the last
/// committed write wins; concurrent collectors need no further coordination.
#[async_trait]
pub trait ResponseStore: Send + Sync + std::fmt::Debug {
    /// Inserts or overwrites the response slot for the record's key.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the write fails.
    async fn upsert(&self, response: &RfqResponse) -> StoreResult<()>;

    /// Returns all responses stored for a correlation id, in no
    /// particular order.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the read fails.
    async fn find_by_correlation(
        &self,
        correlation_id: CorrelationId,
    ) -> StoreResult<Vec<RfqResponse>>;

    /// Counts the distinct bidders with a stored response for a
    /// correlation id.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the read fails.
    async fn count_by_correlation(&self, correlation_id: CorrelationId) -> StoreResult<u64>;
}

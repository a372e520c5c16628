//! # In-Memory Request Store
//!
//! In-memory implementation of [`RequestStore`].
//!
//! Uses a thread-safe `HashMap` keyed by `(customer_id, correlation_id)`.
//! Backs the unit tests and the single-process demo binary.

use crate::domain::entities::RfqRequest;
use crate::domain::value_objects::{CorrelationId, CustomerId};
use crate::infrastructure::persistence::traits::{RequestStore, StoreResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`RequestStore`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryRequestStore {
    storage: Arc<RwLock<HashMap<(CustomerId, CorrelationId), RfqRequest>>>,
}

impl InMemoryRequestStore {
    /// Creates a new empty in-memory request store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored request records.
    pub async fn len(&self) -> usize {
        self.storage.read().await.len()
    }

    /// Returns true if the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl RequestStore for InMemoryRequestStore {
    async fn put(&self, request: &RfqRequest) -> StoreResult<()> {
        let key = (request.customer_id().clone(), request.correlation_id());
        let mut storage = self.storage.write().await;
        storage.insert(key, request.clone());
        Ok(())
    }

    async fn get(
        &self,
        customer_id: &CustomerId,
        correlation_id: CorrelationId,
    ) -> StoreResult<Option<RfqRequest>> {
        let storage = self.storage.read().await;
        Ok(storage
            .get(&(customer_id.clone(), correlation_id))
            .cloned())
    }
}

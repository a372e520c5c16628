//! # In-Memory Response Store
//!
//! In-memory implementation of [`ResponseStore`].
//!
//! Uses a thread-safe `HashMap` keyed by `(correlation_id, bidder_id)`, so a
//! repeated insert under the same key naturally implements last-write-wins.

use crate::domain::entities::RfqResponse;
use crate::domain::value_objects::{BidderId, CorrelationId};
use crate::infrastructure::persistence::traits::{ResponseStore, StoreResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`ResponseStore`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryResponseStore {
    storage: Arc<RwLock<HashMap<(CorrelationId, BidderId), RfqResponse>>>,
}

impl InMemoryResponseStore {
    /// Creates a new empty in-memory response store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of stored responses across all correlations.
    pub async fn len(&self) -> usize {
        self.storage.read().await.len()
    }

    /// Returns true if the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ResponseStore for InMemoryResponseStore {
    async fn upsert(&self, response: &RfqResponse) -> StoreResult<()> {
        let key = (response.correlation_id(), response.bidder_id().clone());
        let mut storage = self.storage.write().await;
        storage.insert(key, response.clone());
        Ok(())
    }

    async fn find_by_correlation(
        &self,
        correlation_id: CorrelationId,
    ) -> StoreResult<Vec<RfqResponse>> {
        let storage = self.storage.read().await;
        Ok(storage
            .values()
            .filter(|r| r.correlation_id() == correlation_id)
            .cloned()
            .collect())
    }

    async fn count_by_correlation(&self, correlation_id: CorrelationId) -> StoreResult<u64> {
        let storage = self.storage.read().await;
        Ok(storage
            .keys()
            .filter(|(cid, _)| *cid == correlation_id)
            .count() as u64)
    }
}

//! # Response Collection Use Case
//!
//! Drains bidder replies from the reply channel into the durable response
//! store.
//!
//! The collector is the only writer of response records. It processes records
//! in batches with per-record isolation: one malformed or failing record is
//! logged and dropped without touching the rest of the batch. Replies are
//! stored keyed by `(correlation id, bidder id)`, so a bidder that answers
//! twice overwrites its own earlier quote rather than appearing twice.
//!
//! Orphan replies, whose correlation id matches no stored request, are stored
//! anyway. The collector never reads the request store; a reply that arrives
//! before its request record becomes visible would otherwise be lost.

use crate::config::BusConfig;
use crate::domain::entities::RfqResponse;
use crate::domain::value_objects::{BidderId, CorrelationId, Timestamp};
use crate::infrastructure::messaging::envelope::InboundMessage;
use crate::infrastructure::persistence::traits::ResponseStore;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Why a single reply record was dropped.
#[derive(Debug, Error)]
pub enum CollectError {
    /// The record could not be parsed into payload plus attributes.
    #[error("malformed reply record: {0}")]
    Envelope(#[from] crate::infrastructure::messaging::envelope::EnvelopeError),

    /// A routing attribute was present but unusable.
    #[error("bad {attribute} attribute: {reason}")]
    BadAttribute {
        /// Attribute key name.
        attribute: String,
        /// What was wrong with the value.
        reason: String,
    },

    /// The reply payload did not carry a usable quote.
    #[error("malformed quote payload: {0}")]
    Payload(String),

    /// The store rejected the write.
    #[error(transparent)]
    Store(#[from] crate::infrastructure::persistence::traits::StoreError),
}

/// The quote fields the collector needs out of a reply payload.
///
/// Everything else in the payload is kept verbatim as the raw record.
#[derive(Debug, Deserialize)]
struct QuoteFields {
    price: crate::domain::value_objects::Price,
    #[serde(default)]
    perks: Vec<crate::domain::value_objects::Perk>,
}

/// Per-batch tally of stored and dropped records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Records written to the response store.
    pub stored: usize,
    /// Records dropped as malformed or failed.
    pub failed: usize,
}

/// Drains bidder replies into the response store.
#[derive(Debug)]
pub struct ResponseCollector {
    response_store: Arc<dyn ResponseStore>,
    bus_config: BusConfig,
}

impl ResponseCollector {
    /// Creates a collector over the given store.
    #[must_use]
    pub fn new(response_store: Arc<dyn ResponseStore>, bus_config: BusConfig) -> Self {
        Self {
            response_store,
            bus_config,
        }
    }

    /// Processes a batch of raw reply records.
    ///
    /// Records are independent: a failure is counted and logged, and the
    /// batch continues.
    pub async fn process_batch(&self, records: &[serde_json::Value]) -> BatchSummary {
        let mut summary = BatchSummary::default();
        for record in records {
            match self.process_record(record).await {
                Ok(()) => summary.stored += 1,
                Err(e) => {
                    warn!(error = %e, "dropping reply record");
                    summary.failed += 1;
                }
            }
        }
        summary
    }

    /// Parses one reply record and upserts it into the response store.
    ///
    /// # Errors
    ///
    /// Returns a [`CollectError`] when the record is malformed or the store
    /// write fails. Callers drop the record either way; malformed input does
    /// not become valid on retry.
    pub async fn process_record(&self, record: &serde_json::Value) -> Result<(), CollectError> {
        let message = InboundMessage::parse(record)?;

        let correlation_raw = message.attribute(&self.bus_config.correlation_id_key)?;
        let correlation_id =
            CorrelationId::parse(correlation_raw).map_err(|e| CollectError::BadAttribute {
                attribute: self.bus_config.correlation_id_key.clone(),
                reason: e.to_string(),
            })?;
        let bidder_id = BidderId::new(message.attribute(&self.bus_config.bidder_id_key)?);

        let quote: QuoteFields = serde_json::from_value(message.payload().clone())
            .map_err(|e| CollectError::Payload(e.to_string()))?;

        let response = RfqResponse::new(
            correlation_id,
            bidder_id,
            quote.price,
            quote.perks,
            Timestamp::now(),
            message.payload().clone(),
        );
        self.response_store.upsert(&response).await?;
        debug!(correlation = %correlation_id, bidder = %response.bidder_id(), "stored bidder reply");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Perk, Price};
    use crate::infrastructure::messaging::envelope::broadcast_record;
    use crate::infrastructure::persistence::in_memory::InMemoryResponseStore;
    use std::collections::HashMap;

    fn collector() -> (ResponseCollector, Arc<InMemoryResponseStore>) {
        let store = Arc::new(InMemoryResponseStore::new());
        let collector = ResponseCollector::new(store.clone(), BusConfig::default());
        (collector, store)
    }

    fn reply(correlation: CorrelationId, bidder: &str, price: f64) -> serde_json::Value {
        let attributes: HashMap<String, String> = [
            ("correlation-id".to_string(), correlation.to_string()),
            ("bidder-id".to_string(), bidder.to_string()),
        ]
        .into();
        broadcast_record(
            &serde_json::json!({
                "bidder-id": bidder,
                "customer-id": "customer-1",
                "price": price,
                "perks": ["FREE_DRINKS_NON_ALC"],
            }),
            &attributes,
        )
    }

    #[tokio::test]
    async fn stores_a_well_formed_reply() {
        let (collector, store) = collector();
        let correlation = CorrelationId::new_v4();

        collector
            .process_record(&reply(correlation, "U1", 2.95))
            .await
            .unwrap();

        let stored = store.find_by_correlation(correlation).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].bidder_id().as_str(), "U1");
        assert_eq!(stored[0].price(), Price::new(2.95).unwrap());
        assert_eq!(stored[0].perks(), &[Perk::FreeDrinksNonAlc]);
    }

    #[tokio::test]
    async fn stores_orphan_replies_without_a_request() {
        let (collector, store) = collector();
        // No request was ever submitted for this correlation id.
        let correlation = CorrelationId::new_v4();

        collector
            .process_record(&reply(correlation, "U9", 4.10))
            .await
            .unwrap();

        assert_eq!(store.count_by_correlation(correlation).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn double_reply_overwrites_not_duplicates() {
        let (collector, store) = collector();
        let correlation = CorrelationId::new_v4();

        collector
            .process_record(&reply(correlation, "U1", 2.95))
            .await
            .unwrap();
        collector
            .process_record(&reply(correlation, "U1", 3.50))
            .await
            .unwrap();

        let stored = store.find_by_correlation(correlation).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].price(), Price::new(3.50).unwrap());
    }

    #[tokio::test]
    async fn batch_isolates_failures() {
        let (collector, store) = collector();
        let correlation = CorrelationId::new_v4();

        let records = vec![
            reply(correlation, "U1", 2.95),
            serde_json::json!({"unrelated": true}),
            reply(correlation, "U2", 3.05),
        ];
        let summary = collector.process_batch(&records).await;

        assert_eq!(summary, BatchSummary { stored: 2, failed: 1 });
        assert_eq!(store.count_by_correlation(correlation).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn non_uuid_correlation_id_is_rejected() {
        let (collector, _store) = collector();

        let attributes: HashMap<String, String> = [
            ("correlation-id".to_string(), "not-a-uuid".to_string()),
            ("bidder-id".to_string(), "U1".to_string()),
        ]
        .into();
        let record = broadcast_record(&serde_json::json!({"price": 1.0}), &attributes);

        let err = collector.process_record(&record).await.unwrap_err();
        assert!(matches!(err, CollectError::BadAttribute { .. }));
    }

    #[tokio::test]
    async fn payload_without_price_is_rejected() {
        let (collector, _store) = collector();
        let correlation = CorrelationId::new_v4();

        let attributes: HashMap<String, String> = [
            ("correlation-id".to_string(), correlation.to_string()),
            ("bidder-id".to_string(), "U1".to_string()),
        ]
        .into();
        let record =
            broadcast_record(&serde_json::json!({"bidder-id": "U1"}), &attributes);

        let err = collector.process_record(&record).await.unwrap_err();
        assert!(matches!(err, CollectError::Payload(_)));
    }
}

//! # Submit RFQ Use Case
//!
//! Creates the request record and broadcasts it to the bidder pool.
//!
//! The order of effects is the contract: persist first, broadcast second.
//! A persistence failure aborts the call so no request is ever advertised
//! that nobody can track. A broadcast failure after a successful persist is
//! logged and NOT rolled back; the record simply collects zero quotes.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::config::BusConfig;
use crate::domain::errors::DomainError;
use crate::domain::entities::{RfqRequest, RfqStatus};
use crate::domain::value_objects::{CorrelationId, CustomerId, Timestamp};
use crate::infrastructure::messaging::traits::RequestBroadcaster;
use crate::infrastructure::persistence::traits::RequestStore;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Input for a submission.
#[derive(Debug, Clone)]
pub struct SubmitRfqCommand {
    /// Requester identity.
    pub customer_id: String,
    /// Ride start location.
    pub from_location: String,
    /// Ride end location.
    pub to_location: String,
    /// Bidding-window length in seconds; `None` means the field was absent.
    pub timeout_secs: Option<i64>,
    /// The original submission payload, round-tripped to the requester later.
    pub details: serde_json::Value,
}

/// Output of a successful submission.
#[derive(Debug, Clone)]
pub struct SubmitRfqOutcome {
    /// Requester identity.
    pub customer_id: CustomerId,
    /// The fresh correlation id the requester polls with.
    pub correlation_id: CorrelationId,
    /// Always [`RfqStatus::Running`] at submission time.
    pub status: RfqStatus,
    /// The computed deadline.
    pub eta: Timestamp,
}

/// Use case: accept a ride request, persist it, and fan it out to bidders.
#[derive(Debug)]
pub struct SubmitRfqUseCase {
    request_store: Arc<dyn RequestStore>,
    broadcaster: Arc<dyn RequestBroadcaster>,
    bus_config: BusConfig,
}

impl SubmitRfqUseCase {
    /// Creates the use case with its collaborators.
    #[must_use]
    pub fn new(
        request_store: Arc<dyn RequestStore>,
        broadcaster: Arc<dyn RequestBroadcaster>,
        bus_config: BusConfig,
    ) -> Self {
        Self {
            request_store,
            broadcaster,
            bus_config,
        }
    }

    /// Executes the submission.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a missing or negative timeout or empty
    /// fields, and a store error if persistence fails. Broadcast failures are
    /// logged, never surfaced.
    pub async fn execute(&self, command: SubmitRfqCommand) -> ApplicationResult<SubmitRfqOutcome> {
        let timeout_secs = command
            .timeout_secs
            .ok_or_else(|| ApplicationError::validation("timeout-in-secs is required"))?;

        let correlation_id = CorrelationId::new_v4();
        let submitted_at = Timestamp::now();
        debug!(%correlation_id, "accepted submission");

        let deadline = submitted_at
            .checked_add_secs(timeout_secs.max(0))
            .ok_or_else(|| {
                DomainError::InvalidTimeout(format!(
                    "timeout-in-secs {timeout_secs} puts the deadline out of range"
                ))
            })?;
        let details = enrich_details(command.details, correlation_id, submitted_at, deadline);

        let request = RfqRequest::new(
            CustomerId::new(command.customer_id),
            correlation_id,
            command.from_location,
            command.to_location,
            submitted_at,
            timeout_secs,
            details,
        )?;

        // Persist before broadcast; a failure here must leave no trace on
        // the bus.
        self.request_store.put(&request).await?;

        if let Err(e) = self.broadcast(&request).await {
            error!(%correlation_id, error = %e, "broadcast failed after persist; request will collect no quotes");
        } else {
            info!(%correlation_id, deadline = %request.deadline(), "rfq broadcast to bidder pool");
        }

        Ok(SubmitRfqOutcome {
            customer_id: request.customer_id().clone(),
            correlation_id,
            status: RfqStatus::Running,
            eta: request.deadline(),
        })
    }

    async fn broadcast(&self, request: &RfqRequest) -> ApplicationResult<()> {
        let mut attributes = HashMap::new();
        attributes.insert(
            self.bus_config.correlation_id_key.clone(),
            request.correlation_id().to_string(),
        );
        attributes.insert(
            self.bus_config.return_address_key.clone(),
            self.bus_config.reply_queue.clone(),
        );
        // Extra attributes for subscription-side filtering.
        attributes.insert(
            "customer-id".to_string(),
            request.customer_id().to_string(),
        );
        attributes.insert(
            "from-location".to_string(),
            request.from_location().to_string(),
        );
        attributes.insert("to-location".to_string(), request.to_location().to_string());
        attributes.insert(
            "timeout-in-secs".to_string(),
            request.timeout_secs().to_string(),
        );

        self.broadcaster
            .broadcast(request.details(), &attributes)
            .await?;
        Ok(())
    }
}

/// Merges the generated identifiers and timestamps into the raw payload, as
/// the round-trip contract expects them to appear in ride data later.
fn enrich_details(
    details: serde_json::Value,
    correlation_id: CorrelationId,
    submitted_at: Timestamp,
    timeout_at: Timestamp,
) -> serde_json::Value {
    let mut details = details;
    if let serde_json::Value::Object(map) = &mut details {
        map.insert(
            "correlation-id".to_string(),
            serde_json::Value::String(correlation_id.to_string()),
        );
        map.insert(
            "submitted-at".to_string(),
            serde_json::Value::String(submitted_at.to_iso8601()),
        );
        map.insert(
            "timeout-at".to_string(),
            serde_json::Value::String(timeout_at.to_iso8601()),
        );
    }
    details
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::infrastructure::messaging::envelope::InboundMessage;
    use crate::infrastructure::messaging::in_memory::InMemoryBus;
    use crate::infrastructure::messaging::traits::{BusError, BusResult};
    use crate::infrastructure::persistence::in_memory::InMemoryRequestStore;
    use crate::infrastructure::persistence::traits::{StoreError, StoreResult};
    use async_trait::async_trait;

    fn command(timeout: Option<i64>) -> SubmitRfqCommand {
        SubmitRfqCommand {
            customer_id: "customer-1".to_string(),
            from_location: "Liberty Island".to_string(),
            to_location: "Central Park".to_string(),
            timeout_secs: timeout,
            details: serde_json::json!({
                "customer-id": "customer-1",
                "from-location": "Liberty Island",
                "to-location": "Central Park",
                "timeout-in-secs": timeout,
            }),
        }
    }

    fn use_case(
        store: Arc<InMemoryRequestStore>,
        bus: Arc<InMemoryBus>,
    ) -> SubmitRfqUseCase {
        SubmitRfqUseCase::new(store, bus, BusConfig::default())
    }

    #[tokio::test]
    async fn persists_and_broadcasts() {
        let store = Arc::new(InMemoryRequestStore::new());
        let bus = Arc::new(InMemoryBus::new());
        let mut topic = bus.subscribe();

        let outcome = use_case(store.clone(), bus)
            .execute(command(Some(300)))
            .await
            .unwrap();

        assert_eq!(outcome.status, RfqStatus::Running);

        let stored = store
            .get(&outcome.customer_id, outcome.correlation_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.deadline(), outcome.eta);
        assert_eq!(stored.deadline(), stored.submitted_at().add_secs(300));

        let record = topic.recv().await.unwrap();
        let msg = InboundMessage::parse(&record).unwrap();
        assert_eq!(
            msg.attribute("correlation-id").unwrap(),
            outcome.correlation_id.to_string()
        );
        assert_eq!(msg.attribute("return-address").unwrap(), "rfq-replies");
        assert_eq!(msg.payload()["from-location"], "Liberty Island");
    }

    #[tokio::test]
    async fn payload_is_enriched_with_generated_fields() {
        let store = Arc::new(InMemoryRequestStore::new());
        let bus = Arc::new(InMemoryBus::new());

        let outcome = use_case(store.clone(), bus)
            .execute(command(Some(60)))
            .await
            .unwrap();

        let stored = store
            .get(&outcome.customer_id, outcome.correlation_id)
            .await
            .unwrap()
            .unwrap();
        let details = stored.details();
        assert_eq!(
            details["correlation-id"],
            outcome.correlation_id.to_string()
        );
        assert!(details["submitted-at"].is_string());
        assert!(details["timeout-at"].is_string());
    }

    #[tokio::test]
    async fn missing_timeout_is_validation_error() {
        let store = Arc::new(InMemoryRequestStore::new());
        let bus = Arc::new(InMemoryBus::new());

        let result = use_case(store, bus).execute(command(None)).await;
        assert!(matches!(result, Err(ApplicationError::Validation(_))));
    }

    #[tokio::test]
    async fn negative_timeout_is_rejected() {
        let store = Arc::new(InMemoryRequestStore::new());
        let bus = Arc::new(InMemoryBus::new());

        let result = use_case(store, bus).execute(command(Some(-5))).await;
        assert!(matches!(
            result,
            Err(ApplicationError::Domain(DomainError::InvalidTimeout(_)))
        ));
    }

    #[tokio::test]
    async fn overflowing_timeout_is_a_validation_error() {
        let store = Arc::new(InMemoryRequestStore::new());
        let bus = Arc::new(InMemoryBus::new());

        let result = use_case(store, bus)
            .execute(command(Some(i64::MAX)))
            .await;
        assert!(matches!(
            result,
            Err(ApplicationError::Domain(DomainError::InvalidTimeout(_)))
        ));
    }

    #[tokio::test]
    async fn zero_timeout_is_accepted() {
        let store = Arc::new(InMemoryRequestStore::new());
        let bus = Arc::new(InMemoryBus::new());

        let outcome = use_case(store, bus).execute(command(Some(0))).await.unwrap();
        assert_eq!(outcome.status, RfqStatus::Running);
    }

    #[derive(Debug)]
    struct FailingStore;

    #[async_trait]
    impl RequestStore for FailingStore {
        async fn put(&self, _request: &RfqRequest) -> StoreResult<()> {
            Err(StoreError::query("table is on fire"))
        }

        async fn get(
            &self,
            _customer_id: &CustomerId,
            _correlation_id: CorrelationId,
        ) -> StoreResult<Option<RfqRequest>> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn persist_failure_aborts_before_broadcast() {
        let bus = Arc::new(InMemoryBus::new());
        let mut topic = bus.subscribe();

        let use_case =
            SubmitRfqUseCase::new(Arc::new(FailingStore), bus, BusConfig::default());
        let result = use_case.execute(command(Some(60))).await;

        assert!(matches!(result, Err(ApplicationError::Store(_))));
        assert!(topic.try_recv().is_err());
    }

    #[derive(Debug)]
    struct FailingBroadcaster;

    #[async_trait]
    impl RequestBroadcaster for FailingBroadcaster {
        async fn broadcast(
            &self,
            _payload: &serde_json::Value,
            _attributes: &HashMap<String, String>,
        ) -> BusResult<()> {
            Err(BusError::Publish("topic unreachable".to_string()))
        }
    }

    #[tokio::test]
    async fn broadcast_failure_keeps_persisted_record() {
        let store = Arc::new(InMemoryRequestStore::new());

        let use_case = SubmitRfqUseCase::new(
            store.clone(),
            Arc::new(FailingBroadcaster),
            BusConfig::default(),
        );
        let outcome = use_case.execute(command(Some(60))).await.unwrap();

        let stored = store
            .get(&outcome.customer_id, outcome.correlation_id)
            .await
            .unwrap();
        assert!(stored.is_some());
    }
}

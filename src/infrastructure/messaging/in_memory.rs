//! # In-Memory Bus
//!
//! Channel-backed implementation of both bus ports.
//!
//! The broadcast topic is a `tokio::sync::broadcast` channel; return
//! addresses are named unbounded mpsc queues registered on demand. Records
//! travel in the direct broadcast envelope shape, so consumers exercise the
//! same [`InboundMessage::parse`](super::envelope::InboundMessage::parse)
//! path they would against a real bus.

use crate::infrastructure::messaging::envelope::broadcast_record;
use crate::infrastructure::messaging::traits::{
    BusError, BusResult, ReplySender, RequestBroadcaster,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast, mpsc};

const BROADCAST_CAPACITY: usize = 256;

/// In-memory message bus for tests and the single-process demo.
#[derive(Debug, Clone)]
pub struct InMemoryBus {
    topic: broadcast::Sender<serde_json::Value>,
    queues: Arc<RwLock<HashMap<String, mpsc::UnboundedSender<serde_json::Value>>>>,
}

impl InMemoryBus {
    /// Creates a bus with no subscribers and no queues.
    #[must_use]
    pub fn new() -> Self {
        let (topic, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            topic,
            queues: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Subscribes to the broadcast topic.
    ///
    /// Each subscriber receives every record published after it subscribed.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<serde_json::Value> {
        self.topic.subscribe()
    }

    /// Declares a named reply queue and returns its consuming end.
    ///
    /// Re-declaring a name replaces the previous queue.
    pub async fn declare_queue(&self, name: &str) -> mpsc::UnboundedReceiver<serde_json::Value> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut queues = self.queues.write().await;
        queues.insert(name.to_string(), tx);
        rx
    }

    /// Returns the number of declared reply queues.
    pub async fn queue_count(&self) -> usize {
        self.queues.read().await.len()
    }
}

impl Default for InMemoryBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RequestBroadcaster for InMemoryBus {
    async fn broadcast(
        &self,
        payload: &serde_json::Value,
        attributes: &HashMap<String, String>,
    ) -> BusResult<()> {
        // A topic with zero subscribers is not an error; the broadcast is
        // fire-and-forget either way.
        let _ = self.topic.send(broadcast_record(payload, attributes));
        Ok(())
    }
}

#[async_trait]
impl ReplySender for InMemoryBus {
    async fn send(
        &self,
        return_address: &str,
        payload: &serde_json::Value,
        attributes: &HashMap<String, String>,
    ) -> BusResult<()> {
        let queues = self.queues.read().await;
        let queue = queues
            .get(return_address)
            .ok_or_else(|| BusError::UnknownAddress(return_address.to_string()))?;
        queue
            .send(broadcast_record(payload, attributes))
            .map_err(|e| BusError::Send(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::infrastructure::messaging::envelope::InboundMessage;
    use tokio_test::assert_ok;

    fn attrs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[tokio::test]
    async fn broadcast_reaches_every_subscriber() {
        let bus = InMemoryBus::new();
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        bus.broadcast(
            &serde_json::json!({"from-location": "A"}),
            &attrs(&[("correlation-id", "c-1")]),
        )
        .await
        .unwrap();

        for rx in [&mut first, &mut second] {
            let record = rx.recv().await.unwrap();
            let msg = InboundMessage::parse(&record).unwrap();
            assert_eq!(msg.attribute("correlation-id").unwrap(), "c-1");
        }
    }

    #[tokio::test]
    async fn broadcast_without_subscribers_succeeds() {
        let bus = InMemoryBus::new();
        tokio_test::assert_ok!(
            bus.broadcast(&serde_json::json!({}), &HashMap::new())
                .await
        );
    }

    #[tokio::test]
    async fn reply_lands_on_named_queue_only() {
        let bus = InMemoryBus::new();
        let mut replies = bus.declare_queue("rfq-replies-1").await;
        let mut other = bus.declare_queue("rfq-replies-2").await;
        assert_eq!(bus.queue_count().await, 2);

        bus.send(
            "rfq-replies-1",
            &serde_json::json!({"price": 2.95}),
            &attrs(&[("bidder-id", "U1")]),
        )
        .await
        .unwrap();

        let record = replies.recv().await.unwrap();
        let msg = InboundMessage::parse(&record).unwrap();
        assert_eq!(msg.attribute("bidder-id").unwrap(), "U1");

        assert!(other.try_recv().is_err());
    }

    #[tokio::test]
    async fn unknown_address_is_an_error() {
        let bus = InMemoryBus::new();
        let result = bus
            .send("nowhere", &serde_json::json!({}), &HashMap::new())
            .await;
        assert!(matches!(result, Err(BusError::UnknownAddress(_))));
    }
}

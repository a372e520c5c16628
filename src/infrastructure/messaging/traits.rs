//! # Message Bus Traits
//!
//! Port definitions for the message bus.
//!
//! Two ports cover the engine's messaging needs: [`RequestBroadcaster`] for
//! the fan-out topic a submission goes to every bidder on, and [`ReplySender`]
//! for the point-to-point return channel a bidder answers on. Both carry a
//! JSON payload plus flat string routing attributes; attribute key names come
//! from configuration, never from constants.

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

/// Error type for bus operations.
#[derive(Debug, Error)]
pub enum BusError {
    /// Publishing to the broadcast topic failed.
    #[error("broadcast publish failed: {0}")]
    Publish(String),

    /// Sending to a return address failed.
    #[error("reply send failed: {0}")]
    Send(String),

    /// The return address names no known channel.
    #[error("unknown return address: {0}")]
    UnknownAddress(String),
}

/// Result alias for bus operations.
pub type BusResult<T> = Result<T, BusError>;

/// Fan-out publisher for RFQ requests.
///
/// Broadcast is fire-and-forget: the publisher never waits for any bidder to
/// acknowledge, and the number of bidders listening is unbounded and unknown.
#[async_trait]
pub trait RequestBroadcaster: Send + Sync + std::fmt::Debug {
    /// Publishes a payload with routing attributes to every subscriber.
    ///
    /// # Errors
    ///
    /// Returns a [`BusError`] if the publish itself fails. Submission logs
    /// this and keeps the already-persisted request record.
    async fn broadcast(
        &self,
        payload: &serde_json::Value,
        attributes: &HashMap<String, String>,
    ) -> BusResult<()>;
}

/// Point-to-point sender for bidder replies.
#[async_trait]
pub trait ReplySender: Send + Sync + std::fmt::Debug {
    /// Sends a payload with routing attributes to the named return address.
    ///
    /// # Errors
    ///
    /// Returns a [`BusError`] if the address is unknown or the send fails.
    async fn send(
        &self,
        return_address: &str,
        payload: &serde_json::Value,
        attributes: &HashMap<String, String>,
    ) -> BusResult<()>;
}

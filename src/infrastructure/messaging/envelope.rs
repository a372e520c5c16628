//! # Message Envelope Normalization
//!
//! A single inbound-message type for both delivery shapes.
//!
//! Consumers receive either a direct broadcast record (`message` +
//! `attributes`) or a relayed version of the same record wrapped by an
//! intermediate buffering queue (`body` holding the stringified broadcast
//! record — topic-queue chaining). [`InboundMessage::parse`] recognizes both
//! shapes and extracts payload plus routing metadata uniformly, so the
//! branching never leaks into business logic.
//!
//! # Examples
//!
//! ```
//! use ride_rfq::infrastructure::messaging::envelope::InboundMessage;
//!
//! let direct = serde_json::json!({
//!     "message": {"from-location": "A", "to-location": "B"},
//!     "attributes": {"correlation-id": "abc"}
//! });
//!
//! let msg = InboundMessage::parse(&direct).unwrap();
//! assert_eq!(msg.attribute("correlation-id").unwrap(), "abc");
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

/// Error type for envelope parsing and attribute extraction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// The record matches neither envelope shape.
    #[error("malformed envelope: {0}")]
    Malformed(String),

    /// A required routing attribute is absent.
    #[error("missing routing attribute: {0}")]
    MissingAttribute(String),
}

/// The two envelope shapes a record can arrive in.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Envelope {
    /// Direct reception from the broadcast topic.
    Broadcast {
        message: serde_json::Value,
        #[serde(default)]
        attributes: HashMap<String, String>,
    },
    /// Indirect reception via a buffering queue: the queue body carries the
    /// stringified broadcast record.
    Queued { body: String },
}

/// A normalized inbound message: opaque payload plus routing metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    payload: serde_json::Value,
    attributes: HashMap<String, String>,
}

impl InboundMessage {
    /// Builds an inbound message from already-separated parts.
    #[must_use]
    pub fn new(payload: serde_json::Value, attributes: HashMap<String, String>) -> Self {
        Self {
            payload,
            attributes,
        }
    }

    /// Parses a raw record in either envelope shape.
    ///
    /// A queued record is unwrapped exactly one level: its body must itself
    /// be a direct broadcast record.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::Malformed`] if the record matches neither
    /// shape or a queued body is not valid JSON.
    pub fn parse(record: &serde_json::Value) -> Result<Self, EnvelopeError> {
        let envelope: Envelope = serde_json::from_value(record.clone())
            .map_err(|e| EnvelopeError::Malformed(e.to_string()))?;

        match envelope {
            Envelope::Broadcast {
                message,
                attributes,
            } => Ok(Self {
                payload: message,
                attributes,
            }),
            Envelope::Queued { body } => {
                let inner: Envelope = serde_json::from_str(&body)
                    .map_err(|e| EnvelopeError::Malformed(format!("queued body: {e}")))?;
                match inner {
                    Envelope::Broadcast {
                        message,
                        attributes,
                    } => Ok(Self {
                        payload: message,
                        attributes,
                    }),
                    Envelope::Queued { .. } => Err(EnvelopeError::Malformed(
                        "queued body wraps another queued record".to_string(),
                    )),
                }
            }
        }
    }

    /// Returns the opaque message payload.
    #[must_use]
    pub fn payload(&self) -> &serde_json::Value {
        &self.payload
    }

    /// Returns all routing attributes.
    #[must_use]
    pub fn attributes(&self) -> &HashMap<String, String> {
        &self.attributes
    }

    /// Returns the routing attribute under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::MissingAttribute`] if the key is absent.
    pub fn attribute(&self, key: &str) -> Result<&str, EnvelopeError> {
        self.attributes
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| EnvelopeError::MissingAttribute(key.to_string()))
    }
}

/// Serializes payload and attributes into the direct broadcast shape.
#[must_use]
pub fn broadcast_record(
    payload: &serde_json::Value,
    attributes: &HashMap<String, String>,
) -> serde_json::Value {
    serde_json::json!({
        "message": payload,
        "attributes": attributes,
    })
}

//! # RFQ Response Entity
//!
//! One stored quote per bidder per request.
//!
//! An [`RfqResponse`] occupies the single slot keyed by
//! `(correlation_id, bidder_id)`. A second reply from the same bidder for the
//! same correlation overwrites the first: last write wins, which is what makes
//! at-least-once redelivery of bidder replies safe.

use crate::domain::value_objects::{BidderId, CorrelationId, Perk, Price, Timestamp};
use serde::{Deserialize, Serialize};

/// A bidder's quote for one request, as persisted.
///
/// Carries the parsed price and perks next to the opaque reply payload so the
/// result query can round-trip exactly what the bidder sent. `received_at`
/// records arrival time; late arrivals (after the request deadline) are
/// stored like any other and the read path decides what to do with them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RfqResponse {
    correlation_id: CorrelationId,
    bidder_id: BidderId,
    price: Price,
    perks: Vec<Perk>,
    received_at: Timestamp,
    payload: serde_json::Value,
}

impl RfqResponse {
    /// Creates a response record.
    #[must_use]
    pub fn new(
        correlation_id: CorrelationId,
        bidder_id: BidderId,
        price: Price,
        perks: Vec<Perk>,
        received_at: Timestamp,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            correlation_id,
            bidder_id,
            price,
            perks,
            received_at,
            payload,
        }
    }

    /// Returns the correlation identifier this quote answers.
    #[must_use]
    pub fn correlation_id(&self) -> CorrelationId {
        self.correlation_id
    }

    /// Returns the bidder that sent this quote.
    #[must_use]
    pub fn bidder_id(&self) -> &BidderId {
        &self.bidder_id
    }

    /// Returns the quoted price.
    #[must_use]
    pub fn price(&self) -> Price {
        self.price
    }

    /// Returns the perks attached to the quote.
    #[must_use]
    pub fn perks(&self) -> &[Perk] {
        &self.perks
    }

    /// Returns when the reply arrived at the collector.
    #[must_use]
    pub fn received_at(&self) -> Timestamp {
        self.received_at
    }

    /// Returns the opaque reply payload as the bidder sent it.
    #[must_use]
    pub fn payload(&self) -> &serde_json::Value {
        &self.payload
    }
}

//! # Quote Worker Use Case
//!
//! One bidder instance: consume a broadcast request, compute a bid, reply.
//!
//! Any number of workers run concurrently with no shared state; each owns a
//! stable [`BidderId`] assigned at construction. Bid computation is a pure
//! function behind the [`BidComputer`] trait so pricing stays unit-testable
//! without any message I/O, and the worker itself is only the thin transport
//! adapter around it.
//!
//! A worker may reply twice for the same broadcast under at-least-once
//! redelivery; the collector's last-write-wins upsert absorbs that.

use crate::config::BusConfig;
use crate::domain::value_objects::{BidderId, Perk, Price};
use crate::infrastructure::messaging::envelope::InboundMessage;
use crate::infrastructure::messaging::traits::ReplySender;
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

/// Ride details a bidder quotes on, parsed from the broadcast payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RideDetails {
    /// Requester identity, echoed back in the reply payload.
    #[serde(rename = "customer-id")]
    pub customer_id: String,
    /// Ride start location.
    #[serde(rename = "from-location", default)]
    pub from_location: Option<String>,
    /// Ride end location.
    #[serde(rename = "to-location", default)]
    pub to_location: Option<String>,
}

/// A computed bid: the price plus attached perks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bid {
    /// Quoted price.
    pub price: Price,
    /// Perks attached to the quote.
    pub perks: Vec<Perk>,
}

/// The reply payload a bidder sends to the return address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotePayload {
    /// Bidder identity.
    #[serde(rename = "bidder-id")]
    pub bidder_id: String,
    /// Requester identity echoed from the request.
    #[serde(rename = "customer-id")]
    pub customer_id: String,
    /// Quoted price.
    pub price: Price,
    /// Perks attached to the quote.
    pub perks: Vec<Perk>,
}

/// Pure bid computation, pluggable per deployment.
pub trait BidComputer: Send + Sync + std::fmt::Debug {
    /// Computes a bid for the given ride.
    fn compute(&self, ride: &RideDetails, bidder: &BidderId) -> Bid;
}

/// Quotes the same flat price and perks for every ride.
#[derive(Debug, Clone)]
pub struct FlatRateQuoter {
    price: Price,
    perks: Vec<Perk>,
}

impl FlatRateQuoter {
    /// Creates a flat-rate quoter.
    #[must_use]
    pub fn new(price: Price, perks: Vec<Perk>) -> Self {
        Self { price, perks }
    }
}

impl Default for FlatRateQuoter {
    fn default() -> Self {
        Self {
            price: Price::from_decimal(Decimal::new(295, 2)).unwrap_or(Price::ZERO),
            perks: vec![Perk::FreeDrinksNonAlc, Perk::FreeDrinksAlc],
        }
    }
}

impl BidComputer for FlatRateQuoter {
    fn compute(&self, _ride: &RideDetails, _bidder: &BidderId) -> Bid {
        Bid {
            price: self.price,
            perks: self.perks.clone(),
        }
    }
}

/// Quotes a random price within [base, base + spread), cents granularity.
///
/// Used by the demo binary so concurrent bidders return distinct prices.
#[derive(Debug, Clone)]
pub struct RandomSpreadQuoter {
    base_cents: i64,
    spread_cents: i64,
    perks: Vec<Perk>,
}

impl RandomSpreadQuoter {
    /// Creates a random-spread quoter.
    #[must_use]
    pub fn new(base_cents: i64, spread_cents: i64, perks: Vec<Perk>) -> Self {
        Self {
            base_cents,
            spread_cents: spread_cents.max(1),
            perks,
        }
    }
}

impl BidComputer for RandomSpreadQuoter {
    fn compute(&self, _ride: &RideDetails, _bidder: &BidderId) -> Bid {
        let cents = self.base_cents + rand::rng().random_range(0..self.spread_cents);
        let price = Price::from_decimal(Decimal::new(cents, 2)).unwrap_or(Price::ZERO);
        Bid {
            price,
            perks: self.perks.clone(),
        }
    }
}

/// Outcome of handling one broadcast record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerOutcome {
    /// A reply was sent to the return address.
    Replied,
    /// The record was skipped (malformed, or the reply channel failed).
    Skipped,
}

/// A single bidder instance.
#[derive(Debug)]
pub struct QuoteWorker {
    bidder_id: BidderId,
    computer: Arc<dyn BidComputer>,
    reply_sender: Arc<dyn ReplySender>,
    bus_config: BusConfig,
}

impl QuoteWorker {
    /// Creates a worker with a stable bidder identity.
    #[must_use]
    pub fn new(
        bidder_id: BidderId,
        computer: Arc<dyn BidComputer>,
        reply_sender: Arc<dyn ReplySender>,
        bus_config: BusConfig,
    ) -> Self {
        Self {
            bidder_id,
            computer,
            reply_sender,
            bus_config,
        }
    }

    /// Returns this worker's bidder identity.
    #[must_use]
    pub fn bidder_id(&self) -> &BidderId {
        &self.bidder_id
    }

    /// Consumes broadcast records until the topic closes.
    ///
    /// A receiver that falls behind the topic's buffer loses the overrun
    /// records but keeps consuming; only a closed topic ends the loop. The
    /// requests lost to an overrun simply collect one bid fewer.
    pub async fn run(self, mut topic: broadcast::Receiver<serde_json::Value>) {
        loop {
            match topic.recv().await {
                Ok(record) => {
                    self.handle_record(&record).await;
                }
                Err(RecvError::Lagged(missed)) => {
                    warn!(bidder = %self.bidder_id, missed, "dropped broadcasts while lagging");
                }
                Err(RecvError::Closed) => break,
            }
        }
    }

    /// Handles one raw broadcast record.
    ///
    /// Malformed records are skipped without retry: malformed input is not
    /// transient, and redelivering it would fail the same way.
    pub async fn handle_record(&self, record: &serde_json::Value) -> WorkerOutcome {
        let message = match InboundMessage::parse(record) {
            Ok(message) => message,
            Err(e) => {
                warn!(bidder = %self.bidder_id, error = %e, "skipping malformed broadcast record");
                return WorkerOutcome::Skipped;
            }
        };

        let correlation_id = match message.attribute(&self.bus_config.correlation_id_key) {
            Ok(value) => value.to_string(),
            Err(e) => {
                warn!(bidder = %self.bidder_id, error = %e, "skipping broadcast without correlation id");
                return WorkerOutcome::Skipped;
            }
        };
        let return_address = match message.attribute(&self.bus_config.return_address_key) {
            Ok(value) => value.to_string(),
            Err(e) => {
                warn!(bidder = %self.bidder_id, error = %e, "skipping broadcast without return address");
                return WorkerOutcome::Skipped;
            }
        };

        let ride: RideDetails = match serde_json::from_value(message.payload().clone()) {
            Ok(ride) => ride,
            Err(e) => {
                warn!(bidder = %self.bidder_id, error = %e, "skipping broadcast with malformed ride details");
                return WorkerOutcome::Skipped;
            }
        };

        let bid = self.computer.compute(&ride, &self.bidder_id);
        debug!(bidder = %self.bidder_id, correlation = %correlation_id, price = %bid.price, "computed bid");

        let payload = QuotePayload {
            bidder_id: self.bidder_id.to_string(),
            customer_id: ride.customer_id,
            price: bid.price,
            perks: bid.perks,
        };
        let payload_value = match serde_json::to_value(&payload) {
            Ok(value) => value,
            Err(e) => {
                warn!(bidder = %self.bidder_id, error = %e, "could not encode reply payload");
                return WorkerOutcome::Skipped;
            }
        };

        let mut attributes = HashMap::new();
        attributes.insert(self.bus_config.correlation_id_key.clone(), correlation_id);
        attributes.insert(
            self.bus_config.bidder_id_key.clone(),
            self.bidder_id.to_string(),
        );

        match self
            .reply_sender
            .send(&return_address, &payload_value, &attributes)
            .await
        {
            Ok(()) => WorkerOutcome::Replied,
            Err(e) => {
                warn!(bidder = %self.bidder_id, error = %e, "reply send failed; dropping bid");
                WorkerOutcome::Skipped
            }
        }
    }
}

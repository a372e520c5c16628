//! # RFQ Request Entity
//!
//! The request record created once per submission.
//!
//! This module provides [`RfqRequest`], the immutable record of a submitted
//! ride request, and [`RfqStatus`], the status derived from its deadline.
//!
//! # Lifecycle
//!
//! An [`RfqRequest`] is created exactly once by the submission handler and is
//! never mutated or deleted by this engine. The `deadline` is computed at
//! creation from `submitted_at + timeout_secs` and stored redundantly; every
//! later status derivation is a pure function of `(deadline, now)`.
//!
//! # Examples
//!
//! ```
//! use ride_rfq::domain::entities::rfq_request::{RfqRequest, RfqStatus};
//! use ride_rfq::domain::value_objects::{CorrelationId, CustomerId, Timestamp};
//!
//! let submitted = Timestamp::now();
//! let request = RfqRequest::new(
//!     CustomerId::new("customer-1"),
//!     CorrelationId::new_v4(),
//!     "Liberty Island",
//!     "Central Park",
//!     submitted,
//!     300,
//!     serde_json::json!({}),
//! ).unwrap();
//!
//! assert_eq!(request.deadline(), submitted.add_secs(300));
//! assert_eq!(request.status_at(submitted), RfqStatus::Running);
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{CorrelationId, CustomerId, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of the bidding window, derived lazily at read time.
///
/// No timer fires when a window closes; whichever component reads the record
/// compares the stored deadline against the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RfqStatus {
    /// The bidding window is still open; quotes are not exposed yet.
    Running,
    /// The deadline has passed; the collected quote set is final.
    Done,
}

impl fmt::Display for RfqStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Done => write!(f, "done"),
        }
    }
}

/// The immutable record of a submitted ride request.
///
/// Identity is `(customer_id, correlation_id)`. The raw submission payload is
/// carried along opaquely so the result query can round-trip it back to the
/// requester untouched.
///
/// # Invariants
///
/// - `deadline == submitted_at + timeout_secs`, computed once at creation
/// - `timeout_secs >= 0` (a zero-length window is legal and closes at once)
/// - Locations and customer id are non-empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RfqRequest {
    customer_id: CustomerId,
    correlation_id: CorrelationId,
    from_location: String,
    to_location: String,
    submitted_at: Timestamp,
    timeout_secs: i64,
    deadline: Timestamp,
    details: serde_json::Value,
}

impl RfqRequest {
    /// Creates a new request record, computing the deadline.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if the customer id or either location is
    /// empty, if `timeout_secs` is negative, or if it is so large the
    /// deadline falls outside the representable time range.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        customer_id: CustomerId,
        correlation_id: CorrelationId,
        from_location: impl Into<String>,
        to_location: impl Into<String>,
        submitted_at: Timestamp,
        timeout_secs: i64,
        details: serde_json::Value,
    ) -> DomainResult<Self> {
        let from_location = from_location.into();
        let to_location = to_location.into();

        if customer_id.is_empty() {
            return Err(DomainError::MissingField("customer-id"));
        }
        if from_location.is_empty() {
            return Err(DomainError::MissingField("from-location"));
        }
        if to_location.is_empty() {
            return Err(DomainError::MissingField("to-location"));
        }
        if timeout_secs < 0 {
            return Err(DomainError::InvalidTimeout(format!(
                "timeout-in-secs must not be negative, got {timeout_secs}"
            )));
        }

        let deadline = submitted_at.checked_add_secs(timeout_secs).ok_or_else(|| {
            DomainError::InvalidTimeout(format!(
                "timeout-in-secs {timeout_secs} puts the deadline out of range"
            ))
        })?;

        Ok(Self {
            customer_id,
            correlation_id,
            from_location,
            to_location,
            submitted_at,
            timeout_secs,
            deadline,
            details,
        })
    }

    /// Returns the customer identifier.
    #[must_use]
    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    /// Returns the correlation identifier.
    #[must_use]
    pub fn correlation_id(&self) -> CorrelationId {
        self.correlation_id
    }

    /// Returns the ride start location.
    #[must_use]
    pub fn from_location(&self) -> &str {
        &self.from_location
    }

    /// Returns the ride end location.
    #[must_use]
    pub fn to_location(&self) -> &str {
        &self.to_location
    }

    /// Returns when the request was submitted.
    #[must_use]
    pub fn submitted_at(&self) -> Timestamp {
        self.submitted_at
    }

    /// Returns the bidding-window length in seconds.
    #[must_use]
    pub fn timeout_secs(&self) -> i64 {
        self.timeout_secs
    }

    /// Returns the fixed point in time when the bidding window closes.
    #[must_use]
    pub fn deadline(&self) -> Timestamp {
        self.deadline
    }

    /// Returns the opaque original submission payload.
    #[must_use]
    pub fn details(&self) -> &serde_json::Value {
        &self.details
    }

    /// Derives the window status at the given instant.
    ///
    /// Pure function of `(deadline, now)`: the window is `Done` strictly
    /// after the deadline, `Running` at or before it.
    #[must_use]
    pub fn status_at(&self, now: Timestamp) -> RfqStatus {
        if now.is_after(&self.deadline) {
            RfqStatus::Done
        } else {
            RfqStatus::Running
        }
    }

    /// Returns true if the bidding window is closed at the given instant.
    #[must_use]
    pub fn is_done_at(&self, now: Timestamp) -> bool {
        self.status_at(now) == RfqStatus::Done
    }
}

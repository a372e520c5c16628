//! # Identity Value Objects
//!
//! Type-safe identity wrappers for domain identifiers.
//!
//! This module provides newtype wrappers for all domain identifiers,
//! ensuring type safety and preventing accidental mixing of different ID types.
//!
//! ## UUID-based Identifiers
//!
//! - [`CorrelationId`] - Token binding a request to all of its responses
//!
//! ## String-based Identifiers
//!
//! - [`CustomerId`] - Requester (customer) identifier
//! - [`BidderId`] - Bidder (unicorn) identifier, stable per worker instance

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Correlation identifier.
///
/// A 128-bit random token generated at submission time, binding an RFQ
/// request to every response that eventually arrives for it. Collision
/// probability is negligible, so submission never checks for existence.
///
/// # Examples
///
/// ```
/// use ride_rfq::domain::value_objects::ids::CorrelationId;
///
/// let id = CorrelationId::new_v4();
/// println!("correlation: {id}");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(Uuid);

impl CorrelationId {
    /// Creates a correlation ID from an existing UUID.
    #[inline]
    #[must_use]
    pub const fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generates a fresh random correlation ID using UUID v4.
    #[must_use]
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> Uuid {
        self.0
    }

    /// Parses a correlation ID from its string form.
    ///
    /// # Errors
    ///
    /// Returns a [`uuid::Error`] if the input is not a valid UUID.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl From<Uuid> for CorrelationId {
    #[inline]
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Customer identifier.
///
/// A string-based identifier for the requester submitting an RFQ. Together
/// with a [`CorrelationId`] it forms the identity of a request record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(String);

impl CustomerId {
    /// Creates a new customer ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the identifier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CustomerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Bidder identifier.
///
/// A string-based identifier for a bidder instance. Assigned once at worker
/// startup and stable for the worker's lifetime: the response table uses it
/// as the sort key, so one slot exists per bidder per correlation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BidderId(String);

impl BidderId {
    /// Creates a new bidder ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a random bidder ID for workers with no assigned identity.
    #[must_use]
    pub fn random() -> Self {
        Self(format!("bidder-{}", Uuid::new_v4()))
    }

    /// Returns the identifier as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the identifier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for BidderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for BidderId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod correlation_id {
        use super::*;

        #[test]
        fn new_v4_is_unique() {
            let a = CorrelationId::new_v4();
            let b = CorrelationId::new_v4();
            assert_ne!(a, b);
        }

        #[test]
        fn parse_roundtrip() {
            let id = CorrelationId::new_v4();
            let parsed = CorrelationId::parse(&id.to_string()).unwrap();
            assert_eq!(id, parsed);
        }

        #[test]
        fn parse_rejects_garbage() {
            assert!(CorrelationId::parse("not-a-uuid").is_err());
        }

        #[test]
        fn serde_transparent() {
            let id = CorrelationId::new_v4();
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{id}\""));
        }
    }

    mod string_ids {
        use super::*;

        #[test]
        fn customer_id_display() {
            let id = CustomerId::new("customer-1");
            assert_eq!(id.to_string(), "customer-1");
            assert_eq!(id.as_str(), "customer-1");
        }

        #[test]
        fn empty_customer_id() {
            assert!(CustomerId::new("").is_empty());
            assert!(!CustomerId::new("x").is_empty());
        }

        #[test]
        fn bidder_id_random_is_unique() {
            let a = BidderId::random();
            let b = BidderId::random();
            assert_ne!(a, b);
            assert!(a.as_str().starts_with("bidder-"));
        }

        #[test]
        fn bidder_id_from_str() {
            let id: BidderId = "U1".into();
            assert_eq!(id.as_str(), "U1");
        }
    }
}

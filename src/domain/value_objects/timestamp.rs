//! # Timestamp Value Object
//!
//! DateTime wrapper with domain-specific methods.
//!
//! This module provides the [`Timestamp`] type used for submission times and
//! bidding-window deadlines. Deadlines are plain data: no timer ever fires,
//! every status derivation compares a stored deadline against `now`.
//!
//! # Examples
//!
//! ```
//! use ride_rfq::domain::value_objects::timestamp::Timestamp;
//!
//! let submitted = Timestamp::now();
//! let deadline = submitted.add_secs(300);
//!
//! assert!(deadline.is_after(&submitted));
//! ```

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;

/// A UTC timestamp.
///
/// Wraps `chrono::DateTime<Utc>` with the handful of operations the RFQ
/// lifecycle needs: capture, deadline arithmetic, comparison, and ISO 8601
/// round-tripping.
///
/// # Invariants
///
/// - Always in UTC timezone
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from Unix seconds.
    ///
    /// Returns `None` if the value is out of range.
    #[must_use]
    pub fn from_secs(secs: i64) -> Option<Self> {
        Utc.timestamp_opt(secs, 0).single().map(Self)
    }

    /// Parses a timestamp from an ISO 8601 / RFC 3339 string.
    ///
    /// # Errors
    ///
    /// Returns a [`chrono::ParseError`] if the input is not valid RFC 3339.
    pub fn parse_iso8601(s: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_rfc3339(s).map(|dt| Self(dt.with_timezone(&Utc)))
    }

    /// Returns the Unix timestamp in seconds.
    #[inline]
    #[must_use]
    pub fn timestamp_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Adds seconds to the timestamp.
    ///
    /// # Examples
    ///
    /// ```
    /// use ride_rfq::domain::value_objects::timestamp::Timestamp;
    ///
    /// let ts = Timestamp::from_secs(1000).unwrap();
    /// assert_eq!(ts.add_secs(60).timestamp_secs(), 1060);
    /// ```
    #[must_use]
    pub fn add_secs(&self, secs: i64) -> Self {
        Self(self.0 + Duration::seconds(secs))
    }

    /// Adds seconds to the timestamp, returning `None` when the offset or
    /// the resulting instant is out of chrono's range.
    ///
    /// Deadline computation goes through this so an absurd
    /// `timeout-in-secs` surfaces as a validation error instead of a panic.
    #[must_use]
    pub fn checked_add_secs(&self, secs: i64) -> Option<Self> {
        Duration::try_seconds(secs)
            .and_then(|delta| self.0.checked_add_signed(delta))
            .map(Self)
    }

    /// Returns true if this timestamp is before another.
    #[inline]
    #[must_use]
    pub fn is_before(&self, other: &Self) -> bool {
        self.0 < other.0
    }

    /// Returns true if this timestamp is after another.
    #[inline]
    #[must_use]
    pub fn is_after(&self, other: &Self) -> bool {
        self.0 > other.0
    }

    /// Formats the timestamp as ISO 8601 / RFC 3339.
    #[must_use]
    pub fn to_iso8601(&self) -> String {
        self.0.to_rfc3339()
    }

    /// Returns the underlying DateTime.
    #[inline]
    #[must_use]
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

impl Sub<Timestamp> for Timestamp {
    type Output = std::time::Duration;

    fn sub(self, rhs: Timestamp) -> Self::Output {
        (self.0 - rhs.0)
            .to_std()
            .unwrap_or(std::time::Duration::ZERO)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod construction {
        use super::*;

        #[test]
        fn now_creates_current_time() {
            let before = Utc::now();
            let ts = Timestamp::now();
            let after = Utc::now();

            assert!(*ts.as_datetime() >= before);
            assert!(*ts.as_datetime() <= after);
        }

        #[test]
        fn from_secs_works() {
            let ts = Timestamp::from_secs(1704067200).unwrap();
            assert_eq!(ts.timestamp_secs(), 1704067200);
        }

        #[test]
        fn parse_iso8601_roundtrip() {
            let ts = Timestamp::from_secs(1704067200).unwrap();
            let parsed = Timestamp::parse_iso8601(&ts.to_iso8601()).unwrap();
            assert_eq!(ts, parsed);
        }

        #[test]
        fn parse_iso8601_rejects_garbage() {
            assert!(Timestamp::parse_iso8601("yesterday").is_err());
        }
    }

    mod arithmetic {
        use super::*;

        #[test]
        fn add_secs_works() {
            let ts = Timestamp::from_secs(1000).unwrap();
            assert_eq!(ts.add_secs(60).timestamp_secs(), 1060);
        }

        #[test]
        fn add_zero_secs_is_identity() {
            let ts = Timestamp::from_secs(1000).unwrap();
            assert_eq!(ts.add_secs(0), ts);
        }

        #[test]
        fn timestamp_difference() {
            let ts1 = Timestamp::from_secs(1000).unwrap();
            let ts2 = Timestamp::from_secs(1060).unwrap();
            assert_eq!((ts2 - ts1).as_secs(), 60);
        }

        #[test]
        fn checked_add_secs_matches_add_secs_in_range() {
            let ts = Timestamp::from_secs(1000).unwrap();
            assert_eq!(ts.checked_add_secs(60), Some(ts.add_secs(60)));
        }

        #[test]
        fn checked_add_secs_rejects_out_of_range_offsets() {
            let ts = Timestamp::from_secs(1000).unwrap();
            assert_eq!(ts.checked_add_secs(i64::MAX), None);
            assert_eq!(ts.checked_add_secs(i64::MIN), None);
        }
    }

    mod comparison {
        use super::*;

        #[test]
        fn is_before_and_after() {
            let ts1 = Timestamp::from_secs(1000).unwrap();
            let ts2 = Timestamp::from_secs(2000).unwrap();
            assert!(ts1.is_before(&ts2));
            assert!(ts2.is_after(&ts1));
            assert!(!ts1.is_after(&ts2));
        }

        #[test]
        fn ordering() {
            let ts1 = Timestamp::from_secs(1000).unwrap();
            let ts2 = Timestamp::from_secs(2000).unwrap();
            assert!(ts1 < ts2);
        }
    }

    mod serde {
        use super::*;

        #[test]
        fn serde_roundtrip() {
            let ts = Timestamp::from_secs(1704067200).unwrap();
            let json = serde_json::to_string(&ts).unwrap();
            let back: Timestamp = serde_json::from_str(&json).unwrap();
            assert_eq!(ts, back);
        }

        #[test]
        fn serializes_as_iso8601_string() {
            let ts = Timestamp::from_secs(1704067200).unwrap();
            let json = serde_json::to_string(&ts).unwrap();
            assert!(json.contains("2024-01-01"));
        }
    }
}

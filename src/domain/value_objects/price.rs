//! # Price Value Object
//!
//! Decimal price with validation.
//!
//! This module provides the [`Price`] type, a type-safe wrapper around
//! [`Decimal`] for representing quoted ride prices.
//!
//! # Examples
//!
//! ```
//! use ride_rfq::domain::value_objects::price::Price;
//!
//! let price = Price::new(2.95).unwrap();
//! assert_eq!(price.to_string(), "2.95");
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated quote price.
///
/// Represents a non-negative decimal price. Bidders quote in an opaque
/// currency unit; the engine only enforces non-negativity.
///
/// # Invariants
///
/// - Price is always >= 0
///
/// # Examples
///
/// ```
/// use ride_rfq::domain::value_objects::price::Price;
///
/// let price = Price::new(100.50).unwrap();
/// assert!(!price.is_zero());
///
/// let invalid = Price::new(-10.0);
/// assert!(invalid.is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// Zero price constant.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new price from an f64 value.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidPrice`] if the value is negative or not
    /// representable as a decimal.
    pub fn new(value: f64) -> DomainResult<Self> {
        let decimal = Decimal::try_from(value)
            .map_err(|_| DomainError::InvalidPrice("not representable as decimal".to_string()))?;
        Self::from_decimal(decimal)
    }

    /// Creates a new price from a Decimal value.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidPrice`] if the value is negative.
    pub fn from_decimal(value: Decimal) -> DomainResult<Self> {
        if value.is_sign_negative() {
            return Err(DomainError::InvalidPrice(
                "price cannot be negative".to_string(),
            ));
        }
        Ok(Self(value))
    }

    /// Returns the inner Decimal value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> Decimal {
        self.0
    }

    /// Returns true if the price is zero.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::from_decimal(value)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`CorrelationId`]: UUID-based token binding a request to its responses
//! - [`CustomerId`], [`BidderId`]: string-based identifiers
//!
//! ## Numeric Types
//!
//! - [`Price`]: non-negative decimal quote price
//!
//! ## Time
//!
//! - [`timestamp::Timestamp`]: UTC timestamp with deadline arithmetic
//!
//! ## Domain Tags
//!
//! - [`Perk`]: enum-like incentive tags attached to quotes

pub mod ids;
pub mod perk;
pub mod price;
pub mod timestamp;

pub use ids::{BidderId, CorrelationId, CustomerId};
pub use perk::Perk;
pub use price::Price;
pub use timestamp::Timestamp;

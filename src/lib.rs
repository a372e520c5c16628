//! # Ride RFQ Engine
//!
//! Scatter/gather Request-for-Quote engine for ride hailing: a customer
//! submits a ride request, the engine fans it out to a pool of independent
//! bidders, gathers their point-to-point quote replies, and answers polls
//! against a deadline fixed at submission time.
//!
//! ## Architecture
//!
//! This crate follows Domain-Driven Design with a layered architecture:
//!
//! - **Domain Layer** (`domain`): Entities and value objects of the RFQ lifecycle
//! - **Application Layer** (`application`): Use cases for submit, quote, collect, and query
//! - **Infrastructure Layer** (`infrastructure`): Store and message-bus ports with in-memory adapters
//! - **API Layer** (`api`): REST interface
//!
//! There are no timers: whether an RFQ is `running` or `done` is derived on
//! every read from the stored deadline and the wall clock.
//!
//! ## Example
//!
//! ```rust,ignore
//! use ride_rfq::application::use_cases::{SubmitRfqCommand, SubmitRfqUseCase};
//!
//! let outcome = SubmitRfqUseCase::new(store, broadcaster, bus_config)
//!     .execute(command)
//!     .await?;
//! println!("poll with {}", outcome.correlation_id);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

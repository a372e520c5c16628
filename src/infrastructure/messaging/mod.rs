//! # Messaging
//!
//! Bus ports, envelope normalization, and the in-memory bus.

pub mod envelope;
pub mod in_memory;
pub mod traits;

pub use envelope::{EnvelopeError, InboundMessage};
pub use in_memory::InMemoryBus;
pub use traits::{BusError, BusResult, ReplySender, RequestBroadcaster};

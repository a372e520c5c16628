//! # Persistence
//!
//! Store ports and implementations for the two RFQ tables.

pub mod in_memory;
pub mod traits;

pub use in_memory::{InMemoryRequestStore, InMemoryResponseStore};
pub use traits::{RequestStore, ResponseStore, StoreError, StoreResult};

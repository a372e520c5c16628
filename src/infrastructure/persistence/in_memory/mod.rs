//! # In-Memory Store Implementations
//!
//! Thread-safe `HashMap`-backed implementations of the store ports, used by
//! unit tests and the single-process demo binary.

pub mod request_store;
pub mod response_store;

pub use request_store::InMemoryRequestStore;
pub use response_store::InMemoryResponseStore;

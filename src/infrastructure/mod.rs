//! # Infrastructure Layer
//!
//! Adapters behind the domain's ports: the durable store and the message bus.

pub mod messaging;
pub mod persistence;

//! # Domain Layer
//!
//! Core business types: value objects, the two persisted entities, and
//! domain-level errors. Everything here is pure and I/O-free.

pub mod entities;
pub mod errors;
pub mod value_objects;

//! # API Layer
//!
//! External interfaces. REST is the only surface for now.

pub mod rest;

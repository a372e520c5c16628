//! # Domain Entities
//!
//! The two records this engine persists.
//!
//! - [`rfq_request::RfqRequest`]: immutable request record with its deadline
//! - [`rfq_response::RfqResponse`]: one quote slot per bidder per request

pub mod rfq_request;
pub mod rfq_response;

pub use rfq_request::{RfqRequest, RfqStatus};
pub use rfq_response::RfqResponse;

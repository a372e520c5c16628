//! # Use Cases
//!
//! The four operations of the RFQ engine: submit, quote, collect, query.
//! Each use case owns its collaborators as trait objects and carries no
//! state beyond them.

pub mod collect_responses;
pub mod query_status;
pub mod quote_worker;
pub mod submit_rfq;

pub use collect_responses::{BatchSummary, CollectError, ResponseCollector};
pub use query_status::{ResultView, RfqQueryUseCase, StatusView};
pub use quote_worker::{
    Bid, BidComputer, FlatRateQuoter, QuotePayload, QuoteWorker, RandomSpreadQuoter, RideDetails,
    WorkerOutcome,
};
pub use submit_rfq::{SubmitRfqCommand, SubmitRfqOutcome, SubmitRfqUseCase};

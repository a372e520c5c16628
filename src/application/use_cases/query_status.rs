//! # Status and Result Query Use Case
//!
//! Read side of the RFQ lifecycle: polling status while the bidding window
//! is open, and fetching the gathered quotes once it closes.
//!
//! There are no timers and no stored state transitions anywhere in the
//! engine. Whether an RFQ is running or done is derived on every read by
//! comparing the wall clock against the deadline persisted at submission.
//! Quotes are never exposed before the deadline, however many have already
//! arrived.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::links::{LinkBuilder, RequestContext, ResourceLinks};
use crate::domain::entities::{RfqResponse, RfqStatus};
use crate::domain::value_objects::{CorrelationId, CustomerId, Timestamp};
use crate::infrastructure::persistence::traits::{RequestStore, ResponseStore};
use std::sync::Arc;
use tracing::debug;

/// What a status poll returns.
#[derive(Debug, Clone)]
pub struct StatusView {
    /// Requester identity.
    pub customer_id: CustomerId,
    /// Correlation id being polled.
    pub correlation_id: CorrelationId,
    /// Derived lifecycle state.
    pub status: RfqStatus,
    /// Deadline of the bidding window; present while running.
    pub eta: Option<Timestamp>,
    /// Quotes gathered so far.
    pub response_count: u64,
    /// Self link, plus a result link once the window is closed.
    pub links: ResourceLinks,
}

/// What a result fetch returns.
#[derive(Debug, Clone)]
pub enum ResultView {
    /// The window is still open; same progress summary as a status poll,
    /// quotes withheld.
    Pending(StatusView),
    /// The window is closed; ride data plus every gathered quote.
    Ready {
        /// Requester identity.
        customer_id: CustomerId,
        /// Correlation id of the closed RFQ.
        correlation_id: CorrelationId,
        /// The submission payload, round-tripped verbatim.
        ride_data: serde_json::Value,
        /// Every stored quote, including late arrivals.
        quotes: Vec<RfqResponse>,
        /// Self link.
        links: ResourceLinks,
    },
}

/// Use case: answer status polls and result fetches.
#[derive(Debug)]
pub struct RfqQueryUseCase {
    request_store: Arc<dyn RequestStore>,
    response_store: Arc<dyn ResponseStore>,
    link_builder: Arc<dyn LinkBuilder>,
}

impl RfqQueryUseCase {
    /// Creates the use case over both stores.
    #[must_use]
    pub fn new(
        request_store: Arc<dyn RequestStore>,
        response_store: Arc<dyn ResponseStore>,
        link_builder: Arc<dyn LinkBuilder>,
    ) -> Self {
        Self {
            request_store,
            response_store,
            link_builder,
        }
    }

    /// Answers a status poll.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no request record matches the pair, even if
    /// orphan quotes exist for the correlation id. Store failures surface as
    /// server errors.
    pub async fn status(
        &self,
        ctx: &RequestContext,
        customer_id: &CustomerId,
        correlation_id: CorrelationId,
    ) -> ApplicationResult<StatusView> {
        self.status_at(ctx, customer_id, correlation_id, Timestamp::now())
            .await
    }

    /// Answers a result fetch.
    ///
    /// While the window is open this degrades to the status summary; quotes
    /// only appear once the deadline has passed.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::status`].
    pub async fn result(
        &self,
        ctx: &RequestContext,
        customer_id: &CustomerId,
        correlation_id: CorrelationId,
    ) -> ApplicationResult<ResultView> {
        self.result_at(ctx, customer_id, correlation_id, Timestamp::now())
            .await
    }

    /// Status poll with an explicit clock, for deterministic tests.
    pub(crate) async fn status_at(
        &self,
        ctx: &RequestContext,
        customer_id: &CustomerId,
        correlation_id: CorrelationId,
        now: Timestamp,
    ) -> ApplicationResult<StatusView> {
        let request = self
            .request_store
            .get(customer_id, correlation_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("rfq", correlation_id.to_string()))?;

        let response_count = self
            .response_store
            .count_by_correlation(correlation_id)
            .await?;
        let status = request.status_at(now);
        debug!(%correlation_id, %status, response_count, "status poll");

        let links = ResourceLinks {
            self_link: self.link_builder.self_link(ctx, customer_id, correlation_id),
            result: match status {
                RfqStatus::Done => {
                    Some(self.link_builder.result_link(ctx, customer_id, correlation_id))
                }
                RfqStatus::Running => None,
            },
        };

        Ok(StatusView {
            customer_id: request.customer_id().clone(),
            correlation_id,
            status,
            eta: match status {
                RfqStatus::Running => Some(request.deadline()),
                RfqStatus::Done => None,
            },
            response_count,
            links,
        })
    }

    /// Result fetch with an explicit clock, for deterministic tests.
    pub(crate) async fn result_at(
        &self,
        ctx: &RequestContext,
        customer_id: &CustomerId,
        correlation_id: CorrelationId,
        now: Timestamp,
    ) -> ApplicationResult<ResultView> {
        let request = self
            .request_store
            .get(customer_id, correlation_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("rfq", correlation_id.to_string()))?;

        if !request.is_done_at(now) {
            let view = self
                .status_at(ctx, customer_id, correlation_id, now)
                .await?;
            return Ok(ResultView::Pending(view));
        }

        let quotes = self
            .response_store
            .find_by_correlation(correlation_id)
            .await?;
        debug!(%correlation_id, quotes = quotes.len(), "result fetch");

        Ok(ResultView::Ready {
            customer_id: request.customer_id().clone(),
            correlation_id,
            ride_data: request.details().clone(),
            quotes,
            links: ResourceLinks {
                self_link: self.link_builder.self_link(ctx, customer_id, correlation_id),
                result: None,
            },
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::application::links::UrlLinkBuilder;
    use crate::domain::entities::RfqRequest;
    use crate::domain::value_objects::{BidderId, Perk, Price};
    use crate::infrastructure::persistence::in_memory::{
        InMemoryRequestStore, InMemoryResponseStore,
    };

    struct Fixture {
        use_case: RfqQueryUseCase,
        requests: Arc<InMemoryRequestStore>,
        responses: Arc<InMemoryResponseStore>,
    }

    fn fixture() -> Fixture {
        let requests = Arc::new(InMemoryRequestStore::new());
        let responses = Arc::new(InMemoryResponseStore::new());
        Fixture {
            use_case: RfqQueryUseCase::new(
                requests.clone(),
                responses.clone(),
                Arc::new(UrlLinkBuilder),
            ),
            requests,
            responses,
        }
    }

    fn ctx() -> RequestContext {
        RequestContext::new("http", "localhost:8080", "/api/user/retrieve-rfq-status")
    }

    fn request(customer: &str, correlation: CorrelationId, timeout_secs: i64) -> RfqRequest {
        RfqRequest::new(
            CustomerId::new(customer),
            correlation,
            "Home".to_string(),
            "Airport".to_string(),
            Timestamp::now(),
            timeout_secs,
            serde_json::json!({"from-location": "Home", "to-location": "Airport"}),
        )
        .unwrap()
    }

    fn quote(correlation: CorrelationId, bidder: &str, price: f64) -> RfqResponse {
        RfqResponse::new(
            correlation,
            BidderId::new(bidder),
            Price::new(price).unwrap(),
            vec![Perk::FreeSnacks],
            Timestamp::now(),
            serde_json::json!({"bidder-id": bidder, "price": price}),
        )
    }

    #[tokio::test]
    async fn unknown_pair_is_not_found() {
        let f = fixture();
        let err = f
            .use_case
            .status(&ctx(), &CustomerId::new("c-1"), CorrelationId::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }

    #[tokio::test]
    async fn orphan_quotes_do_not_resurrect_a_missing_request() {
        let f = fixture();
        let correlation = CorrelationId::new_v4();
        f.responses.upsert(&quote(correlation, "U1", 2.95)).await.unwrap();

        let err = f
            .use_case
            .status(&ctx(), &CustomerId::new("c-1"), correlation)
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }

    #[tokio::test]
    async fn running_status_has_eta_and_count_but_no_result_link() {
        let f = fixture();
        let correlation = CorrelationId::new_v4();
        let req = request("c-1", correlation, 300);
        f.requests.put(&req).await.unwrap();
        f.responses.upsert(&quote(correlation, "U1", 2.95)).await.unwrap();

        let view = f
            .use_case
            .status(&ctx(), &CustomerId::new("c-1"), correlation)
            .await
            .unwrap();

        assert_eq!(view.status, RfqStatus::Running);
        assert_eq!(view.eta, Some(req.deadline()));
        assert_eq!(view.response_count, 1);
        assert!(view.links.result.is_none());
    }

    #[tokio::test]
    async fn done_status_drops_eta_and_adds_result_link() {
        let f = fixture();
        let correlation = CorrelationId::new_v4();
        let req = request("c-1", correlation, 10);
        f.requests.put(&req).await.unwrap();

        let after = req.deadline().add_secs(1);
        let view = f
            .use_case
            .status_at(&ctx(), &CustomerId::new("c-1"), correlation, after)
            .await
            .unwrap();

        assert_eq!(view.status, RfqStatus::Done);
        assert!(view.eta.is_none());
        assert!(
            view.links
                .result
                .as_deref()
                .unwrap()
                .contains("/api/user/retrieve-rfq-result")
        );
    }

    #[tokio::test]
    async fn result_is_withheld_while_running() {
        let f = fixture();
        let correlation = CorrelationId::new_v4();
        f.requests.put(&request("c-1", correlation, 300)).await.unwrap();
        f.responses.upsert(&quote(correlation, "U1", 2.95)).await.unwrap();

        let view = f
            .use_case
            .result(&ctx(), &CustomerId::new("c-1"), correlation)
            .await
            .unwrap();

        match view {
            ResultView::Pending(status) => {
                assert_eq!(status.status, RfqStatus::Running);
                assert_eq!(status.response_count, 1);
            }
            ResultView::Ready { .. } => panic!("quotes exposed before the deadline"),
        }
    }

    #[tokio::test]
    async fn done_result_carries_ride_data_and_all_quotes() {
        let f = fixture();
        let correlation = CorrelationId::new_v4();
        let req = request("c-1", correlation, 0);
        f.requests.put(&req).await.unwrap();
        f.responses.upsert(&quote(correlation, "U1", 2.95)).await.unwrap();
        f.responses.upsert(&quote(correlation, "U2", 3.10)).await.unwrap();
        f.responses.upsert(&quote(correlation, "U3", 2.80)).await.unwrap();

        let after = req.deadline().add_secs(1);
        let view = f
            .use_case
            .result_at(&ctx(), &CustomerId::new("c-1"), correlation, after)
            .await
            .unwrap();

        match view {
            ResultView::Ready {
                ride_data, quotes, ..
            } => {
                assert_eq!(ride_data["from-location"], "Home");
                assert_eq!(quotes.len(), 3);
            }
            ResultView::Pending(_) => panic!("expected a closed window"),
        }
    }

    #[tokio::test]
    async fn late_quotes_appear_in_the_result() {
        let f = fixture();
        let correlation = CorrelationId::new_v4();
        let req = request("c-1", correlation, 0);
        f.requests.put(&req).await.unwrap();

        // Quote stored after the deadline has already passed.
        let after = req.deadline().add_secs(5);
        f.responses.upsert(&quote(correlation, "U-late", 1.99)).await.unwrap();

        let view = f
            .use_case
            .result_at(&ctx(), &CustomerId::new("c-1"), correlation, after)
            .await
            .unwrap();
        match view {
            ResultView::Ready { quotes, .. } => {
                assert_eq!(quotes.len(), 1);
                assert_eq!(quotes[0].bidder_id().as_str(), "U-late");
            }
            ResultView::Pending(_) => panic!("expected a closed window"),
        }
    }

    #[tokio::test]
    async fn wrong_customer_cannot_see_anothers_rfq() {
        let f = fixture();
        let correlation = CorrelationId::new_v4();
        f.requests.put(&request("c-1", correlation, 300)).await.unwrap();

        let err = f
            .use_case
            .status(&ctx(), &CustomerId::new("c-2"), correlation)
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }
}

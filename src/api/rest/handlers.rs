//! # REST Handlers
//!
//! Axum handlers for the RFQ endpoints.
//!
//! Handlers are thin: they deserialize the wire shape, hand off to a use
//! case, and serialize the outcome. The wire vocabulary is kebab-case
//! (`customer-id`, `correlation-id`, `timeout-in-secs`), mapped to the
//! domain types at this boundary and nowhere else.

use crate::application::error::ApplicationError;
use crate::application::links::{LinkBuilder, RequestContext, ResourceLinks};
use crate::application::use_cases::{
    ResultView, RfqQueryUseCase, SubmitRfqCommand, SubmitRfqUseCase,
};
use crate::domain::entities::{RfqResponse, RfqStatus};
use crate::domain::value_objects::{CorrelationId, CustomerId, Perk, Price};
use axum::Json;
use axum::extract::{OriginalUri, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Submission use case.
    pub submit: Arc<SubmitRfqUseCase>,
    /// Status/result query use case.
    pub query: Arc<RfqQueryUseCase>,
    /// Link builder for `Location` headers.
    pub links: Arc<dyn LinkBuilder>,
}

/// Typed view of a submission body; the raw body is kept alongside it.
#[derive(Debug, Deserialize)]
struct SubmitRfqBody {
    #[serde(rename = "customer-id")]
    customer_id: String,
    #[serde(rename = "from-location", default)]
    from_location: Option<String>,
    #[serde(rename = "to-location", default)]
    to_location: Option<String>,
    #[serde(rename = "timeout-in-secs", default)]
    timeout_in_secs: Option<i64>,
}

/// Body of the `202 Accepted` submission response.
#[derive(Debug, Serialize)]
pub struct SubmitRfqResponse {
    /// Requester identity.
    #[serde(rename = "customer-id")]
    pub customer_id: String,
    /// Correlation id to poll with.
    #[serde(rename = "correlation-id")]
    pub correlation_id: String,
    /// Always `running` at submission time.
    pub status: RfqStatus,
    /// ISO-8601 deadline of the bidding window.
    pub eta: String,
    /// Status resource link.
    pub links: ResourceLinks,
}

/// Identifying pair for status and result queries.
#[derive(Debug, Deserialize)]
pub struct RfqQueryParams {
    /// Requester identity.
    #[serde(rename = "customer-id")]
    pub customer_id: String,
    /// Correlation id returned at submission.
    #[serde(rename = "correlation-id")]
    pub correlation_id: String,
}

/// Body of a status poll response.
#[derive(Debug, Serialize)]
pub struct StatusBody {
    /// Self link, plus a result link once done.
    pub links: ResourceLinks,
    /// Quotes gathered so far.
    #[serde(rename = "response-count")]
    pub response_count: u64,
    /// Derived lifecycle state.
    pub status: RfqStatus,
    /// ISO-8601 deadline; present while running.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eta: Option<String>,
}

/// One quote in a result response.
#[derive(Debug, Serialize)]
pub struct QuoteBody {
    /// Bidder identity.
    #[serde(rename = "bidder-id")]
    pub bidder_id: String,
    /// Requester the quote answers, echoed from the reply payload.
    #[serde(rename = "customer-id", skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    /// Quoted price.
    pub price: Price,
    /// Perks attached to the quote.
    pub perks: Vec<Perk>,
    /// Correlation id the quote answers.
    #[serde(rename = "correlation-id")]
    pub correlation_id: String,
}

impl From<&RfqResponse> for QuoteBody {
    fn from(response: &RfqResponse) -> Self {
        Self {
            bidder_id: response.bidder_id().to_string(),
            customer_id: response
                .payload()
                .get("customer-id")
                .and_then(serde_json::Value::as_str)
                .map(ToString::to_string),
            price: response.price(),
            perks: response.perks().to_vec(),
            correlation_id: response.correlation_id().to_string(),
        }
    }
}

/// Body of a result fetch once the window is closed.
#[derive(Debug, Serialize)]
pub struct ResultBody {
    /// Self link.
    pub links: ResourceLinks,
    /// The submission payload, round-tripped verbatim.
    #[serde(rename = "ride-data")]
    pub ride_data: serde_json::Value,
    /// Every gathered quote, late arrivals included.
    pub quotes: Vec<QuoteBody>,
}

/// Wire shape of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Stable machine-readable code.
    pub code: &'static str,
    /// Human-readable detail.
    pub message: String,
}

impl From<ApplicationError> for Response {
    fn from(error: ApplicationError) -> Self {
        let (status, code) = match &error {
            ApplicationError::Validation(_) | ApplicationError::Domain(_) => {
                (StatusCode::BAD_REQUEST, "invalid-request")
            }
            ApplicationError::NotFound { .. } => (StatusCode::NOT_FOUND, "not-found"),
            ApplicationError::Store(_)
            | ApplicationError::Bus(_)
            | ApplicationError::Serialization(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal-error")
            }
        };
        let body = ErrorResponse {
            code,
            message: error.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> Response {
    Response::from(ApplicationError::validation(message))
}

/// Derives the link context from the inbound request.
///
/// Scheme comes from `X-Forwarded-Proto` when a proxy sets it, host from the
/// `Host` header.
fn request_context(headers: &HeaderMap, uri: &OriginalUri) -> RequestContext {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    RequestContext::new(scheme, host, uri.0.path())
}

fn parse_query(params: &RfqQueryParams) -> Result<(CustomerId, CorrelationId), Response> {
    let correlation_id = CorrelationId::parse(&params.correlation_id)
        .map_err(|e| bad_request(format!("correlation-id is not a uuid: {e}")))?;
    Ok((CustomerId::new(params.customer_id.clone()), correlation_id))
}

/// `POST /api/user/submit-rfq`
///
/// Accepts a ride request and returns `202 Accepted` immediately; quotes
/// are gathered in the background until the deadline. `Location` and
/// `Content-Location` point at the status resource.
#[instrument(skip(state, body), fields(path = %uri.0.path()))]
pub async fn submit_rfq(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: OriginalUri,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let typed: SubmitRfqBody = match serde_json::from_value(body.clone()) {
        Ok(typed) => typed,
        Err(e) => return bad_request(format!("malformed ride request: {e}")),
    };

    let command = SubmitRfqCommand {
        customer_id: typed.customer_id,
        from_location: typed.from_location.unwrap_or_default(),
        to_location: typed.to_location.unwrap_or_default(),
        timeout_secs: typed.timeout_in_secs,
        details: body,
    };

    let outcome = match state.submit.execute(command).await {
        Ok(outcome) => outcome,
        Err(e) => return Response::from(e),
    };

    let ctx = request_context(&headers, &uri);
    let status_link =
        state
            .links
            .status_link(&ctx, &outcome.customer_id, outcome.correlation_id);

    let response = SubmitRfqResponse {
        customer_id: outcome.customer_id.to_string(),
        correlation_id: outcome.correlation_id.to_string(),
        status: outcome.status,
        eta: outcome.eta.to_iso8601(),
        links: ResourceLinks {
            self_link: status_link.clone(),
            result: None,
        },
    };

    (
        StatusCode::ACCEPTED,
        [
            (header::LOCATION, status_link.clone()),
            (header::CONTENT_LOCATION, status_link),
        ],
        Json(response),
    )
        .into_response()
}

/// `GET /api/user/retrieve-rfq-status`
#[instrument(skip(state, headers, uri))]
pub async fn retrieve_rfq_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: OriginalUri,
    Query(params): Query<RfqQueryParams>,
) -> Response {
    let (customer_id, correlation_id) = match parse_query(&params) {
        Ok(pair) => pair,
        Err(response) => return response,
    };
    let ctx = request_context(&headers, &uri);

    match state.query.status(&ctx, &customer_id, correlation_id).await {
        Ok(view) => Json(StatusBody {
            links: view.links,
            response_count: view.response_count,
            status: view.status,
            eta: view.eta.map(|t| t.to_iso8601()),
        })
        .into_response(),
        Err(e) => Response::from(e),
    }
}

/// `GET /api/user/retrieve-rfq-result`
///
/// While the window is open this returns the status summary; the quote list
/// appears only after the deadline.
#[instrument(skip(state, headers, uri))]
pub async fn retrieve_rfq_result(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: OriginalUri,
    Query(params): Query<RfqQueryParams>,
) -> Response {
    let (customer_id, correlation_id) = match parse_query(&params) {
        Ok(pair) => pair,
        Err(response) => return response,
    };
    let ctx = request_context(&headers, &uri);

    match state.query.result(&ctx, &customer_id, correlation_id).await {
        Ok(ResultView::Ready {
            ride_data,
            quotes,
            links,
            ..
        }) => Json(ResultBody {
            links,
            ride_data,
            quotes: quotes.iter().map(QuoteBody::from).collect(),
        })
        .into_response(),
        Ok(ResultView::Pending(view)) => Json(StatusBody {
            links: view.links,
            response_count: view.response_count,
            status: view.status,
            eta: view.eta.map(|t| t.to_iso8601()),
        })
        .into_response(),
        Err(e) => Response::from(e),
    }
}

/// `GET /api/v1/health`
pub async fn health() -> Response {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
    .into_response()
}

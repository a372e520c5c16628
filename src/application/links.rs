//! # Resource Link Builder
//!
//! Self-referencing link construction for RFQ resources.
//!
//! Links are pure derivations of the inbound request's scheme, host, and
//! path; the use cases treat the builder as an external collaborator behind
//! the [`LinkBuilder`] trait so the hard core stays independent of URL
//! conventions.

use crate::domain::value_objects::{CorrelationId, CustomerId};
use serde::Serialize;
use std::fmt;

/// Scheme/host/path of the inbound request a link derives from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// URL scheme (`http` or `https`), typically from `X-Forwarded-Proto`.
    pub scheme: String,
    /// Host header value.
    pub host: String,
    /// Path of the inbound request.
    pub path: String,
}

impl RequestContext {
    /// Creates a request context.
    #[must_use]
    pub fn new(
        scheme: impl Into<String>,
        host: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            path: path.into(),
        }
    }

    fn base_url(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }
}

/// The `links` object attached to RFQ resource representations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceLinks {
    /// Link to this resource.
    #[serde(rename = "self")]
    pub self_link: String,
    /// Link to the result resource, present once the window is closed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

/// Builds resource links from an inbound request context.
pub trait LinkBuilder: Send + Sync + fmt::Debug {
    /// Link to the status resource for a submission.
    fn status_link(&self, ctx: &RequestContext, customer: &CustomerId, correlation: CorrelationId)
    -> String;

    /// Link to the result resource.
    fn result_link(&self, ctx: &RequestContext, customer: &CustomerId, correlation: CorrelationId)
    -> String;

    /// Link to the resource the inbound request itself addressed.
    fn self_link(&self, ctx: &RequestContext, customer: &CustomerId, correlation: CorrelationId)
    -> String;
}

/// Default [`LinkBuilder`] using the `/api/user` resource layout.
#[derive(Debug, Clone, Default)]
pub struct UrlLinkBuilder;

impl UrlLinkBuilder {
    fn query(customer: &CustomerId, correlation: CorrelationId) -> String {
        format!("?customer-id={customer}&correlation-id={correlation}")
    }
}

impl LinkBuilder for UrlLinkBuilder {
    fn status_link(
        &self,
        ctx: &RequestContext,
        customer: &CustomerId,
        correlation: CorrelationId,
    ) -> String {
        format!(
            "{}/api/user/retrieve-rfq-status{}",
            ctx.base_url(),
            Self::query(customer, correlation)
        )
    }

    fn result_link(
        &self,
        ctx: &RequestContext,
        customer: &CustomerId,
        correlation: CorrelationId,
    ) -> String {
        format!(
            "{}/api/user/retrieve-rfq-result{}",
            ctx.base_url(),
            Self::query(customer, correlation)
        )
    }

    fn self_link(
        &self,
        ctx: &RequestContext,
        customer: &CustomerId,
        correlation: CorrelationId,
    ) -> String {
        format!(
            "{}{}{}",
            ctx.base_url(),
            ctx.path,
            Self::query(customer, correlation)
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn ctx() -> RequestContext {
        RequestContext::new("https", "rides.example.com", "/api/user/retrieve-rfq-status")
    }

    #[test]
    fn status_link_layout() {
        let builder = UrlLinkBuilder;
        let correlation = CorrelationId::new_v4();
        let link = builder.status_link(&ctx(), &CustomerId::new("c-1"), correlation);
        assert_eq!(
            link,
            format!(
                "https://rides.example.com/api/user/retrieve-rfq-status?customer-id=c-1&correlation-id={correlation}"
            )
        );
    }

    #[test]
    fn self_link_reuses_inbound_path() {
        let builder = UrlLinkBuilder;
        let correlation = CorrelationId::new_v4();
        let link = builder.self_link(&ctx(), &CustomerId::new("c-1"), correlation);
        assert!(link.starts_with("https://rides.example.com/api/user/retrieve-rfq-status?"));
    }

    #[test]
    fn result_link_targets_result_resource() {
        let builder = UrlLinkBuilder;
        let correlation = CorrelationId::new_v4();
        let link = builder.result_link(&ctx(), &CustomerId::new("c-1"), correlation);
        assert!(link.contains("/api/user/retrieve-rfq-result?"));
    }

    #[test]
    fn links_serialize_with_self_keyword() {
        let links = ResourceLinks {
            self_link: "https://x/y".to_string(),
            result: None,
        };
        let json = serde_json::to_value(&links).unwrap();
        assert_eq!(json["self"], "https://x/y");
        assert!(json.get("result").is_none());
    }
}

//! # Application Layer
//!
//! Orchestration between the domain model and the infrastructure ports.
//! Use cases live here, along with the application error taxonomy and the
//! resource-link builder the read side uses.

pub mod error;
pub mod links;
pub mod use_cases;

pub use error::{ApplicationError, ApplicationResult};
pub use links::{LinkBuilder, RequestContext, ResourceLinks, UrlLinkBuilder};

//! # Perk Value Object
//!
//! Enum-like tags a bidder can attach to a quote.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A perk offered alongside a quoted price.
///
/// Perks are free-form incentives bidders attach to their quotes. The known
/// variants mirror the tags bidders currently send; anything else is carried
/// through verbatim as [`Perk::Other`] so unknown tags never fail parsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Perk {
    /// Complimentary non-alcoholic drinks during the ride.
    #[serde(rename = "FREE_DRINKS_NON_ALC")]
    FreeDrinksNonAlc,
    /// Complimentary alcoholic drinks during the ride.
    #[serde(rename = "FREE_DRINKS_ALC")]
    FreeDrinksAlc,
    /// Complimentary snacks.
    #[serde(rename = "FREE_SNACKS")]
    FreeSnacks,
    /// Priority pickup at the start location.
    #[serde(rename = "PRIORITY_PICKUP")]
    PriorityPickup,
    /// Any tag this engine does not recognize.
    #[serde(untagged)]
    Other(String),
}

impl fmt::Display for Perk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FreeDrinksNonAlc => write!(f, "FREE_DRINKS_NON_ALC"),
            Self::FreeDrinksAlc => write!(f, "FREE_DRINKS_ALC"),
            Self::FreeSnacks => write!(f, "FREE_SNACKS"),
            Self::PriorityPickup => write!(f, "PRIORITY_PICKUP"),
            Self::Other(tag) => write!(f, "{tag}"),
        }
    }
}

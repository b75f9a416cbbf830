//! Quote source trait and common types

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point-in-time price observation from one venue.
/// Immutable once constructed; never persisted standalone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    /// Venue the price was observed on
    pub venue: String,
    /// Last traded price in quote currency
    pub price: f64,
    /// Observation timestamp
    pub observed_at: DateTime<Utc>,
}

impl Quote {
    /// Create a quote observed now
    pub fn new(venue: impl Into<String>, price: f64) -> Self {
        Self {
            venue: venue.into(),
            price,
            observed_at: Utc::now(),
        }
    }
}

/// Classification of a quote fetch failure.
/// Both kinds are handled identically by the cycle (skip, no record) but
/// logged distinctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteFailureKind {
    /// Transport-level failure: timeout, refused connection, DNS
    Network,
    /// The venue answered but the response was unusable
    Venue,
}

impl fmt::Display for QuoteFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteFailureKind::Network => write!(f, "network"),
            QuoteFailureKind::Venue => write!(f, "venue"),
        }
    }
}

/// Quote fetch failure
#[derive(thiserror::Error, Debug)]
#[error("{kind} failure fetching quote from {venue}: {detail}")]
pub struct QuoteError {
    /// Venue the fetch was issued against
    pub venue: String,
    /// Failure classification
    pub kind: QuoteFailureKind,
    /// Human-readable detail
    pub detail: String,
}

impl QuoteError {
    /// Build a network-kind failure
    pub fn network(venue: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            venue: venue.into(),
            kind: QuoteFailureKind::Network,
            detail: detail.into(),
        }
    }

    /// Build a venue-kind failure
    pub fn rejected(venue: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            venue: venue.into(),
            kind: QuoteFailureKind::Venue,
            detail: detail.into(),
        }
    }

    /// Classify a transport error from the HTTP client
    pub fn from_transport(venue: impl Into<String>, error: reqwest::Error) -> Self {
        let venue = venue.into();
        if error.is_status() {
            Self::rejected(venue, error.to_string())
        } else {
            Self::network(venue, error.to_string())
        }
    }
}

/// A source of current prices for a single venue
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Venue id this source quotes for
    fn venue_id(&self) -> &str;

    /// Fetch the current price for a symbol
    async fn latest_price(&self, symbol: &str) -> Result<Quote, QuoteError>;
}

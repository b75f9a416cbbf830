//! Venue quote source implementations

pub mod binance;
pub mod bybit;
pub mod kucoin;
pub mod traits;

pub use binance::BinanceTickerSource;
pub use bybit::BybitTickerSource;
pub use kucoin::KucoinTickerSource;
pub use traits::*;

use crate::{config::VenueConfig, ArbitrageError, Result};
use std::fmt;
use std::time::Duration;

/// Supported venues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VenueKind {
    /// Binance spot
    Binance,
    /// Bybit spot
    Bybit,
    /// KuCoin spot
    Kucoin,
}

impl fmt::Display for VenueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VenueKind::Binance => write!(f, "binance"),
            VenueKind::Bybit => write!(f, "bybit"),
            VenueKind::Kucoin => write!(f, "kucoin"),
        }
    }
}

impl std::str::FromStr for VenueKind {
    type Err = ArbitrageError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "binance" => Ok(VenueKind::Binance),
            "bybit" => Ok(VenueKind::Bybit),
            "kucoin" => Ok(VenueKind::Kucoin),
            _ => Err(ArbitrageError::Config(format!("Unknown venue: {}", s))),
        }
    }
}

/// Factory for creating quote sources from venue configuration
pub struct QuoteSourceFactory;

impl QuoteSourceFactory {
    /// Create a quote source for the given venue id.
    /// The venue id doubles as the wire-format selector.
    pub fn create(
        venue_id: &str,
        config: &VenueConfig,
        timeout: Duration,
    ) -> Result<Box<dyn QuoteSource + Send + Sync>> {
        let kind: VenueKind = venue_id.parse()?;
        match kind {
            VenueKind::Binance => {
                let source = BinanceTickerSource::new(venue_id, config, timeout)?;
                Ok(Box::new(source))
            }
            VenueKind::Bybit => {
                let source = BybitTickerSource::new(venue_id, config, timeout)?;
                Ok(Box::new(source))
            }
            VenueKind::Kucoin => {
                let source = KucoinTickerSource::new(venue_id, config, timeout)?;
                Ok(Box::new(source))
            }
        }
    }
}

/// Build the shared HTTP client used by the ticker sources
pub(crate) fn build_http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ArbitrageError::Config(format!("Failed to build HTTP client: {}", e)).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_venue_kind_from_str() {
        assert_eq!("binance".parse::<VenueKind>().unwrap(), VenueKind::Binance);
        assert_eq!("bybit".parse::<VenueKind>().unwrap(), VenueKind::Bybit);
        assert_eq!("KUCOIN".parse::<VenueKind>().unwrap(), VenueKind::Kucoin);
        assert!("kraken".parse::<VenueKind>().is_err());
    }

    #[test]
    fn test_venue_kind_display() {
        assert_eq!(VenueKind::Binance.to_string(), "binance");
        assert_eq!(VenueKind::Bybit.to_string(), "bybit");
        assert_eq!(VenueKind::Kucoin.to_string(), "kucoin");
    }

    #[test]
    fn test_factory_rejects_unknown_venue() {
        let config = VenueConfig {
            fee_rate: 0.001,
            rest_api_url: "https://api.example.com".to_string(),
            symbol: None,
        };
        let result = QuoteSourceFactory::create("kraken", &config, Duration::from_secs(5));
        assert!(result.is_err());
    }

    #[test]
    fn test_factory_creates_known_venues() {
        let config = VenueConfig {
            fee_rate: 0.001,
            rest_api_url: "https://api.example.com".to_string(),
            symbol: None,
        };
        for venue in ["binance", "bybit", "kucoin"] {
            let source =
                QuoteSourceFactory::create(venue, &config, Duration::from_secs(5)).unwrap();
            assert_eq!(source.venue_id(), venue);
        }
    }
}

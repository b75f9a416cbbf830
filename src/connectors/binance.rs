//! Binance spot ticker source

use crate::{
    config::VenueConfig,
    connectors::{build_http_client, Quote, QuoteError, QuoteSource},
    Result,
};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Quote source backed by the Binance spot ticker endpoint
pub struct BinanceTickerSource {
    venue_id: String,
    base_url: String,
    client: reqwest::Client,
}

/// Wire format of `GET /api/v3/ticker/price`
#[derive(Debug, Deserialize)]
struct BinancePriceResponse {
    symbol: String,
    price: String,
}

impl BinanceTickerSource {
    /// Create a new Binance ticker source
    pub fn new(venue_id: &str, config: &VenueConfig, timeout: Duration) -> Result<Self> {
        Ok(Self {
            venue_id: venue_id.to_string(),
            base_url: config.rest_api_url.trim_end_matches('/').to_string(),
            client: build_http_client(timeout)?,
        })
    }

    /// Parse a ticker-price response body into a price
    pub fn parse_price_response(venue_id: &str, body: &str) -> std::result::Result<f64, QuoteError> {
        let response: BinancePriceResponse = serde_json::from_str(body)
            .map_err(|e| QuoteError::rejected(venue_id, format!("unparseable ticker: {}", e)))?;

        let price: f64 = response.price.parse().map_err(|_| {
            QuoteError::rejected(
                venue_id,
                format!("non-numeric price '{}' for {}", response.price, response.symbol),
            )
        })?;

        if price <= 0.0 {
            return Err(QuoteError::rejected(
                venue_id,
                format!("non-positive price {} for {}", price, response.symbol),
            ));
        }

        Ok(price)
    }
}

#[async_trait]
impl QuoteSource for BinanceTickerSource {
    fn venue_id(&self) -> &str {
        &self.venue_id
    }

    async fn latest_price(&self, symbol: &str) -> std::result::Result<Quote, QuoteError> {
        let url = format!("{}/api/v3/ticker/price", self.base_url);
        debug!(venue = %self.venue_id, symbol, "fetching ticker price");

        let response = self
            .client
            .get(&url)
            .query(&[("symbol", symbol)])
            .send()
            .await
            .map_err(|e| QuoteError::from_transport(&self.venue_id, e))?
            .error_for_status()
            .map_err(|e| QuoteError::from_transport(&self.venue_id, e))?;

        let body = response
            .text()
            .await
            .map_err(|e| QuoteError::from_transport(&self.venue_id, e))?;

        let price = Self::parse_price_response(&self.venue_id, &body)?;
        Ok(Quote::new(&self.venue_id, price))
    }
}

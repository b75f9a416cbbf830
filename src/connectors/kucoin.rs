//! KuCoin spot ticker source

use crate::{
    config::VenueConfig,
    connectors::{build_http_client, Quote, QuoteError, QuoteSource},
    Result,
};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Quote source backed by the KuCoin level-1 order book endpoint
pub struct KucoinTickerSource {
    venue_id: String,
    base_url: String,
    client: reqwest::Client,
}

/// Wire format of `GET /api/v1/market/orderbook/level1`
#[derive(Debug, Deserialize)]
struct KucoinLevel1Response {
    code: String,
    data: Option<KucoinLevel1>,
}

#[derive(Debug, Deserialize)]
struct KucoinLevel1 {
    price: String,
}

impl KucoinTickerSource {
    /// Create a new KuCoin ticker source
    pub fn new(venue_id: &str, config: &VenueConfig, timeout: Duration) -> Result<Self> {
        Ok(Self {
            venue_id: venue_id.to_string(),
            base_url: config.rest_api_url.trim_end_matches('/').to_string(),
            client: build_http_client(timeout)?,
        })
    }

    /// Parse a level-1 response body into a last-traded price
    pub fn parse_price_response(venue_id: &str, body: &str) -> std::result::Result<f64, QuoteError> {
        let response: KucoinLevel1Response = serde_json::from_str(body)
            .map_err(|e| QuoteError::rejected(venue_id, format!("unparseable ticker: {}", e)))?;

        // KuCoin signals success with code "200000"
        if response.code != "200000" {
            return Err(QuoteError::rejected(
                venue_id,
                format!("error code {}", response.code),
            ));
        }

        let data = response.data.ok_or_else(|| {
            QuoteError::rejected(venue_id, "missing data in level1 response".to_string())
        })?;

        let price: f64 = data.price.parse().map_err(|_| {
            QuoteError::rejected(venue_id, format!("non-numeric price '{}'", data.price))
        })?;

        if price <= 0.0 {
            return Err(QuoteError::rejected(
                venue_id,
                format!("non-positive price {}", price),
            ));
        }

        Ok(price)
    }
}

#[async_trait]
impl QuoteSource for KucoinTickerSource {
    fn venue_id(&self) -> &str {
        &self.venue_id
    }

    async fn latest_price(&self, symbol: &str) -> std::result::Result<Quote, QuoteError> {
        let url = format!("{}/api/v1/market/orderbook/level1", self.base_url);
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

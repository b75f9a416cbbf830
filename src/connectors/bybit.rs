//! Bybit spot ticker source

use crate::{
    config::VenueConfig,
    connectors::{build_http_client, Quote, QuoteError, QuoteSource},
    Result,
};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Quote source backed by the Bybit v5 market tickers endpoint
pub struct BybitTickerSource {
    venue_id: String,
    base_url: String,
    client: reqwest::Client,
}

/// Wire format of `GET /v5/market/tickers`
#[derive(Debug, Deserialize)]
struct BybitTickerResponse {
    #[serde(rename = "retCode")]
    ret_code: i64,
    #[serde(rename = "retMsg")]
    ret_msg: String,
    result: BybitTickerResult,
}

#[derive(Debug, Deserialize)]
struct BybitTickerResult {
    #[serde(default)]
    list: Vec<BybitTicker>,
}

#[derive(Debug, Deserialize)]
struct BybitTicker {
    #[serde(rename = "lastPrice")]
    last_price: String,
}

impl BybitTickerSource {
    /// Create a new Bybit ticker source
    pub fn new(venue_id: &str, config: &VenueConfig, timeout: Duration) -> Result<Self> {
        Ok(Self {
            venue_id: venue_id.to_string(),
            base_url: config.rest_api_url.trim_end_matches('/').to_string(),
            client: build_http_client(timeout)?,
        })
    }

    /// Parse a tickers response body into a last-traded price
    pub fn parse_price_response(venue_id: &str, body: &str) -> std::result::Result<f64, QuoteError> {
        let response: BybitTickerResponse = serde_json::from_str(body)
            .map_err(|e| QuoteError::rejected(venue_id, format!("unparseable ticker: {}", e)))?;

        if response.ret_code != 0 {
            return Err(QuoteError::rejected(
                venue_id,
                format!("retCode {}: {}", response.ret_code, response.ret_msg),
            ));
        }

        let ticker = response.result.list.first().ok_or_else(|| {
            QuoteError::rejected(venue_id, "empty ticker list in response".to_string())
        })?;

        let price: f64 = ticker.last_price.parse().map_err(|_| {
            QuoteError::rejected(
                venue_id,
                format!("non-numeric lastPrice '{}'", ticker.last_price),
            )
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
impl QuoteSource for BybitTickerSource {
    fn venue_id(&self) -> &str {
        &self.venue_id
    }

    async fn latest_price(&self, symbol: &str) -> std::result::Result<Quote, QuoteError> {
        let url = format!("{}/v5/market/tickers", self.base_url);
        debug!(venue = %self.venue_id, symbol, "fetching ticker price");

        let response = self
            .client
            .get(&url)
            .query(&[("category", "spot"), ("symbol", symbol)])
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectors::QuoteFailureKind;

    const OK_BODY: &str = r#"{
        "retCode": 0,
        "retMsg": "OK",
        "result": {"category": "spot", "list": [{"symbol": "BTCUSDT", "lastPrice": "50050.10"}]}
    }"#;

    #[test]
    fn test_parse_price_response() {
        let price = BybitTickerSource::parse_price_response("bybit", OK_BODY).unwrap();
        assert_eq!(price, 50050.10);
    }

    #[test]
    fn test_parse_rejects_error_ret_code() {
        let body = r#"{"retCode": 10001, "retMsg": "params error", "result": {"list": []}}"#;
        let err = BybitTickerSource::parse_price_response("bybit", body).unwrap_err();
        assert_eq!(err.kind, QuoteFailureKind::Venue);
        assert!(err.detail.contains("10001"));
    }

    #[test]
    fn test_parse_rejects_empty_list() {
        let body = r#"{"retCode": 0, "retMsg": "OK", "result": {"list": []}}"#;
        let err = BybitTickerSource::parse_price_response("bybit", body).unwrap_err();
        assert!(err.detail.contains("empty ticker list"));
    }

    #[test]
    fn test_parse_rejects_non_numeric_price() {
        let body = r#"{"retCode": 0, "retMsg": "OK", "result": {"list": [{"lastPrice": "-"}]}}"#;
        let err = BybitTickerSource::parse_price_response("bybit", body).unwrap_err();
        assert!(err.detail.contains("non-numeric"));
    }
}

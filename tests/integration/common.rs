//! Shared utilities for integration tests

use cross_venue_arbitrage::config::{MonitorConfig, VenueConfig};
use std::path::Path;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Venue configuration pointing at a mock server
pub fn venue_config(base_url: &str, fee_rate: f64) -> VenueConfig {
    VenueConfig {
        fee_rate,
        rest_api_url: base_url.to_string(),
        symbol: None,
    }
}

/// Monitor configuration wired to two mock venues and a scratch ledger
pub fn monitor_config(binance_url: &str, bybit_url: &str, ledger_dir: &Path) -> MonitorConfig {
    let mut config = MonitorConfig::default();
    config.ledger.directory = ledger_dir.to_path_buf();
    config.scheduler.interval_secs = 1;
    config.scheduler.fetch_timeout_secs = 2;
    config
        .venues
        .insert("binance".to_string(), venue_config(binance_url, 0.001));
    config
        .venues
        .insert("bybit".to_string(), venue_config(bybit_url, 0.001));
    config
}

/// Serve a fixed price from a mock Binance ticker endpoint
pub async fn mount_binance_price(server: &MockServer, symbol: &str, price: f64) {
    let body = format!(r#"{{"symbol":"{}","price":"{}"}}"#, symbol, price);
    Mock::given(method("GET"))
        .and(path("/api/v3/ticker/price"))
        .and(query_param("symbol", symbol))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(server)
        .await;
}

/// Serve a fixed price from a mock Bybit tickers endpoint
pub async fn mount_bybit_price(server: &MockServer, symbol: &str, price: f64) {
    let body = format!(
        r#"{{"retCode":0,"retMsg":"OK","result":{{"category":"spot","list":[{{"symbol":"{}","lastPrice":"{}"}}]}}}}"#,
        symbol, price
    );
    Mock::given(method("GET"))
        .and(path("/v5/market/tickers"))
        .and(query_param("symbol", symbol))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(server)
        .await;
}

//! Venue ticker sources against mock HTTP servers

use crate::common;
use cross_venue_arbitrage::connectors::{
    BinanceTickerSource, BybitTickerSource, KucoinTickerSource, QuoteFailureKind, QuoteSource,
};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMEOUT: Duration = Duration::from_secs(2);

#[tokio::test]
async fn binance_source_fetches_last_price() {
    let server = MockServer::start().await;
    common::mount_binance_price(&server, "BTCUSDT", 50123.45).await;

    let config = common::venue_config(&server.uri(), 0.001);
    let source = BinanceTickerSource::new("binance", &config, TIMEOUT).unwrap();

    let quote = source.latest_price("BTCUSDT").await.unwrap();
    assert_eq!(quote.venue, "binance");
    assert_eq!(quote.price, 50123.45);
}

#[tokio::test]
async fn bybit_source_fetches_last_price() {
    let server = MockServer::start().await;
    common::mount_bybit_price(&server, "BTCUSDT", 50050.10).await;

    let config = common::venue_config(&server.uri(), 0.001);
    let source = BybitTickerSource::new("bybit", &config, TIMEOUT).unwrap();

    let quote = source.latest_price("BTCUSDT").await.unwrap();
    assert_eq!(quote.venue, "bybit");
    assert_eq!(quote.price, 50050.10);
}

#[tokio::test]
async fn kucoin_source_fetches_last_price() {
    let server = MockServer::start().await;
    let body = r#"{"code":"200000","data":{"sequence":"1550467","price":"49985.5","size":"0.1"}}"#;
    Mock::given(method("GET"))
        .and(path("/api/v1/market/orderbook/level1"))
        .and(query_param("symbol", "BTC-USDT"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(&server)
        .await;

    let config = common::venue_config(&server.uri(), 0.001);
    let source = KucoinTickerSource::new("kucoin", &config, TIMEOUT).unwrap();

    let quote = source.latest_price("BTC-USDT").await.unwrap();
    assert_eq!(quote.venue, "kucoin");
    assert_eq!(quote.price, 49985.5);
}

#[tokio::test]
async fn http_error_classifies_as_venue_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = common::venue_config(&server.uri(), 0.001);
    let source = BinanceTickerSource::new("binance", &config, TIMEOUT).unwrap();

    let err = source.latest_price("BTCUSDT").await.unwrap_err();
    assert_eq!(err.kind, QuoteFailureKind::Venue);
}

#[tokio::test]
async fn unreachable_host_classifies_as_network_failure() {
    // Port 9 (discard) is not listening
    let config = common::venue_config("http://127.0.0.1:9", 0.001);
    let source = BinanceTickerSource::new("binance", &config, TIMEOUT).unwrap();

    let err = source.latest_price("BTCUSDT").await.unwrap_err();
    assert_eq!(err.kind, QuoteFailureKind::Network);
}

#[tokio::test]
async fn venue_error_payload_classifies_as_venue_failure() {
    let server = MockServer::start().await;
    let body = r#"{"retCode":10001,"retMsg":"params error","result":{"list":[]}}"#;
    Mock::given(method("GET"))
        .and(path("/v5/market/tickers"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(&server)
        .await;

    let config = common::venue_config(&server.uri(), 0.001);
    let source = BybitTickerSource::new("bybit", &config, TIMEOUT).unwrap();

    let err = source.latest_price("BTCUSDT").await.unwrap_err();
    assert_eq!(err.kind, QuoteFailureKind::Venue);
    assert!(err.detail.contains("10001"));
}

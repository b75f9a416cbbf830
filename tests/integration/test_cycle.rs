//! End-to-end cycle and monitor tests against mock venues

use crate::common;
use cross_venue_arbitrage::{
    ledger::{BucketKey, TradeLedger},
    strategy::{ArbitrageCycle, ArbitrageMonitor, CycleOutcome},
};
use tempfile::tempdir;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn monitor_records_a_trade_per_cycle() {
    let binance = MockServer::start().await;
    let bybit = MockServer::start().await;
    common::mount_binance_price(&binance, "BTCUSDT", 50000.0).await;
    common::mount_bybit_price(&bybit, "BTCUSDT", 49900.0).await;

    let dir = tempdir().unwrap();
    let config = common::monitor_config(&binance.uri(), &bybit.uri(), dir.path());

    let mut monitor = ArbitrageMonitor::from_config(&config).unwrap();
    monitor.run(Some(2)).await.unwrap();

    let totals = monitor.ledger().aggregate(&BucketKey::Daily).unwrap();
    assert_eq!(totals.record_count(), 2);
    assert_eq!(totals.successful_count, 2);
    assert!(totals.total_profit > 0.0);

    // Live session totals match the durable replay
    assert_eq!(*monitor.ledger().session_totals(), totals);
}

#[tokio::test]
async fn tight_spread_leaves_ledger_empty() {
    let binance = MockServer::start().await;
    let bybit = MockServer::start().await;
    common::mount_binance_price(&binance, "BTCUSDT", 50001.0).await;
    common::mount_bybit_price(&bybit, "BTCUSDT", 50000.0).await;

    let dir = tempdir().unwrap();
    let config = common::monitor_config(&binance.uri(), &bybit.uri(), dir.path());

    let cycle = ArbitrageCycle::from_config(&config).unwrap();
    let mut ledger = TradeLedger::new(dir.path(), config.stake()).unwrap();
    let outcome = cycle.execute(&mut ledger).await.unwrap();

    assert!(matches!(outcome, CycleOutcome::NoOpportunity { .. }));
    assert!(!ledger.bucket_path(&BucketKey::Daily).exists());
}

#[tokio::test]
async fn venue_error_degrades_the_cycle() {
    let binance = MockServer::start().await;
    let bybit = MockServer::start().await;
    common::mount_binance_price(&binance, "BTCUSDT", 50000.0).await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&bybit)
        .await;

    let dir = tempdir().unwrap();
    let config = common::monitor_config(&binance.uri(), &bybit.uri(), dir.path());

    let cycle = ArbitrageCycle::from_config(&config).unwrap();
    let mut ledger = TradeLedger::new(dir.path(), config.stake()).unwrap();
    let outcome = cycle.execute(&mut ledger).await.unwrap();

    match outcome {
        CycleOutcome::QuoteFailure { venue, .. } => assert_eq!(venue, "bybit"),
        other => panic!("expected QuoteFailure, got {:?}", other),
    }
    assert!(!ledger.bucket_path(&BucketKey::Daily).exists());
}

#[tokio::test]
async fn recommendation_names_the_cheap_venue_as_buy_side() {
    let binance = MockServer::start().await;
    let bybit = MockServer::start().await;
    // Bybit is the expensive side this time
    common::mount_binance_price(&binance, "BTCUSDT", 49900.0).await;
    common::mount_bybit_price(&bybit, "BTCUSDT", 50000.0).await;

    let dir = tempdir().unwrap();
    let config = common::monitor_config(&binance.uri(), &bybit.uri(), dir.path());

    let cycle = ArbitrageCycle::from_config(&config).unwrap();
    let mut ledger = TradeLedger::new(dir.path(), config.stake()).unwrap();
    let outcome = cycle.execute(&mut ledger).await.unwrap();

    match outcome {
        CycleOutcome::Recorded { record } => {
            assert_eq!(record.recommendation, "Buy on binance and sell on bybit");
        }
        other => panic!("expected Recorded, got {:?}", other),
    }
}

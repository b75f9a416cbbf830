//! Ledger durability tests across reopens

use chrono::{Local, TimeZone};
use cross_venue_arbitrage::ledger::{BucketKey, TradeLedger, TradeRecord};
use tempfile::tempdir;

fn sample_record(profit: f64) -> TradeRecord {
    let at = Local.with_ymd_and_hms(2026, 8, 6, 14, 30, 5).unwrap();
    TradeRecord::new(at, 50000.0, 49900.0, profit, "Buy on bybit and sell on binance")
}

#[test]
fn replay_reconstructs_totals_after_reopen() {
    let dir = tempdir().unwrap();

    let live_totals = {
        let mut ledger = TradeLedger::new(dir.path(), 100.0).unwrap();
        for profit in [50.10, -3.25, 0.005] {
            ledger.append_current(&sample_record(profit)).unwrap();
        }
        *ledger.session_totals()
    };

    // A fresh ledger instance starts with zero session totals but replays
    // the durable sequence to the same figures
    let reopened = TradeLedger::new(dir.path(), 100.0).unwrap();
    assert_eq!(reopened.session_totals().record_count(), 0);

    let replayed = reopened.aggregate(&BucketKey::Daily).unwrap();
    assert_eq!(replayed, live_totals);
    assert_eq!(replayed.successful_count, 1);
    assert_eq!(replayed.failed_count, 2);
    assert_eq!(replayed.total_losses, 3.25);
}

#[test]
fn stake_is_counted_once_per_record() {
    let dir = tempdir().unwrap();
    let mut ledger = TradeLedger::new(dir.path(), 100.0).unwrap();

    for profit in [10.0, 20.0] {
        ledger.append_current(&sample_record(profit)).unwrap();
    }

    let totals = ledger.aggregate(&BucketKey::Daily).unwrap();
    assert_eq!(totals.amount_used, 200.0);
    assert_eq!(totals.net_profit(), 30.0 - 200.0);
}

#[test]
fn reset_empties_only_the_target_bucket() {
    let dir = tempdir().unwrap();
    let mut ledger = TradeLedger::new(dir.path(), 100.0).unwrap();

    ledger.append_current(&sample_record(50.0)).unwrap();
    let weekly = BucketKey::Weekly { week: 32 };
    assert_eq!(ledger.aggregate(&weekly).unwrap().record_count(), 1);

    ledger.reset(&BucketKey::Daily).unwrap();

    assert_eq!(ledger.aggregate(&BucketKey::Daily).unwrap().record_count(), 0);
    assert_eq!(ledger.aggregate(&weekly).unwrap().record_count(), 1);
}

//! Metrics registration and the optional Prometheus exporter

use crate::{ArbitrageError, Result};
use metrics::{describe_counter, Unit};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::info;

/// Cycles executed, including skipped and degraded ones
pub const CYCLES_TOTAL: &str = "arbitrage_cycles_total";

/// Cycles in which the price gap reached the detection threshold
pub const OPPORTUNITIES_TOTAL: &str = "arbitrage_opportunities_total";

/// Trade records appended to the ledger buckets
pub const RECORDS_APPENDED_TOTAL: &str = "arbitrage_records_appended_total";

/// Quote fetches that failed, labeled by venue
pub const QUOTE_FAILURES_TOTAL: &str = "arbitrage_quote_failures_total";

/// Cycles aborted by the stop-loss gate
pub const STOP_LOSS_TRIPS_TOTAL: &str = "arbitrage_stop_loss_trips_total";

/// Describe all counters with the installed recorder
pub fn describe() {
    describe_counter!(CYCLES_TOTAL, Unit::Count, "Cycles executed");
    describe_counter!(
        OPPORTUNITIES_TOTAL,
        Unit::Count,
        "Cycles whose price gap reached the detection threshold"
    );
    describe_counter!(
        RECORDS_APPENDED_TOTAL,
        Unit::Count,
        "Trade records appended to the ledger"
    );
    describe_counter!(QUOTE_FAILURES_TOTAL, Unit::Count, "Failed quote fetches");
    describe_counter!(
        STOP_LOSS_TRIPS_TOTAL,
        Unit::Count,
        "Cycles aborted by the stop-loss gate"
    );
}

/// Install the Prometheus exporter listening on `addr` and describe the
/// counters. Counters are cheap no-ops when this is never called.
pub fn install_exporter(addr: &str) -> Result<()> {
    let addr: SocketAddr = addr.parse().map_err(|e| {
        ArbitrageError::Config(format!("Invalid metrics listen address '{}': {}", addr, e))
    })?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| ArbitrageError::Config(format!("Failed to install metrics exporter: {}", e)))?;

    describe();
    info!(%addr, "metrics exporter listening");
    Ok(())
}

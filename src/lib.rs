//! Cross-Venue Arbitrage Monitor
//!
//! Polls live quotes for one asset pair from two trading venues, detects
//! fee-adjusted arbitrage opportunities, sizes a hypothetical position and
//! records every decision into rotating daily/weekly/monthly trade ledgers.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod connectors;
pub mod ledger;
pub mod strategy;
pub mod trading;
pub mod utils;

// Re-export commonly used types
pub use config::MonitorConfig;
pub use connectors::{Quote, QuoteSource, VenueKind};
pub use ledger::{BucketKey, LedgerAggregate, TradeLedger, TradeRecord};
pub use strategy::{ArbitrageCycle, ArbitrageMonitor, CycleOutcome};
pub use trading::{NoopOrderExecutor, OrderExecutor};

/// Result type used throughout the application
pub type Result<T> = anyhow::Result<T>;

/// Common error types for the arbitrage monitor
#[derive(thiserror::Error, Debug)]
pub enum ArbitrageError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Position sizing was asked for an allocation outside [0, 100] percent
    #[error("Invalid allocation: {0}% is outside the [0, 100] range")]
    InvalidAllocation(f64),

    /// A trade record could not be durably appended to a ledger bucket.
    /// Never a soft failure: a dropped record corrupts the replay aggregates.
    #[error("Ledger write failure on {path}: {source}")]
    LedgerWrite {
        /// Bucket file that rejected the append
        path: std::path::PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A ledger bucket contains a row that cannot be replayed
    #[error("Ledger parse failure in {path} at line {line}: {detail}")]
    LedgerParse {
        /// Bucket file being replayed
        path: std::path::PathBuf,
        /// 1-based line number of the offending row
        line: usize,
        /// What was wrong with the row
        detail: String,
    },
}

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info() {
        assert!(!VERSION.is_empty());
        assert!(!APP_NAME.is_empty());
    }

    #[test]
    fn test_error_display() {
        let err = ArbitrageError::InvalidAllocation(150.0);
        assert!(err.to_string().contains("150"));

        let err = ArbitrageError::Config("missing venue".to_string());
        assert!(err.to_string().contains("missing venue"));
    }
}

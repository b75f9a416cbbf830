//! Configuration management module

pub mod settings;

pub use settings::*;

use crate::{ArbitrageError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Main configuration structure for the arbitrage monitor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Venue pair being monitored
    pub pair: PairConfig,
    /// Strategy parameters
    pub strategy: StrategyConfig,
    /// Risk control parameters
    pub risk: RiskConfig,
    /// Scheduler parameters
    pub scheduler: SchedulerConfig,
    /// Trade ledger parameters
    pub ledger: LedgerConfig,
    /// Monitoring configuration
    pub monitoring: MonitoringConfig,
    /// Per-venue settings, keyed by venue id
    pub venues: HashMap<String, VenueConfig>,
}

/// Venue pair configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairConfig {
    /// Trading symbol, e.g. BTCUSDT
    pub symbol: String,
    /// First venue id (must exist in the venues table)
    pub venue_a: String,
    /// Second venue id (must exist in the venues table)
    pub venue_b: String,
}

/// Strategy parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Minimum price gap in currency units to treat as an opportunity
    pub spread_threshold: f64,
    /// Hypothetical trading capital in currency units
    pub capital: f64,
    /// Capital allocation per trade, in percent (0 to 100)
    pub allocation_percent: f64,
}

/// Risk control parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Stop-loss threshold in currency units; a computed profit at or below
    /// this value aborts the cycle
    pub stop_loss: f64,
}

/// Scheduler parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Cycle interval in seconds; the practical minimum is bounded by the
    /// venues' public rate limits
    pub interval_secs: u64,
    /// Per-venue quote fetch timeout in seconds
    pub fetch_timeout_secs: u64,
}

/// Trade ledger parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Directory holding the bucket files
    pub directory: std::path::PathBuf,
}

/// Monitoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    /// Enable the Prometheus metrics exporter
    pub enable_metrics: bool,
    /// Listen address for the metrics exporter
    pub metrics_listen_addr: String,
}

/// Individual venue configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueConfig {
    /// Taker fee rate as a fraction, e.g. 0.001 for 0.1%
    pub fee_rate: f64,
    /// REST API base URL
    pub rest_api_url: String,
    /// Venue-specific symbol override (e.g. KuCoin quotes BTC-USDT)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl MonitorConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ArbitrageError::Config(format!("Failed to read config file: {}", e)))?;

        let config: MonitorConfig = toml::from_str(&content)
            .map_err(|e| ArbitrageError::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ConfigValidator::validate_symbol(&self.pair.symbol)?;

        if self.pair.venue_a == self.pair.venue_b {
            return Err(ArbitrageError::Config(
                "Venue pair must name two different venues".to_string(),
            )
            .into());
        }

        for venue in [&self.pair.venue_a, &self.pair.venue_b] {
            let venue_config = self.venues.get(venue).ok_or_else(|| {
                ArbitrageError::Config(format!("Venue '{}' has no [venues.{}] table", venue, venue))
            })?;

            venue_config.validate(venue)?;
        }

        ConfigValidator::validate_positive(self.strategy.spread_threshold, "spread_threshold")?;
        ConfigValidator::validate_positive(self.strategy.capital, "capital")?;
        ConfigValidator::validate_allocation(self.strategy.allocation_percent, "allocation_percent")?;

        if self.scheduler.interval_secs == 0 {
            return Err(
                ArbitrageError::Config("Scheduler interval must be at least 1 second".to_string())
                    .into(),
            );
        }

        if self.scheduler.fetch_timeout_secs == 0 {
            return Err(
                ArbitrageError::Config("Quote fetch timeout must be at least 1 second".to_string())
                    .into(),
            );
        }

        Ok(())
    }

    /// Fee schedule for the configured pair: (venue id, fee rate) for each leg
    pub fn fee_schedule(&self) -> Result<[(String, f64); 2]> {
        let mut legs = Vec::with_capacity(2);
        for venue in [&self.pair.venue_a, &self.pair.venue_b] {
            let venue_config = self.venues.get(venue).ok_or_else(|| {
                ArbitrageError::Config(format!("Venue '{}' has no [venues.{}] table", venue, venue))
            })?;
            legs.push((venue.clone(), venue_config.fee_rate));
        }
        Ok([legs[0].clone(), legs[1].clone()])
    }

    /// Per-trade stake implied by the strategy settings
    pub fn stake(&self) -> f64 {
        self.strategy.capital * self.strategy.allocation_percent / 100.0
    }
}

impl VenueConfig {
    fn validate(&self, venue: &str) -> Result<()> {
        ConfigValidator::validate_fee_rate(self.fee_rate, &format!("{} fee_rate", venue))?;
        ConfigValidator::validate_url(&self.rest_api_url, &format!("{} rest_api_url", venue))?;

        if let Some(symbol) = &self.symbol {
            ConfigValidator::validate_symbol(symbol)?;
        }

        Ok(())
    }

    /// Symbol to quote on this venue, falling back to the pair symbol
    pub fn symbol_or<'a>(&'a self, pair_symbol: &'a str) -> &'a str {
        self.symbol.as_deref().unwrap_or(pair_symbol)
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        let mut venues = HashMap::new();
        venues.insert(
            "binance".to_string(),
            VenueConfig {
                fee_rate: ConfigDefaults::FEE_RATE,
                rest_api_url: "https://api.binance.com".to_string(),
                symbol: None,
            },
        );
        venues.insert(
            "bybit".to_string(),
            VenueConfig {
                fee_rate: ConfigDefaults::FEE_RATE,
                rest_api_url: "https://api.bybit.com".to_string(),
                symbol: None,
            },
        );

        Self {
            pair: PairConfig {
                symbol: "BTCUSDT".to_string(),
                venue_a: "binance".to_string(),
                venue_b: "bybit".to_string(),
            },
            strategy: StrategyConfig {
                spread_threshold: ConfigDefaults::SPREAD_THRESHOLD,
                capital: ConfigDefaults::CAPITAL,
                allocation_percent: ConfigDefaults::ALLOCATION_PERCENT,
            },
            risk: RiskConfig {
                stop_loss: ConfigDefaults::STOP_LOSS,
            },
            scheduler: SchedulerConfig {
                interval_secs: ConfigDefaults::INTERVAL_SECS,
                fetch_timeout_secs: ConfigDefaults::FETCH_TIMEOUT_SECS,
            },
            ledger: LedgerConfig {
                directory: ConfigDefaults::LEDGER_DIRECTORY.into(),
            },
            monitoring: MonitoringConfig {
                enable_metrics: false,
                metrics_listen_addr: "127.0.0.1:9000".to_string(),
            },
            venues,
        }
    }
}

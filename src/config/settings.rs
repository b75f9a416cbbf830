//! Settings validation utilities and documented defaults

use crate::{ArbitrageError, Result};

/// Configuration validation utilities
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a symbol format
    pub fn validate_symbol(symbol: &str) -> Result<()> {
        if symbol.is_empty() {
            return Err(ArbitrageError::Config("Symbol cannot be empty".to_string()).into());
        }

        if !symbol.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(ArbitrageError::Config(
                "Symbol must contain only alphanumeric characters or '-'".to_string(),
            )
            .into());
        }

        Ok(())
    }

    /// Validate a capital allocation percentage (0 to 100)
    pub fn validate_allocation(value: f64, name: &str) -> Result<()> {
        if !(0.0..=100.0).contains(&value) {
            return Err(ArbitrageError::Config(format!(
                "{} must be between 0 and 100 percent",
                name
            ))
            .into());
        }
        Ok(())
    }

    /// Validate a fee rate fraction (0.0 inclusive to 1.0 exclusive)
    pub fn validate_fee_rate(value: f64, name: &str) -> Result<()> {
        if !(0.0..1.0).contains(&value) {
            return Err(ArbitrageError::Config(format!(
                "{} must be a fraction in [0.0, 1.0)",
                name
            ))
            .into());
        }
        Ok(())
    }

    /// Validate a positive value
    pub fn validate_positive(value: f64, name: &str) -> Result<()> {
        if value <= 0.0 {
            return Err(ArbitrageError::Config(format!("{} must be positive", name)).into());
        }
        Ok(())
    }

    /// Validate a URL format
    pub fn validate_url(url: &str, name: &str) -> Result<()> {
        if url.is_empty() {
            return Err(ArbitrageError::Config(format!("{} cannot be empty", name)).into());
        }

        url::Url::parse(url)
            .map_err(|e| ArbitrageError::Config(format!("{} is not a valid URL: {}", name, e)))?;

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(
                ArbitrageError::Config(format!("{} must be an http(s) URL", name)).into(),
            );
        }

        Ok(())
    }
}

/// Configuration defaults.
/// Starting points to tune per deployment, not authoritative behavior.
pub struct ConfigDefaults;

impl ConfigDefaults {
    /// Default price-gap threshold in currency units for opportunity detection
    pub const SPREAD_THRESHOLD: f64 = 10.0;

    /// Default hypothetical trading capital in currency units
    pub const CAPITAL: f64 = 10_000.0;

    /// Default capital allocation per trade, in percent
    pub const ALLOCATION_PERCENT: f64 = 1.0;

    /// Default stop-loss threshold in currency units (a loss at or below trips it)
    pub const STOP_LOSS: f64 = -5.0;

    /// Default per-venue taker fee rate
    pub const FEE_RATE: f64 = 0.001;

    /// Default scheduler interval in seconds
    pub const INTERVAL_SECS: u64 = 10;

    /// Default per-venue quote fetch timeout in seconds
    pub const FETCH_TIMEOUT_SECS: u64 = 5;

    /// Default ledger directory
    pub const LEDGER_DIRECTORY: &'static str = "ledger";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_validation() {
        assert!(ConfigValidator::validate_symbol("BTCUSDT").is_ok());
        // KuCoin-style symbols carry a dash
        assert!(ConfigValidator::validate_symbol("BTC-USDT").is_ok());
        assert!(ConfigValidator::validate_symbol("").is_err());
        assert!(ConfigValidator::validate_symbol("BTC/USDT").is_err());
    }

    #[test]
    fn test_allocation_validation() {
        assert!(ConfigValidator::validate_allocation(0.0, "test").is_ok());
        assert!(ConfigValidator::validate_allocation(1.0, "test").is_ok());
        assert!(ConfigValidator::validate_allocation(100.0, "test").is_ok());
        assert!(ConfigValidator::validate_allocation(-0.1, "test").is_err());
        assert!(ConfigValidator::validate_allocation(150.0, "test").is_err());
    }

    #[test]
    fn test_fee_rate_validation() {
        assert!(ConfigValidator::validate_fee_rate(0.0, "test").is_ok());
        assert!(ConfigValidator::validate_fee_rate(0.001, "test").is_ok());
        assert!(ConfigValidator::validate_fee_rate(1.0, "test").is_err());
        assert!(ConfigValidator::validate_fee_rate(-0.001, "test").is_err());
    }

    #[test]
    fn test_positive_validation() {
        assert!(ConfigValidator::validate_positive(1.0, "test").is_ok());
        assert!(ConfigValidator::validate_positive(0.0, "test").is_err());
        assert!(ConfigValidator::validate_positive(-1.0, "test").is_err());
    }

    #[test]
    fn test_url_validation() {
        assert!(ConfigValidator::validate_url("https://api.example.com", "test").is_ok());
        assert!(ConfigValidator::validate_url("http://localhost:8080", "test").is_ok());
        assert!(ConfigValidator::validate_url("", "test").is_err());
        assert!(ConfigValidator::validate_url("wss://stream.example.com", "test").is_err());
        assert!(ConfigValidator::validate_url("invalid-url", "test").is_err());
    }
}

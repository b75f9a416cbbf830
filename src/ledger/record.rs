//! Trade records and their durable row encoding

use chrono::{DateTime, Local};
use std::fmt;

/// Fixed column header written once per bucket file
pub const HEADER: &str = "Time,PriceA,PriceB,Difference,Profit,Result,Recommendation";

/// Minimum profit in currency units for a decision to count as successful
pub const MIN_VIABLE_PROFIT: f64 = 0.01;

/// Outcome classification of a recorded decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeOutcome {
    /// Profit reached the minimum viable threshold
    Successful,
    /// Profit fell short of the minimum viable threshold
    Failed,
}

impl TradeOutcome {
    /// Classify a profit figure
    pub fn from_profit(profit: f64) -> Self {
        if profit >= MIN_VIABLE_PROFIT {
            TradeOutcome::Successful
        } else {
            TradeOutcome::Failed
        }
    }
}

impl fmt::Display for TradeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeOutcome::Successful => write!(f, "Successful"),
            TradeOutcome::Failed => write!(f, "Failed"),
        }
    }
}

/// One recorded arbitrage decision.
/// Append-only: one record per cycle in which an opportunity passed the
/// risk gate.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    /// Wall-clock time the decision was recorded
    pub recorded_at: DateTime<Local>,
    /// Price observed on the first venue of the pair
    pub price_a: f64,
    /// Price observed on the second venue of the pair
    pub price_b: f64,
    /// Absolute price gap
    pub difference: f64,
    /// Fee-adjusted profit for the sized position
    pub profit: f64,
    /// Outcome classification, derived from profit
    pub outcome: TradeOutcome,
    /// Which venue to buy on and which to sell on
    pub recommendation: String,
}

impl TradeRecord {
    /// Build a record from cycle results.
    ///
    /// Monetary figures are rounded to currency precision here so the durable
    /// row is a lossless rendering of the record: replaying a bucket then
    /// yields exactly the totals accumulated live.
    pub fn new(
        recorded_at: DateTime<Local>,
        price_a: f64,
        price_b: f64,
        profit: f64,
        recommendation: impl Into<String>,
    ) -> Self {
        let profit = round_to_cents(profit);
        Self {
            recorded_at,
            price_a: round_to_cents(price_a),
            price_b: round_to_cents(price_b),
            difference: round_to_cents((price_a - price_b).abs()),
            profit,
            outcome: TradeOutcome::from_profit(profit),
            recommendation: recommendation.into(),
        }
    }

    /// Encode the record as one durable row (without trailing newline)
    pub fn to_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{}",
            self.recorded_at.format("%Y-%m-%d %H:%M:%S"),
            format_usd(self.price_a),
            format_usd(self.price_b),
            format_usd(self.difference),
            format_usd(self.profit),
            self.outcome,
            self.recommendation
        )
    }
}

/// Render a monetary amount with a currency prefix and two decimals
pub fn format_usd(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Extract the profit field from a durable row.
/// The trailing recommendation field is free text, so the split is bounded
/// at seven fields.
pub(crate) fn profit_from_row(row: &str) -> Result<f64, String> {
    let fields: Vec<&str> = row.splitn(7, ',').collect();
    if fields.len() != 7 {
        return Err(format!("expected 7 fields, found {}", fields.len()));
    }

    let raw = fields[4].trim();
    let raw = raw
        .strip_prefix('$')
        .ok_or_else(|| format!("profit field '{}' missing currency prefix", raw))?;

    raw.parse()
        .map_err(|_| format!("non-numeric profit field '{}'", raw))
}

fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

//! Risk controls applied before a decision is recorded

/// Pure risk predicates.
/// Stop-loss is the more severe signal and is always checked first.
pub struct RiskGate;

impl RiskGate {
    /// True iff the computed profit-or-loss is at or below the stop-loss
    /// threshold (threshold is a currency amount, typically negative)
    pub fn trips_stop_loss(profit_or_loss: f64, threshold: f64) -> bool {
        profit_or_loss <= threshold
    }

    /// True iff the capital on hand cannot cover the required quantity
    pub fn has_insufficient_funds(capital: f64, required_quantity: f64) -> bool {
        capital < required_quantity
    }
}

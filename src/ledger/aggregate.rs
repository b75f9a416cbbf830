//! Running totals folded from a bucket's record sequence

use crate::ledger::record::{format_usd, MIN_VIABLE_PROFIT};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Totals for one ledger bucket.
///
/// Zero-initialized, mutated exactly once per appended record and never
/// decremented. Reconstructible at any time by replaying the bucket's
/// durable sequence.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LedgerAggregate {
    /// Records whose profit reached the minimum viable threshold
    pub successful_count: u64,
    /// Records whose profit fell short of the minimum viable threshold
    pub failed_count: u64,
    /// Sum of all recorded profit figures, wins and losses alike
    pub total_profit: f64,
    /// Sum of the absolute values of negative-profit records
    pub total_losses: f64,
    /// Stake committed across all recorded decisions
    pub amount_used: f64,
}

impl LedgerAggregate {
    /// Fold one recorded profit figure into the totals
    pub fn apply(&mut self, profit: f64, stake: f64) {
        if profit >= MIN_VIABLE_PROFIT {
            self.successful_count += 1;
        } else {
            self.failed_count += 1;
            if profit < 0.0 {
                self.total_losses += -profit;
            }
        }

        self.total_profit += profit;
        self.amount_used += stake;
    }

    /// Number of records folded in
    pub fn record_count(&self) -> u64 {
        self.successful_count + self.failed_count
    }

    /// Total profit net of the stake committed
    pub fn net_profit(&self) -> f64 {
        self.total_profit - self.amount_used
    }
}

impl fmt::Display for LedgerAggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} successful / {} failed, profit {}, losses {}, stake used {}, net {}",
            self.successful_count,
            self.failed_count,
            format_usd(self.total_profit),
            format_usd(self.total_losses),
            format_usd(self.amount_used),
            format_usd(self.net_profit())
        )
    }
}

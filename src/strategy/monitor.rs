//! Fixed-interval monitor loop driving the arbitrage cycle

use crate::{
    config::MonitorConfig,
    ledger::TradeLedger,
    strategy::{ArbitrageCycle, CycleOutcome},
    utils::metrics::CYCLES_TOTAL,
    Result,
};
use chrono::Local;
use metrics::increment_counter;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

/// Runs cycles strictly sequentially on a fixed interval.
/// Overrun cycles are skipped, never queued.
pub struct ArbitrageMonitor {
    cycle: ArbitrageCycle,
    ledger: TradeLedger,
    interval: Duration,
}

impl ArbitrageMonitor {
    /// Create a monitor from prepared parts
    pub fn new(cycle: ArbitrageCycle, ledger: TradeLedger, interval: Duration) -> Self {
        Self {
            cycle,
            ledger,
            interval,
        }
    }

    /// Build the monitor, its cycle and its ledger from configuration
    pub fn from_config(config: &MonitorConfig) -> Result<Self> {
        let cycle = ArbitrageCycle::from_config(config)?;
        let ledger = TradeLedger::new(&config.ledger.directory, config.stake())?;
        Ok(Self::new(
            cycle,
            ledger,
            Duration::from_secs(config.scheduler.interval_secs),
        ))
    }

    /// Run until `max_cycles` cycles have executed (forever when `None`).
    ///
    /// No single cycle's failure terminates the loop: failures are converted
    /// to log output and the next tick proceeds. A failed ledger append
    /// leaves the ledger suspended; it re-probes its store before the next
    /// append and keeps failing loudly until the store is writable again.
    pub async fn run(&mut self, max_cycles: Option<u64>) -> Result<()> {
        info!(
            interval_secs = self.interval.as_secs(),
            "starting arbitrage monitor"
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut executed: u64 = 0;
        loop {
            ticker.tick().await;
            increment_counter!(CYCLES_TOTAL);

            match self.cycle.execute(&mut self.ledger).await {
                Ok(outcome) => self.observe(&outcome),
                Err(e) => error!(error = %e, "cycle failed"),
            }

            executed += 1;
            if let Some(limit) = max_cycles {
                if executed >= limit {
                    break;
                }
            }
        }

        info!(cycles = executed, "arbitrage monitor stopped");
        Ok(())
    }

    /// Ledger owned by this monitor
    pub fn ledger(&self) -> &TradeLedger {
        &self.ledger
    }

    fn observe(&self, outcome: &CycleOutcome) {
        match outcome {
            CycleOutcome::Recorded { record } => {
                info!(
                    profit = record.profit,
                    difference = record.difference,
                    outcome = %record.outcome,
                    recommendation = %record.recommendation,
                    "trade decision recorded"
                );
                self.log_running_totals();
            }
            CycleOutcome::NoOpportunity {
                price_a,
                price_b,
                difference,
            } => {
                debug!(price_a, price_b, difference, "no opportunity");
            }
            CycleOutcome::StopLoss { projected_profit } => {
                warn!(projected_profit, "cycle ended on stop-loss");
            }
            CycleOutcome::InsufficientFunds { capital, required } => {
                warn!(capital, required, "cycle ended on insufficient funds");
            }
            CycleOutcome::QuoteFailure { venue, kind } => {
                warn!(venue = %venue, kind = %kind, "cycle ended on quote failure");
            }
        }
    }

    fn log_running_totals(&self) {
        match self.ledger.aggregate_current(Local::now()) {
            Ok(aggregates) => {
                for (key, totals) in aggregates {
                    info!(period = key.period(), totals = %totals, "running totals");
                }
            }
            Err(e) => error!(error = %e, "failed to replay ledger totals"),
        }
    }
}

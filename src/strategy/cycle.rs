//! One arbitrage decision cycle

use crate::{
    config::MonitorConfig,
    connectors::{Quote, QuoteError, QuoteFailureKind, QuoteSource, QuoteSourceFactory},
    ledger::{TradeLedger, TradeRecord},
    strategy::{
        evaluator::{self, TradeDirection},
        PositionSizer, RiskGate,
    },
    utils::metrics::{
        OPPORTUNITIES_TOTAL, QUOTE_FAILURES_TOTAL, RECORDS_APPENDED_TOTAL, STOP_LOSS_TRIPS_TOTAL,
    },
    ArbitrageError, Result,
};
use chrono::Local;
use metrics::increment_counter;
use std::time::Duration;
use tracing::{debug, info, warn};

/// One leg of the monitored pair: a venue, its quoting symbol, its fee rate
/// and the source of its prices
pub struct CycleLeg {
    venue: String,
    symbol: String,
    fee_rate: f64,
    source: Box<dyn QuoteSource + Send + Sync>,
}

impl CycleLeg {
    /// Assemble a leg from its parts
    pub fn new(
        venue: impl Into<String>,
        symbol: impl Into<String>,
        fee_rate: f64,
        source: Box<dyn QuoteSource + Send + Sync>,
    ) -> Self {
        Self {
            venue: venue.into(),
            symbol: symbol.into(),
            fee_rate,
            source,
        }
    }

    /// Venue id of this leg
    pub fn venue(&self) -> &str {
        &self.venue
    }
}

/// Strategy parameters for a cycle
#[derive(Debug, Clone, Copy)]
pub struct CycleParams {
    /// Minimum price gap treated as an opportunity
    pub spread_threshold: f64,
    /// Hypothetical trading capital
    pub capital: f64,
    /// Capital allocation per trade, in percent
    pub allocation_percent: f64,
    /// Stop-loss threshold in currency units
    pub stop_loss: f64,
    /// Per-venue quote fetch timeout
    pub fetch_timeout: Duration,
}

impl CycleParams {
    /// Extract the cycle parameters from the monitor configuration
    pub fn from_config(config: &MonitorConfig) -> Self {
        Self {
            spread_threshold: config.strategy.spread_threshold,
            capital: config.strategy.capital,
            allocation_percent: config.strategy.allocation_percent,
            stop_loss: config.risk.stop_loss,
            fetch_timeout: Duration::from_secs(config.scheduler.fetch_timeout_secs),
        }
    }
}

/// Structured outcome of one cycle, emitted for observability.
/// Only `Recorded` appends to the ledger.
#[derive(Debug)]
pub enum CycleOutcome {
    /// An opportunity passed the risk gate and was recorded
    Recorded {
        /// The record appended to the current buckets
        record: TradeRecord,
    },
    /// Price gap below threshold, or fees consumed the spread
    NoOpportunity {
        /// Price on the first venue
        price_a: f64,
        /// Price on the second venue
        price_b: f64,
        /// Absolute price gap
        difference: f64,
    },
    /// The computed figure tripped the stop-loss; cycle aborted
    StopLoss {
        /// Profit-or-loss figure that tripped the gate
        projected_profit: f64,
    },
    /// Capital cannot cover the sized position; cycle aborted
    InsufficientFunds {
        /// Capital on hand
        capital: f64,
        /// Quantity the position sizer asked for
        required: f64,
    },
    /// A venue quote could not be fetched; degraded, nothing recorded
    QuoteFailure {
        /// Venue whose fetch failed
        venue: String,
        /// Failure classification
        kind: QuoteFailureKind,
    },
}

/// Orchestrates one tick: fetch quotes, evaluate, risk-gate, record.
/// Holds no state across cycles; everything durable lives in the ledger.
pub struct ArbitrageCycle {
    params: CycleParams,
    legs: [CycleLeg; 2],
}

impl ArbitrageCycle {
    /// Create a cycle from parameters and two prepared legs
    pub fn new(params: CycleParams, legs: [CycleLeg; 2]) -> Self {
        Self { params, legs }
    }

    /// Build the cycle and its quote sources from configuration
    pub fn from_config(config: &MonitorConfig) -> Result<Self> {
        let params = CycleParams::from_config(config);
        let leg_a = Self::build_leg(config, &config.pair.venue_a, params.fetch_timeout)?;
        let leg_b = Self::build_leg(config, &config.pair.venue_b, params.fetch_timeout)?;
        Ok(Self::new(params, [leg_a, leg_b]))
    }

    fn build_leg(config: &MonitorConfig, venue: &str, timeout: Duration) -> Result<CycleLeg> {
        let venue_config = config.venues.get(venue).ok_or_else(|| {
            ArbitrageError::Config(format!("Venue '{}' has no [venues.{}] table", venue, venue))
        })?;

        let source = QuoteSourceFactory::create(venue, venue_config, timeout)?;
        Ok(CycleLeg::new(
            venue,
            venue_config.symbol_or(&config.pair.symbol),
            venue_config.fee_rate,
            source,
        ))
    }

    /// Execute one cycle against the ledger.
    ///
    /// All expected conditions come back as a `CycleOutcome`; an `Err` is
    /// reserved for failures the caller must not ignore (ledger writes,
    /// invalid allocation).
    pub async fn execute(&self, ledger: &mut TradeLedger) -> Result<CycleOutcome> {
        // Fetching quotes
        let (quote_a, quote_b) = match self.fetch_quotes().await {
            Ok(quotes) => quotes,
            Err(outcome) => return Ok(outcome),
        };

        info!(
            venue_a = %self.legs[0].venue,
            price_a = quote_a.price,
            venue_b = %self.legs[1].venue,
            price_b = quote_b.price,
            "quote snapshot"
        );

        // Evaluating
        if !evaluator::detect(quote_a.price, quote_b.price, self.params.spread_threshold) {
            debug!(
                difference = (quote_a.price - quote_b.price).abs(),
                threshold = self.params.spread_threshold,
                "price gap below threshold"
            );
            return Ok(CycleOutcome::NoOpportunity {
                price_a: quote_a.price,
                price_b: quote_b.price,
                difference: (quote_a.price - quote_b.price).abs(),
            });
        }

        increment_counter!(OPPORTUNITIES_TOTAL);

        let quantity = PositionSizer::size(self.params.capital, self.params.allocation_percent)?;
        let evaluation = evaluator::evaluate_profit(
            quote_a.price,
            quote_b.price,
            quantity,
            self.legs[0].fee_rate,
            self.legs[1].fee_rate,
        );

        let Some(direction) = evaluation.direction else {
            debug!(
                difference = evaluation.price_difference,
                "fees consume the spread, no venue dominates"
            );
            return Ok(CycleOutcome::NoOpportunity {
                price_a: quote_a.price,
                price_b: quote_b.price,
                difference: evaluation.price_difference,
            });
        };

        // Risk checking
        if let Some(outcome) = apply_risk_gate(
            evaluation.profit,
            self.params.stop_loss,
            self.params.capital,
            quantity,
        ) {
            return Ok(outcome);
        }

        // Recording
        let record = TradeRecord::new(
            Local::now(),
            quote_a.price,
            quote_b.price,
            evaluation.profit,
            self.recommendation(direction),
        );
        ledger.append_current(&record)?;
        increment_counter!(RECORDS_APPENDED_TOTAL);

        Ok(CycleOutcome::Recorded { record })
    }

    async fn fetch_quotes(&self) -> std::result::Result<(Quote, Quote), CycleOutcome> {
        let (result_a, result_b) = tokio::join!(
            self.fetch_leg(&self.legs[0]),
            self.fetch_leg(&self.legs[1])
        );

        match (result_a, result_b) {
            (Ok(quote_a), Ok(quote_b)) => Ok((quote_a, quote_b)),
            (Err(error), _) | (_, Err(error)) => {
                increment_counter!(QUOTE_FAILURES_TOTAL, "venue" => error.venue.clone());
                Err(CycleOutcome::QuoteFailure {
                    venue: error.venue,
                    kind: error.kind,
                })
            }
        }
    }

    async fn fetch_leg(&self, leg: &CycleLeg) -> std::result::Result<Quote, QuoteError> {
        let fetched =
            tokio::time::timeout(self.params.fetch_timeout, leg.source.latest_price(&leg.symbol))
                .await
                .unwrap_or_else(|_| {
                    Err(QuoteError::network(
                        &leg.venue,
                        format!(
                            "quote fetch timed out after {}s",
                            self.params.fetch_timeout.as_secs()
                        ),
                    ))
                });

        if let Err(error) = &fetched {
            // Both kinds skip the cycle; the log keeps them distinguishable
            match error.kind {
                QuoteFailureKind::Network => {
                    warn!(venue = %error.venue, detail = %error.detail, "network failure fetching quote")
                }
                QuoteFailureKind::Venue => {
                    warn!(venue = %error.venue, detail = %error.detail, "venue returned unusable quote")
                }
            }
        }

        fetched
    }

    fn recommendation(&self, direction: TradeDirection) -> String {
        let (buy, sell) = match direction {
            TradeDirection::BuySecondSellFirst => (&self.legs[1].venue, &self.legs[0].venue),
            TradeDirection::BuyFirstSellSecond => (&self.legs[0].venue, &self.legs[1].venue),
        };
        format!("Buy on {} and sell on {}", buy, sell)
    }
}

/// Apply the risk gate to an evaluated opportunity.
/// Stop-loss is checked strictly before insufficient funds.
fn apply_risk_gate(
    profit: f64,
    stop_loss: f64,
    capital: f64,
    quantity: f64,
) -> Option<CycleOutcome> {
    if RiskGate::trips_stop_loss(profit, stop_loss) {
        warn!(profit, threshold = stop_loss, "stop-loss tripped, cycle aborted");
        increment_counter!(STOP_LOSS_TRIPS_TOTAL);
        return Some(CycleOutcome::StopLoss {
            projected_profit: profit,
        });
    }

    if RiskGate::has_insufficient_funds(capital, quantity) {
        warn!(capital, required = quantity, "insufficient funds, cycle aborted");
        return Some(CycleOutcome::InsufficientFunds {
            capital,
            required: quantity,
        });
    }

    None
}

//! Arbitrage strategy components

pub mod cycle;
pub mod evaluator;
pub mod monitor;
pub mod position;
pub mod risk;

pub use cycle::{ArbitrageCycle, CycleLeg, CycleOutcome, CycleParams};
pub use evaluator::{OpportunityResult, TradeDirection};
pub use monitor::ArbitrageMonitor;
pub use position::PositionSizer;
pub use risk::RiskGate;

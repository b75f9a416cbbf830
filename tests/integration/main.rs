//! Integration tests for the cross-venue arbitrage monitor

mod common;
mod test_cycle;
mod test_ledger;
mod test_quote_sources;

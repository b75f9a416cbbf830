//! Fee-adjusted opportunity arithmetic

/// Which way to trade a detected opportunity.
/// Derived from the branch taken during evaluation, never from re-comparing
/// prices afterwards, so equal post-fee prices cannot produce an
/// inconsistent recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeDirection {
    /// Buy on the second venue of the pair, sell on the first
    BuySecondSellFirst,
    /// Buy on the first venue of the pair, sell on the second
    BuyFirstSellSecond,
}

/// Result of evaluating one pair of prices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpportunityResult {
    /// Fee-adjusted profit for the sized position; zero when no venue
    /// dominates after fees
    pub profit: f64,
    /// Absolute price gap between the venues
    pub price_difference: f64,
    /// Trade direction, absent when no venue dominates
    pub direction: Option<TradeDirection>,
}

/// An opportunity exists iff the absolute price gap reaches `threshold`
pub fn detect(price_a: f64, price_b: f64, threshold: f64) -> bool {
    (price_a - price_b).abs() >= threshold
}

/// Trading fee for a fill at `price`: `price × fee_rate`, rounded to
/// currency precision before any comparison
pub fn calculate_fee(price: f64, fee_rate: f64) -> f64 {
    round_to_cents(price * fee_rate)
}

/// Evaluate the fee-adjusted profit of trading `quantity` across the pair.
///
/// A venue dominates when its price exceeds the other venue's price plus
/// the fee paid there; the profit discounts the buy price by the buy
/// venue's fee rate.
pub fn evaluate_profit(
    price_a: f64,
    price_b: f64,
    quantity: f64,
    fee_rate_a: f64,
    fee_rate_b: f64,
) -> OpportunityResult {
    let fee_a = calculate_fee(price_a, fee_rate_a);
    let fee_b = calculate_fee(price_b, fee_rate_b);
    let price_difference = (price_a - price_b).abs();

    if price_a > price_b + fee_b {
        // Buy on the second venue, sell on the first
        let profit = (price_a - price_b * (1.0 + fee_rate_b)) * quantity;
        OpportunityResult {
            profit,
            price_difference,
            direction: Some(TradeDirection::BuySecondSellFirst),
        }
    } else if price_b > price_a + fee_a {
        // Buy on the first venue, sell on the second
        let profit = (price_b - price_a * (1.0 + fee_rate_a)) * quantity;
        OpportunityResult {
            profit,
            price_difference,
            direction: Some(TradeDirection::BuyFirstSellSecond),
        }
    } else {
        // No venue dominates after fees
        OpportunityResult {
            profit: 0.0,
            price_difference,
            direction: None,
        }
    }
}

fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

//! Order execution capability
//!
//! The monitor records decisions; it never routes orders. This seam exists
//! so live execution can be wired in later without touching the cycle.
//! Trading real funds requires implementing this trait against the venues'
//! authenticated order APIs first.

use crate::Result;
use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;
use uuid::Uuid;

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderSide {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "BUY"),
            OrderSide::Sell => write!(f, "SELL"),
        }
    }
}

/// An order to place on one venue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Venue to place the order on
    pub venue: String,
    /// Trading symbol
    pub symbol: String,
    /// Order side
    pub side: OrderSide,
    /// Order quantity
    pub quantity: f64,
    /// Limit price; market order when absent
    pub price: Option<f64>,
}

/// Acknowledgement status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderAckStatus {
    /// The venue accepted the order
    Accepted,
    /// The venue rejected the order
    Rejected,
}

impl fmt::Display for OrderAckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderAckStatus::Accepted => write!(f, "ACCEPTED"),
            OrderAckStatus::Rejected => write!(f, "REJECTED"),
        }
    }
}

/// Acknowledgement of a placed order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderAck {
    /// Assigned order id
    pub order_id: String,
    /// Venue the order was placed on
    pub venue: String,
    /// Acknowledgement status
    pub status: OrderAckStatus,
    /// Quantity filled so far
    pub filled_quantity: f64,
}

/// Capability interface for routing orders to a venue
#[async_trait]
pub trait OrderExecutor: Send + Sync {
    /// Place an order and return the venue's acknowledgement
    async fn place_order(&self, request: &OrderRequest) -> Result<OrderAck>;
}

/// Default executor: acknowledges every order without placing anything
pub struct NoopOrderExecutor;

#[async_trait]
impl OrderExecutor for NoopOrderExecutor {
    async fn place_order(&self, request: &OrderRequest) -> Result<OrderAck> {
        info!(
            venue = %request.venue,
            side = %request.side,
            quantity = request.quantity,
            "order execution disabled, acknowledging without placing"
        );

        Ok(OrderAck {
            order_id: Uuid::new_v4().to_string(),
            venue: request.venue.clone(),
            status: OrderAckStatus::Accepted,
            filled_quantity: 0.0,
        })
    }
}

/// Paper executor: fills orders in full, rejecting a configurable fraction
pub struct SimulatedOrderExecutor {
    rejection_probability: f64,
}

impl SimulatedOrderExecutor {
    /// Create a simulated executor with the given rejection probability
    pub fn new(rejection_probability: f64) -> Self {
        Self {
            rejection_probability: rejection_probability.clamp(0.0, 1.0),
        }
    }
}

#[async_trait]
impl OrderExecutor for SimulatedOrderExecutor {
    async fn place_order(&self, request: &OrderRequest) -> Result<OrderAck> {
        let rejected = rand::thread_rng().gen::<f64>() < self.rejection_probability;

        let ack = OrderAck {
            order_id: Uuid::new_v4().to_string(),
            venue: request.venue.clone(),
            status: if rejected {
                OrderAckStatus::Rejected
            } else {
                OrderAckStatus::Accepted
            },
            filled_quantity: if rejected { 0.0 } else { request.quantity },
        };

        info!(
            venue = %request.venue,
            side = %request.side,
            status = %ack.status,
            "simulated order placement"
        );

        Ok(ack)
    }
}

//! # Order
//!
//! Orders are created from a snapshot of a cart at checkout time and only ever move forward:
//!
//! ```text
//! Pending -> Paid -> Submitted -> Shipped -> Delivered
//!    \________\__________\___________\
//!                                     `--> Cancelled
//! ```
//!
//! `Delivered` and `Cancelled` are final. Re-applying the current status is a no-op.

use crate::model::{CartId, ProductId, UserName};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Payment reference shared by the order and its payment link. Unique across orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderCode(pub u64);

impl From<u64> for OrderCode {
    fn from(code: u64) -> Self {
        Self(code)
    }
}

impl Display for OrderCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Paid,
    Submitted,
    Shipped,
    Delivered,
    Cancelled,
}

/// What applying a status to an order would do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Apply,
    NoOp,
    Reject,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Paid => "PAID",
            OrderStatus::Submitted => "SUBMITTED",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn is_final(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    // Position on the forward path; Cancelled sits outside it.
    fn rank(self) -> Option<u8> {
        match self {
            OrderStatus::Pending => Some(0),
            OrderStatus::Paid => Some(1),
            OrderStatus::Submitted => Some(2),
            OrderStatus::Shipped => Some(3),
            OrderStatus::Delivered => Some(4),
            OrderStatus::Cancelled => None,
        }
    }

    pub fn transition_to(self, next: OrderStatus) -> Transition {
        if self == next {
            return Transition::NoOp;
        }
        if self.is_final() {
            return Transition::Reject;
        }
        match (self.rank(), next.rank()) {
            (_, None) => Transition::Apply,
            (Some(from), Some(to)) if to > from => Transition::Apply,
            _ => Transition::Reject,
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown order status: {0}")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(OrderStatus::Pending),
            "PAID" => Ok(OrderStatus::Paid),
            "SUBMITTED" => Ok(OrderStatus::Submitted),
            "SHIPPED" => Ok(OrderStatus::Shipped),
            "DELIVERED" => Ok(OrderStatus::Delivered),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            _ => Err(UnknownOrderStatus(s.to_string())),
        }
    }
}

/// One line of an order, frozen at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetail {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub line_total: f64,
}

/// Represents a customer order.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](crate::framework::ResourceActor).
/// See [`crate::order_actor`] for how creation snapshots the cart and opens a payment link.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub order_code: OrderCode,
    pub user: UserName,
    pub cart_id: CartId,
    pub status: OrderStatus,
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
    pub details: Vec<OrderDetail>,
    pub qr_code: String,
}

/// Payload for creating a new order from a cart.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub cart_id: CartId,
}

/// What checkout gets back after an order was created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedOrder {
    pub order_code: OrderCode,
    pub qr_code: String,
    pub amount: f64,
}

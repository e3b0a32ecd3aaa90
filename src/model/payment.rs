//! Payment-side records: the gateway's status vocabulary, the intent handed to the shopper
//! and the payment link the in-memory gateway keeps per order code.

use crate::model::OrderCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Status as reported by the payment gateway. Only `Paid` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Cancelled,
}

impl PaymentStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, PaymentStatus::Paid | PaymentStatus::Cancelled)
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Paid => "PAID",
            PaymentStatus::Cancelled => "CANCELLED",
        };
        f.write_str(s)
    }
}

/// What the shopper is shown while paying. Lives for one checkout attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentIntent {
    pub qr_code_payload: String,
    pub order_code: OrderCode,
    pub amount: f64,
    pub expires_at: DateTime<Utc>,
}

/// A payment link held by the gateway simulator, keyed by order code.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait.
/// Links are stored with `insert` so a second link for the same order code is refused.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentLink {
    pub order_code: OrderCode,
    pub amount: u64,
    pub description: String,
    pub qr_code: String,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub cancellation_reason: Option<String>,
}

/// Payload for opening a payment link.
#[derive(Debug, Clone)]
pub struct PaymentLinkCreate {
    pub amount: u64,
    pub description: String,
}

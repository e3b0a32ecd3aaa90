//! Error types for payment operations, shared by the gateway simulator and the REST client.

use crate::model::{OrderCode, PaymentStatus};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PaymentError {
    #[error("Payment link not found: {0}")]
    NotFound(String),

    /// A link for this order code already exists.
    #[error("Duplicate order code: {0}")]
    DuplicateOrderCode(OrderCode),

    #[error("Invalid amount: {0}")]
    InvalidAmount(u64),

    #[error("Payment link is already {0}")]
    AlreadyFinal(PaymentStatus),

    /// The gateway answered without a usable status.
    #[error("Payment status response carried no data")]
    NoData,

    #[error("Payment service rejected the request ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("Payment service unavailable: {0}")]
    Unavailable(String),
}

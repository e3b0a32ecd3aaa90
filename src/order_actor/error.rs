//! Error types for order operations.

use crate::cart_actor::CartError;
use crate::model::{CartId, OrderStatus};
use crate::payment_actor::PaymentError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Cart not found: {0}")]
    CartNotFound(CartId),

    /// Orders are never created from an empty cart.
    #[error("Cart {0} is empty")]
    EmptyCart(CartId),

    #[error("Cart {0} was already checked out")]
    CartCheckedOut(CartId),

    #[error("Cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Could not find a free order code after {attempts} attempts")]
    DuplicateOrderCode { attempts: u32 },

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error("Order service rejected the request ({status}): {body}")]
    Rejected { status: u16, body: String },

    /// An error occurred while communicating with the actor system or the remote service.
    #[error("Order service unavailable: {0}")]
    Unavailable(String),
}

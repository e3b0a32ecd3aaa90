//! Error types for cart operations, shared by the cart actor and the REST client.

use crate::model::CartStatus;
use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// The requested cart was not found.
    #[error("Cart not found: {0}")]
    NotFound(String),

    #[error("Cart item not found: {0}")]
    ItemNotFound(String),

    /// Quantities must be at least 1.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// Items and locks can only change on an active cart.
    #[error("Cart is not active (status {0})")]
    NotActive(CartStatus),

    #[error("Cannot {action} a cart in status {status}")]
    InvalidState {
        status: CartStatus,
        action: &'static str,
    },

    #[error("Product unavailable: {0}")]
    ProductUnavailable(String),

    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    /// The remote cart service answered with a non-success status.
    #[error("Cart service rejected the request ({status}): {body}")]
    Rejected { status: u16, body: String },

    /// The cart service could not be reached.
    #[error("Cart service unavailable: {0}")]
    Unavailable(String),
}

//! # Checkout Errors
//!
//! What a checkout attempt can end with, independent of which backend served it. Service
//! errors convert into it with `?`.

use crate::cart_actor::CartError;
use crate::model::OrderCode;
use crate::order_actor::OrderError;
use crate::payment_actor::PaymentError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    /// The cart is missing, locked, checked out, empty or not the user's.
    #[error("Cart cannot be checked out: {0}")]
    InvalidCartState(String),

    /// The user already has an order waiting for payment.
    #[error("Order {0} is still waiting for payment")]
    PendingOrderExists(OrderCode),

    /// A backend could not be reached or failed; retrying later may succeed.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Payment for order {0} expired")]
    PaymentExpired(OrderCode),

    #[error("Payment for order {order_code} still unresolved after {attempts} checks")]
    PaymentExhausted { order_code: OrderCode, attempts: u32 },

    #[error("Payment for order {0} was cancelled")]
    PaymentCancelled(OrderCode),
}

fn server_side(status: u16) -> bool {
    status >= 500
}

impl From<CartError> for CheckoutError {
    fn from(e: CartError) -> Self {
        match e {
            CartError::Unavailable(msg) => CheckoutError::ServiceUnavailable(msg),
            CartError::Rejected { status, body } if server_side(status) => {
                CheckoutError::ServiceUnavailable(format!("cart service {status}: {body}"))
            }
            other => CheckoutError::InvalidCartState(other.to_string()),
        }
    }
}

impl From<OrderError> for CheckoutError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::Cart(inner) => inner.into(),
            OrderError::EmptyCart(_)
            | OrderError::CartNotFound(_)
            | OrderError::CartCheckedOut(_)
            | OrderError::Payment(PaymentError::InvalidAmount(_)) => {
                CheckoutError::InvalidCartState(e.to_string())
            }
            OrderError::Rejected { status, body } if !server_side(status) => {
                CheckoutError::InvalidCartState(format!("order service {status}: {body}"))
            }
            other => CheckoutError::ServiceUnavailable(other.to_string()),
        }
    }
}

impl From<PaymentError> for CheckoutError {
    fn from(e: PaymentError) -> Self {
        CheckoutError::ServiceUnavailable(e.to_string())
    }
}

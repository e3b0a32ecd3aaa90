//! # Checkout Initiator
//!
//! Turns a user's cart into a pending order and a payment intent. Preconditions are checked
//! in this order, and the first failure wins:
//!
//! 1. the user has no pending order (`PendingOrderExists`, the cart is left alone),
//! 2. the cart is the user's, active and non-empty (`InvalidCartState`, no order is created).
//!
//! The cart is locked before the order is created and unlocked again if creation fails.

use crate::error::CheckoutError;
use crate::model::{CartId, PaymentIntent, UserName};
use crate::services::{CartService, OrderService};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

pub struct CheckoutInitiator {
    carts: Arc<dyn CartService>,
    orders: Arc<dyn OrderService>,
    payment_timeout: Duration,
}

impl CheckoutInitiator {
    pub fn new(carts: Arc<dyn CartService>, orders: Arc<dyn OrderService>, payment_timeout: Duration) -> Self {
        Self {
            carts,
            orders,
            payment_timeout,
        }
    }

    #[instrument(skip(self))]
    pub async fn initiate(&self, user: &UserName, cart_id: CartId) -> Result<PaymentIntent, CheckoutError> {
        if let Some(pending) = self.orders.pending_order(user).await? {
            warn!(order_code = %pending, "Pending order blocks checkout");
            return Err(CheckoutError::PendingOrderExists(pending));
        }

        let cart = self.carts.get(cart_id).await?;
        if cart.user != *user {
            return Err(CheckoutError::InvalidCartState(format!(
                "{cart_id} does not belong to {user}"
            )));
        }
        if !cart.is_active() {
            return Err(CheckoutError::InvalidCartState(format!(
                "{cart_id} is {}",
                cart.status
            )));
        }
        if cart.is_empty() {
            return Err(CheckoutError::InvalidCartState(format!("{cart_id} is empty")));
        }

        self.carts.lock(cart_id).await?;

        let created = match self.orders.create_order(cart_id).await {
            Ok(created) => created,
            Err(e) => {
                warn!(error = %e, "Order creation failed, unlocking cart");
                if let Err(unlock) = self.carts.unlock(user).await {
                    warn!(error = %unlock, "Could not unlock cart");
                }
                return Err(e.into());
            }
        };

        // Timeouts beyond chrono's range are capped at a year.
        let ttl = chrono::Duration::from_std(self.payment_timeout)
            .unwrap_or_else(|_| chrono::Duration::days(365));
        info!(order_code = %created.order_code, amount = created.amount, "Checkout started");
        Ok(PaymentIntent {
            qr_code_payload: created.qr_code,
            order_code: created.order_code,
            amount: created.amount,
            expires_at: Utc::now() + ttl,
        })
    }
}

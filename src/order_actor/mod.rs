//! # Order Actor
//!
//! Orders are created from a cart, never from loose fields. `on_create` does the heavy lifting
//! through the injected [`OrderContext`]:
//!
//! 1. snapshot the cart through the [`CartClient`] (an empty cart is refused),
//! 2. freeze the lines into [`OrderDetail`](crate::model::OrderDetail)s and total them,
//! 3. generate an order code and open a payment link for it, drawing a new code when the
//!    gateway reports a duplicate,
//! 4. store the order as `Pending` with the link's QR code.
//!
//! Status changes go through [`OrderAction::ChangeStatus`], which enforces forward-only moves.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::{CartClient, OrderClient, PaymentClient};
use crate::framework::ResourceActor;
use crate::model::{Order, OrderCode};
use chrono::Utc;
use rand::Rng;
use std::sync::Arc;

/// Source of candidate order codes.
pub type OrderCodeSource = Arc<dyn Fn() -> OrderCode + Send + Sync>;

/// Dependencies injected into the Order actor at `run()` time.
#[derive(Clone)]
pub struct OrderContext {
    pub carts: CartClient,
    pub payments: PaymentClient,
    pub order_codes: OrderCodeSource,
    /// How many codes to try before giving up on duplicates.
    pub code_retries: u32,
}

impl OrderContext {
    pub fn new(carts: CartClient, payments: PaymentClient, code_retries: u32) -> Self {
        Self {
            carts,
            payments,
            order_codes: Arc::new(random_order_code),
            code_retries,
        }
    }

    pub fn with_order_codes(mut self, source: impl Fn() -> OrderCode + Send + Sync + 'static) -> Self {
        self.order_codes = Arc::new(source);
        self
    }
}

/// Current time in milliseconds plus a random offset below 10 000.
pub fn random_order_code() -> OrderCode {
    let millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
    OrderCode(millis + rand::thread_rng().gen_range(0..10_000))
}

/// Creates a new Order actor and its client. Run it with an [`OrderContext`].
pub fn new() -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    (actor, OrderClient::new(generic_client))
}

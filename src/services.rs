//! # Service Traits
//!
//! The three collaborators checkout talks to. Each one has two implementations: the
//! actor-backed clients in [`crate::clients`] and the HTTP client in [`crate::rest`].
//! Checkout code only ever sees `Arc<dyn ...Service>`.

use crate::cart_actor::CartError;
use crate::model::{
    Cart, CartId, CartItemId, CreatedOrder, Order, OrderCode, OrderStatus, PaymentStatus, ProductId, UserName,
};
use crate::order_actor::OrderError;
use crate::payment_actor::PaymentError;
use async_trait::async_trait;

/// Cart operations. Mutations answer with the cart's authoritative state afterwards.
#[async_trait]
pub trait CartService: Send + Sync {
    /// The user's current cart, creating an empty active one if there is none.
    async fn get_or_create(&self, user: &UserName) -> Result<Cart, CartError>;

    async fn get(&self, cart_id: CartId) -> Result<Cart, CartError>;

    async fn add_item(&self, cart_id: CartId, product_id: ProductId, quantity: u32) -> Result<Cart, CartError>;

    async fn remove_item(&self, cart_id: CartId, product_id: ProductId) -> Result<Cart, CartError>;

    async fn update_quantity(
        &self,
        cart_id: CartId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Cart, CartError>;

    async fn increment(&self, cart_id: CartId, cart_item_id: CartItemId) -> Result<Cart, CartError>;

    async fn decrement(&self, cart_id: CartId, cart_item_id: CartItemId) -> Result<Cart, CartError>;

    async fn clear(&self, cart_id: CartId) -> Result<Cart, CartError>;

    async fn lock(&self, cart_id: CartId) -> Result<Cart, CartError>;

    /// Reactivates the user's locked cart. Does nothing if no cart is locked.
    async fn unlock(&self, user: &UserName) -> Result<(), CartError>;

    /// Retires a paid cart: its items are cleared and it is never reactivated.
    async fn complete_checkout(&self, cart_id: CartId) -> Result<(), CartError>;
}

#[async_trait]
pub trait OrderService: Send + Sync {
    /// Creates a pending order and its payment link from the cart's current contents.
    async fn create_order(&self, cart_id: CartId) -> Result<CreatedOrder, OrderError>;

    /// Answers `true` when the status changed, `false` when the order already had it.
    async fn change_status(&self, order_code: OrderCode, status: OrderStatus) -> Result<bool, OrderError>;

    /// The user's most recent pending order, if any.
    async fn pending_order(&self, user: &UserName) -> Result<Option<OrderCode>, OrderError>;

    async fn orders_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, OrderError>;
}

#[async_trait]
pub trait PaymentStatusService: Send + Sync {
    async fn status(&self, order_code: OrderCode) -> Result<PaymentStatus, PaymentError>;

    /// Cancels the payment link so it can no longer be paid.
    async fn cancel(&self, order_code: OrderCode) -> Result<(), PaymentError>;
}

//! # Cart Store
//!
//! Local copy of one user's cart, kept in sync with a [`CartService`]. Every operation
//! round-trips to the service and replaces the local copy with the answer; a failed operation
//! leaves the last fetched state in place.

use crate::cart_actor::CartError;
use crate::model::{Cart, CartId, CartItem, CartItemId, ProductId, UserName};
use crate::services::CartService;
use std::sync::Arc;
use tracing::{debug, instrument};

pub struct CartStore {
    service: Arc<dyn CartService>,
    user: UserName,
    cart: Option<Cart>,
}

impl CartStore {
    pub fn new(service: Arc<dyn CartService>, user: UserName) -> Self {
        Self {
            service,
            user,
            cart: None,
        }
    }

    pub fn user(&self) -> &UserName {
        &self.user
    }

    /// Last fetched state, if any.
    pub fn cart(&self) -> Option<&Cart> {
        self.cart.as_ref()
    }

    pub fn items(&self) -> &[CartItem] {
        self.cart
            .as_ref()
            .map(|cart| cart.items.as_slice())
            .unwrap_or_default()
    }

    pub fn total_quantity(&self) -> u32 {
        self.cart.as_ref().map_or(0, Cart::total_quantity)
    }

    pub fn total_price(&self) -> f64 {
        self.cart.as_ref().map_or(0.0, Cart::total_price)
    }

    /// Fetches the user's cart, creating one if needed.
    #[instrument(skip(self), fields(user = %self.user))]
    pub async fn load(&mut self) -> Result<&Cart, CartError> {
        let cart = self.service.get_or_create(&self.user).await?;
        Ok(self.keep(cart))
    }

    /// Re-reads the cart. Loads it first if nothing was fetched yet.
    pub async fn refresh(&mut self) -> Result<&Cart, CartError> {
        match self.cart.as_ref().map(|cart| cart.id) {
            Some(cart_id) => {
                let cart = self.service.get(cart_id).await?;
                Ok(self.keep(cart))
            }
            None => self.load().await,
        }
    }

    async fn cart_id(&mut self) -> Result<CartId, CartError> {
        match self.cart.as_ref().map(|cart| cart.id) {
            Some(cart_id) => Ok(cart_id),
            None => Ok(self.load().await?.id),
        }
    }

    fn keep(&mut self, cart: Cart) -> &Cart {
        debug!(cart_id = %cart.id, items = cart.items.len(), status = %cart.status, "Cart synced");
        self.cart.insert(cart)
    }

    pub async fn add(&mut self, product_id: ProductId, quantity: u32) -> Result<&Cart, CartError> {
        let cart_id = self.cart_id().await?;
        let cart = self.service.add_item(cart_id, product_id, quantity).await?;
        Ok(self.keep(cart))
    }

    pub async fn remove(&mut self, product_id: ProductId) -> Result<&Cart, CartError> {
        let cart_id = self.cart_id().await?;
        let cart = self.service.remove_item(cart_id, product_id).await?;
        Ok(self.keep(cart))
    }

    pub async fn update_quantity(&mut self, product_id: ProductId, quantity: u32) -> Result<&Cart, CartError> {
        let cart_id = self.cart_id().await?;
        let cart = self
            .service
            .update_quantity(cart_id, product_id, quantity)
            .await?;
        Ok(self.keep(cart))
    }

    pub async fn increment(&mut self, cart_item_id: CartItemId) -> Result<&Cart, CartError> {
        let cart_id = self.cart_id().await?;
        let cart = self.service.increment(cart_id, cart_item_id).await?;
        Ok(self.keep(cart))
    }

    pub async fn decrement(&mut self, cart_item_id: CartItemId) -> Result<&Cart, CartError> {
        let cart_id = self.cart_id().await?;
        let cart = self.service.decrement(cart_id, cart_item_id).await?;
        Ok(self.keep(cart))
    }

    pub async fn clear(&mut self) -> Result<&Cart, CartError> {
        let cart_id = self.cart_id().await?;
        let cart = self.service.clear(cart_id).await?;
        Ok(self.keep(cart))
    }

    pub async fn lock(&mut self) -> Result<&Cart, CartError> {
        let cart_id = self.cart_id().await?;
        let cart = self.service.lock(cart_id).await?;
        Ok(self.keep(cart))
    }

    /// Reactivates the user's cart and re-reads it.
    pub async fn unlock(&mut self) -> Result<&Cart, CartError> {
        self.service.unlock(&self.user).await?;
        self.refresh().await
    }
}

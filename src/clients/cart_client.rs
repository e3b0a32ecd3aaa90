//! # Cart Client
//!
//! Wraps `ResourceClient<Cart>` and implements [`CartService`] on top of the cart actor.

use crate::cart_actor::{CartAction, CartError};
use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{Cart, CartCreate, CartId, CartItemId, CartStatus, ProductId, UserName};
use crate::services::CartService;
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Cart actor.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
}

impl CartClient {
    pub fn new(inner: ResourceClient<Cart>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_cart(&self, user: UserName) -> Result<CartId, CartError> {
        debug!("Sending request");
        self.inner
            .create(CartCreate { user })
            .await
            .map_err(Self::map_error)
    }

    /// Like [`ActorClient::get`], but a missing cart is an error.
    #[instrument(skip(self))]
    pub async fn get_cart(&self, cart_id: CartId) -> Result<Cart, CartError> {
        debug!("Sending request");
        self.inner
            .get(cart_id)
            .await
            .map_err(Self::map_error)?
            .ok_or_else(|| CartError::NotFound(cart_id.to_string()))
    }

    /// The user's cart that has not been checked out yet, if any.
    #[instrument(skip(self))]
    pub async fn current_cart(&self, user: &UserName) -> Result<Option<Cart>, CartError> {
        let owner = user.clone();
        let carts = self
            .find(move |cart: &Cart| cart.user == owner && cart.status != CartStatus::CheckedOut)
            .await?;
        Ok(carts.into_iter().min_by_key(|cart| cart.id.0))
    }

    #[instrument(skip(self))]
    pub async fn perform(&self, cart_id: CartId, action: CartAction) -> Result<Cart, CartError> {
        debug!("Sending request");
        self.inner
            .perform_action(cart_id, action)
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ResourceClient<Cart> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.into_entity_error(|e| match e {
            FrameworkError::NotFound(id) => CartError::NotFound(id),
            other => CartError::Unavailable(other.to_string()),
        })
    }
}

#[async_trait]
impl CartService for CartClient {
    async fn get_or_create(&self, user: &UserName) -> Result<Cart, CartError> {
        if let Some(cart) = self.current_cart(user).await? {
            return Ok(cart);
        }
        let cart_id = self.create_cart(user.clone()).await?;
        info!(%cart_id, %user, "Created cart");
        self.get_cart(cart_id).await
    }

    async fn get(&self, cart_id: CartId) -> Result<Cart, CartError> {
        self.get_cart(cart_id).await
    }

    async fn add_item(&self, cart_id: CartId, product_id: ProductId, quantity: u32) -> Result<Cart, CartError> {
        self.perform(
            cart_id,
            CartAction::AddItem {
                product_id,
                quantity,
            },
        )
        .await
    }

    async fn remove_item(&self, cart_id: CartId, product_id: ProductId) -> Result<Cart, CartError> {
        self.perform(cart_id, CartAction::RemoveItem { product_id }).await
    }

    async fn update_quantity(
        &self,
        cart_id: CartId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Cart, CartError> {
        self.perform(
            cart_id,
            CartAction::SetQuantity {
                product_id,
                quantity,
            },
        )
        .await
    }

    async fn increment(&self, cart_id: CartId, cart_item_id: CartItemId) -> Result<Cart, CartError> {
        self.perform(cart_id, CartAction::Increment { cart_item_id }).await
    }

    async fn decrement(&self, cart_id: CartId, cart_item_id: CartItemId) -> Result<Cart, CartError> {
        self.perform(cart_id, CartAction::Decrement { cart_item_id }).await
    }

    async fn clear(&self, cart_id: CartId) -> Result<Cart, CartError> {
        self.perform(cart_id, CartAction::Clear).await
    }

    async fn lock(&self, cart_id: CartId) -> Result<Cart, CartError> {
        self.perform(cart_id, CartAction::Lock).await
    }

    async fn unlock(&self, user: &UserName) -> Result<(), CartError> {
        let owner = user.clone();
        let locked = self
            .find(move |cart: &Cart| cart.user == owner && cart.status == CartStatus::Locked)
            .await?;
        for cart in locked {
            self.perform(cart.id, CartAction::Unlock).await?;
            info!(cart_id = %cart.id, %user, "Cart reactivated");
        }
        Ok(())
    }

    async fn complete_checkout(&self, cart_id: CartId) -> Result<(), CartError> {
        self.perform(cart_id, CartAction::CompleteCheckout).await?;
        Ok(())
    }
}

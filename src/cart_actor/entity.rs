//! [`ActorEntity`] implementation for [`Cart`].
//!
//! Each action validates against the current state before touching it, so a rejected
//! action leaves the cart exactly as it was.

use super::actions::CartAction;
use super::error::CartError;
use crate::clients::ProductClient;
use crate::framework::ActorEntity;
use crate::model::{Cart, CartCreate, CartId, CartItem, CartItemId, CartStatus, ProductId};
use crate::product_actor::ProductError;
use async_trait::async_trait;
use std::convert::Infallible;
use tracing::debug;

#[async_trait]
impl ActorEntity for Cart {
    type Id = CartId;
    type Create = CartCreate;
    type Update = Infallible;
    type Action = CartAction;
    type ActionResult = Cart;
    type Context = ProductClient;
    type Error = CartError;

    fn from_create_params(id: CartId, params: CartCreate) -> Result<Self, Self::Error> {
        Ok(Cart::new(id, params.user))
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &ProductClient) -> Result<(), Self::Error> {
        match update {}
    }

    async fn handle_action(
        &mut self,
        action: CartAction,
        products: &ProductClient,
    ) -> Result<Cart, Self::Error> {
        match action {
            CartAction::AddItem {
                product_id,
                quantity,
            } => self.add_item(product_id, quantity, products).await?,
            CartAction::RemoveItem { product_id } => {
                self.require_active()?;
                let index = self.position_of_product(product_id)?;
                self.items.remove(index);
            }
            CartAction::SetQuantity {
                product_id,
                quantity,
            } => {
                self.require_active()?;
                if quantity < 1 {
                    return Err(CartError::InvalidQuantity(quantity));
                }
                let index = self.position_of_product(product_id)?;
                ensure_stock(products, product_id, quantity).await?;
                self.items[index].quantity = quantity;
            }
            CartAction::Increment { cart_item_id } => {
                self.require_active()?;
                let index = self.position_of_item(cart_item_id)?;
                let wanted = self.items[index]
                    .quantity
                    .checked_add(1)
                    .ok_or(CartError::InvalidQuantity(u32::MAX))?;
                ensure_stock(products, self.items[index].product_id, wanted).await?;
                self.items[index].quantity = wanted;
            }
            CartAction::Decrement { cart_item_id } => {
                self.require_active()?;
                let index = self.position_of_item(cart_item_id)?;
                if self.items[index].quantity <= 1 {
                    self.items.remove(index);
                } else {
                    self.items[index].quantity -= 1;
                }
            }
            CartAction::Clear => {
                self.require_active()?;
                self.items.clear();
            }
            CartAction::Lock => {
                self.require_active()?;
                self.status = CartStatus::Locked;
            }
            CartAction::Unlock => match self.status {
                CartStatus::Locked => self.status = CartStatus::Active,
                CartStatus::Active => {}
                CartStatus::CheckedOut => {
                    return Err(CartError::InvalidState {
                        status: self.status,
                        action: "unlock",
                    })
                }
            },
            CartAction::CompleteCheckout => match self.status {
                CartStatus::Locked => {
                    self.items.clear();
                    self.status = CartStatus::CheckedOut;
                }
                CartStatus::CheckedOut => {}
                CartStatus::Active => {
                    return Err(CartError::InvalidState {
                        status: self.status,
                        action: "check out",
                    })
                }
            },
        }
        Ok(self.clone())
    }
}

impl Cart {
    fn require_active(&self) -> Result<(), CartError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(CartError::NotActive(self.status))
        }
    }

    fn position_of_product(&self, product_id: ProductId) -> Result<usize, CartError> {
        self.items
            .iter()
            .position(|item| item.product_id == product_id)
            .ok_or_else(|| CartError::ItemNotFound(product_id.to_string()))
    }

    fn position_of_item(&self, cart_item_id: CartItemId) -> Result<usize, CartError> {
        self.items
            .iter()
            .position(|item| item.cart_item_id == cart_item_id)
            .ok_or_else(|| CartError::ItemNotFound(cart_item_id.to_string()))
    }

    async fn add_item(
        &mut self,
        product_id: ProductId,
        quantity: u32,
        products: &ProductClient,
    ) -> Result<(), CartError> {
        self.require_active()?;
        if quantity < 1 {
            return Err(CartError::InvalidQuantity(quantity));
        }

        let product = products
            .get_product(product_id)
            .await
            .map_err(product_error)?;
        let existing = self.position_of_product(product_id).ok();
        let wanted = existing
            .map_or(0, |i| self.items[i].quantity)
            .checked_add(quantity)
            .ok_or(CartError::InvalidQuantity(quantity))?;
        if product.stock < wanted {
            return Err(CartError::InsufficientStock {
                requested: wanted,
                available: product.stock,
            });
        }

        match existing {
            Some(index) => self.items[index].quantity = wanted,
            None => {
                let cart_item_id = CartItemId(self.next_item_id);
                self.next_item_id += 1;
                debug!(cart_id = %self.id, %cart_item_id, %product_id, "New cart line");
                self.items.push(CartItem {
                    cart_item_id,
                    product_id,
                    name: product.name,
                    brand: product.brand,
                    description: product.description,
                    price: product.price,
                    quantity,
                    image: product.image,
                });
            }
        }
        Ok(())
    }
}

async fn ensure_stock(
    products: &ProductClient,
    product_id: ProductId,
    wanted: u32,
) -> Result<(), CartError> {
    let available = products
        .check_stock(product_id)
        .await
        .map_err(product_error)?;
    if available < wanted {
        return Err(CartError::InsufficientStock {
            requested: wanted,
            available,
        });
    }
    Ok(())
}

fn product_error(e: ProductError) -> CartError {
    match e {
        ProductError::NotFound(id) | ProductError::Invalid(id) => CartError::ProductUnavailable(id),
        ProductError::ActorCommunicationError(msg) => CartError::Unavailable(msg),
    }
}

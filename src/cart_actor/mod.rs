//! # Cart Actor
//!
//! Shopping carts, one active cart per user. Every mutation is a [`CartAction`] and answers
//! with the cart's full state afterwards, so callers never have to merge partial results.
//!
//! Adding an item looks the product up through the [`ProductClient`] injected as context;
//! growing a quantity asks it for the current stock.
//!
//! ```rust,ignore
//! let (product_actor, products) = product_actor::new();
//! let (cart_actor, carts) = cart_actor::new();
//! tokio::spawn(product_actor.run(()));
//! tokio::spawn(cart_actor.run(products.clone()));
//!
//! let cart = carts.get_or_create(&"alice".into()).await?;
//! carts.add_item(cart.id, product_id, 2).await?;
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::CartClient;
use crate::framework::ResourceActor;
use crate::model::Cart;

/// Creates a new Cart actor and its client. Run it with a `ProductClient` as context.
pub fn new() -> (ResourceActor<Cart>, CartClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    (actor, CartClient::new(generic_client))
}

//! # Cart
//!
//! A cart belongs to one user and moves through three states:
//!
//! ```text
//! Active --lock--> Locked --unlock--> Active
//!                    |
//!                    +--complete_checkout--> CheckedOut (items cleared, cart retired)
//! ```
//!
//! Items can only change while the cart is `Active`.

use crate::model::{ProductId, UserName};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Carts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartId(pub u64);

impl From<u64> for CartId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for CartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cart_{}", self.0)
    }
}

/// Identifier of one line inside a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartItemId(pub u64);

impl Display for CartItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "item_{}", self.0)
    }
}

/// Remote backends report a locked cart as `PENDING`/`SUBMITTED` and a checked-out one as
/// `PAID`; both spellings are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartStatus {
    Active,
    #[serde(alias = "PENDING", alias = "SUBMITTED")]
    Locked,
    #[serde(alias = "PAID")]
    CheckedOut,
}

impl Display for CartStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CartStatus::Active => "ACTIVE",
            CartStatus::Locked => "LOCKED",
            CartStatus::CheckedOut => "CHECKED_OUT",
        };
        f.write_str(s)
    }
}

/// One product line. `quantity` is always at least 1.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub cart_item_id: CartItemId,
    pub product_id: ProductId,
    pub name: String,
    pub brand: String,
    pub description: String,
    pub price: f64,
    pub quantity: u32,
    pub image: String,
}

impl CartItem {
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Represents a user's shopping cart.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](crate::framework::ResourceActor).
/// Mutations go through [`CartAction`](crate::cart_actor::CartAction).
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub id: CartId,
    pub user: UserName,
    pub status: CartStatus,
    pub items: Vec<CartItem>,
    pub(crate) next_item_id: u64,
}

impl Cart {
    pub fn new(id: CartId, user: UserName) -> Self {
        Self {
            id,
            user,
            status: CartStatus::Active,
            items: Vec::new(),
            next_item_id: 1,
        }
    }

    /// Rebuilds a cart from state reported by a remote service.
    pub fn from_parts(id: CartId, user: UserName, status: CartStatus, items: Vec<CartItem>) -> Self {
        let next_item_id = items
            .iter()
            .map(|item| item.cart_item_id.0 + 1)
            .max()
            .unwrap_or(1);
        Self {
            id,
            user,
            status,
            items,
            next_item_id,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == CartStatus::Active
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all line quantities.
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn total_price(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn item(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }

    pub fn item_by_id(&self, cart_item_id: CartItemId) -> Option<&CartItem> {
        self.items
            .iter()
            .find(|item| item.cart_item_id == cart_item_id)
    }
}

/// Payload for creating a new cart.
#[derive(Debug, Clone)]
pub struct CartCreate {
    pub user: UserName,
}

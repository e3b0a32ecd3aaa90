//! Custom actions for the Cart actor.

use crate::model::{CartItemId, ProductId};

/// Every cart mutation. All of them answer with the updated [`Cart`](crate::model::Cart).
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Adds `quantity` of a product, merging into an existing line for the same product.
    AddItem { product_id: ProductId, quantity: u32 },
    RemoveItem { product_id: ProductId },
    /// Sets the quantity of an existing line. Must be at least 1.
    SetQuantity { product_id: ProductId, quantity: u32 },
    Increment { cart_item_id: CartItemId },
    /// Drops the line when the quantity would fall below 1.
    Decrement { cart_item_id: CartItemId },
    Clear,
    /// Freezes the cart while a checkout is outstanding.
    Lock,
    /// Reverses `Lock`. Unlocking an active cart does nothing.
    Unlock,
    /// Retires a locked cart after payment: items are cleared and the status becomes
    /// `CheckedOut`. Repeating it does nothing.
    CompleteCheckout,
}

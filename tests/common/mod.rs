//! Scripted and recording fakes of the service traits.
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use storefront_checkout::cart_actor::CartError;
use storefront_checkout::model::{
    Cart, CartId, CartItem, CartItemId, CartStatus, CreatedOrder, Order, OrderCode, OrderStatus, PaymentStatus,
    ProductId, UserName,
};
use storefront_checkout::order_actor::OrderError;
use storefront_checkout::payment_actor::PaymentError;
use storefront_checkout::services::{CartService, OrderService, PaymentStatusService};

pub const ORDER_CODE: OrderCode = OrderCode(1_700_000_004_242);

pub fn item(id: u64, product: u64, price: f64, quantity: u32) -> CartItem {
    CartItem {
        cart_item_id: CartItemId(id),
        product_id: ProductId(product),
        name: format!("part {product}"),
        brand: String::new(),
        description: String::new(),
        price,
        quantity,
        image: String::new(),
    }
}

/// alice's active cart: 100 x 1 and 50 x 2.
pub fn alice_cart() -> Cart {
    Cart::from_parts(
        CartId(1),
        "alice".into(),
        CartStatus::Active,
        vec![item(1, 10, 100.0, 1), item(2, 11, 50.0, 2)],
    )
}

/// Answers status checks from a script; once the script runs out every check is `Pending`.
pub struct ScriptedPayments {
    script: Mutex<VecDeque<Result<PaymentStatus, PaymentError>>>,
    cancel_result: Mutex<Result<(), PaymentError>>,
    status_calls: AtomicU32,
    cancel_calls: AtomicU32,
}

impl ScriptedPayments {
    pub fn new(script: Vec<Result<PaymentStatus, PaymentError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            cancel_result: Mutex::new(Ok(())),
            status_calls: AtomicU32::new(0),
            cancel_calls: AtomicU32::new(0),
        }
    }

    pub fn always_pending() -> Self {
        Self::new(Vec::new())
    }

    /// `Pending` until attempt `k`, which reports `Paid`.
    pub fn paid_on(k: u32) -> Self {
        let mut script: Vec<_> = (1..k).map(|_| Ok(PaymentStatus::Pending)).collect();
        script.push(Ok(PaymentStatus::Paid));
        Self::new(script)
    }

    pub fn with_cancel_result(self, result: Result<(), PaymentError>) -> Self {
        *self.cancel_result.lock().unwrap() = result;
        self
    }

    pub fn status_calls(&self) -> u32 {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn cancel_calls(&self) -> u32 {
        self.cancel_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentStatusService for ScriptedPayments {
    async fn status(&self, _order_code: OrderCode) -> Result<PaymentStatus, PaymentError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(PaymentStatus::Pending))
    }

    async fn cancel(&self, _order_code: OrderCode) -> Result<(), PaymentError> {
        self.cancel_calls.fetch_add(1, Ordering::SeqCst);
        self.cancel_result.lock().unwrap().clone()
    }
}

/// Order service that records what it was asked to do.
pub struct RecordingOrders {
    pub pending: Mutex<Option<OrderCode>>,
    pub create_error: Mutex<Option<OrderError>>,
    pub status_error: Mutex<Option<OrderError>>,
    pub created: AtomicU32,
    pub changes: Mutex<Vec<(OrderCode, OrderStatus)>>,
}

impl RecordingOrders {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(None),
            create_error: Mutex::new(None),
            status_error: Mutex::new(None),
            created: AtomicU32::new(0),
            changes: Mutex::new(Vec::new()),
        }
    }

    pub fn with_pending(self, code: OrderCode) -> Self {
        *self.pending.lock().unwrap() = Some(code);
        self
    }

    pub fn failing_create(self, error: OrderError) -> Self {
        *self.create_error.lock().unwrap() = Some(error);
        self
    }

    pub fn created(&self) -> u32 {
        self.created.load(Ordering::SeqCst)
    }

    pub fn changes(&self) -> Vec<(OrderCode, OrderStatus)> {
        self.changes.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrderService for RecordingOrders {
    async fn create_order(&self, _cart_id: CartId) -> Result<CreatedOrder, OrderError> {
        if let Some(error) = self.create_error.lock().unwrap().clone() {
            return Err(error);
        }
        self.created.fetch_add(1, Ordering::SeqCst);
        *self.pending.lock().unwrap() = Some(ORDER_CODE);
        Ok(CreatedOrder {
            order_code: ORDER_CODE,
            qr_code: format!("PAYQR|{ORDER_CODE}|200|AutoParts Checkout"),
            amount: 200.0,
        })
    }

    async fn change_status(&self, order_code: OrderCode, status: OrderStatus) -> Result<bool, OrderError> {
        if let Some(error) = self.status_error.lock().unwrap().clone() {
            return Err(error);
        }
        self.changes.lock().unwrap().push((order_code, status));
        Ok(true)
    }

    async fn pending_order(&self, _user: &UserName) -> Result<Option<OrderCode>, OrderError> {
        Ok(*self.pending.lock().unwrap())
    }

    async fn orders_by_status(&self, _status: OrderStatus) -> Result<Vec<Order>, OrderError> {
        Ok(Vec::new())
    }
}

/// Holds a single cart and counts the checkout-related calls made on it.
pub struct RecordingCarts {
    cart: Mutex<Cart>,
    locks: AtomicU32,
    unlocks: AtomicU32,
    completions: AtomicU32,
}

impl RecordingCarts {
    pub fn new(cart: Cart) -> Self {
        Self {
            cart: Mutex::new(cart),
            locks: AtomicU32::new(0),
            unlocks: AtomicU32::new(0),
            completions: AtomicU32::new(0),
        }
    }

    pub fn cart(&self) -> Cart {
        self.cart.lock().unwrap().clone()
    }

    pub fn locks(&self) -> u32 {
        self.locks.load(Ordering::SeqCst)
    }

    pub fn unlocks(&self) -> u32 {
        self.unlocks.load(Ordering::SeqCst)
    }

    pub fn completions(&self) -> u32 {
        self.completions.load(Ordering::SeqCst)
    }

    fn edit(&self, cart_id: CartId, f: impl FnOnce(&mut Cart)) -> Result<Cart, CartError> {
        let mut cart = self.cart.lock().unwrap();
        if cart.id != cart_id {
            return Err(CartError::NotFound(cart_id.to_string()));
        }
        f(&mut cart);
        Ok(cart.clone())
    }

    fn not_scripted() -> CartError {
        CartError::Unavailable("not scripted".into())
    }
}

#[async_trait]
impl CartService for RecordingCarts {
    async fn get_or_create(&self, _user: &UserName) -> Result<Cart, CartError> {
        Ok(self.cart())
    }

    async fn get(&self, cart_id: CartId) -> Result<Cart, CartError> {
        self.edit(cart_id, |_| {})
    }

    async fn add_item(&self, _: CartId, _: ProductId, _: u32) -> Result<Cart, CartError> {
        Err(Self::not_scripted())
    }

    async fn remove_item(&self, _: CartId, _: ProductId) -> Result<Cart, CartError> {
        Err(Self::not_scripted())
    }

    async fn update_quantity(&self, _: CartId, _: ProductId, _: u32) -> Result<Cart, CartError> {
        Err(Self::not_scripted())
    }

    async fn increment(&self, _: CartId, _: CartItemId) -> Result<Cart, CartError> {
        Err(Self::not_scripted())
    }

    async fn decrement(&self, _: CartId, _: CartItemId) -> Result<Cart, CartError> {
        Err(Self::not_scripted())
    }

    async fn clear(&self, cart_id: CartId) -> Result<Cart, CartError> {
        self.edit(cart_id, |cart| cart.items.clear())
    }

    async fn lock(&self, cart_id: CartId) -> Result<Cart, CartError> {
        self.locks.fetch_add(1, Ordering::SeqCst);
        self.edit(cart_id, |cart| cart.status = CartStatus::Locked)
    }

    async fn unlock(&self, _user: &UserName) -> Result<(), CartError> {
        self.unlocks.fetch_add(1, Ordering::SeqCst);
        let mut cart = self.cart.lock().unwrap();
        if cart.status == CartStatus::Locked {
            cart.status = CartStatus::Active;
        }
        Ok(())
    }

    async fn complete_checkout(&self, cart_id: CartId) -> Result<(), CartError> {
        self.completions.fetch_add(1, Ordering::SeqCst);
        self.edit(cart_id, |cart| {
            cart.items.clear();
            cart.status = CartStatus::CheckedOut;
        })?;
        Ok(())
    }
}

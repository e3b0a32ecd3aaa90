mod common;

use chrono::Utc;
use common::{alice_cart, RecordingCarts, RecordingOrders, ORDER_CODE};
use std::sync::Arc;
use std::time::Duration;
use storefront_checkout::checkout::CheckoutInitiator;
use storefront_checkout::error::CheckoutError;
use storefront_checkout::model::{Cart, CartId, CartStatus, OrderCode};
use storefront_checkout::order_actor::OrderError;

const TIMEOUT: Duration = Duration::from_secs(300);

fn initiator(carts: &Arc<RecordingCarts>, orders: &Arc<RecordingOrders>) -> CheckoutInitiator {
    CheckoutInitiator::new(carts.clone(), orders.clone(), TIMEOUT)
}

#[tokio::test]
async fn creates_order_and_returns_intent() {
    let carts = Arc::new(RecordingCarts::new(alice_cart()));
    let orders = Arc::new(RecordingOrders::new());

    let before = Utc::now();
    let intent = initiator(&carts, &orders)
        .initiate(&"alice".into(), CartId(1))
        .await
        .unwrap();

    assert_eq!(intent.order_code, ORDER_CODE);
    assert_eq!(intent.amount, 200.0);
    assert!(intent.qr_code_payload.starts_with("PAYQR|"));
    assert!(intent.expires_at >= before + chrono::Duration::seconds(300));
    assert!(intent.expires_at <= Utc::now() + chrono::Duration::seconds(300));

    assert_eq!(carts.locks(), 1);
    assert_eq!(carts.cart().status, CartStatus::Locked);
    assert_eq!(orders.created(), 1);
}

#[tokio::test]
async fn pending_order_blocks_before_the_cart_is_touched() {
    let carts = Arc::new(RecordingCarts::new(alice_cart()));
    let orders = Arc::new(RecordingOrders::new().with_pending(OrderCode(77)));

    let result = initiator(&carts, &orders)
        .initiate(&"alice".into(), CartId(1))
        .await;

    assert_eq!(result.unwrap_err(), CheckoutError::PendingOrderExists(OrderCode(77)));
    assert_eq!(carts.locks(), 0);
    assert_eq!(orders.created(), 0);
    assert_eq!(carts.cart().status, CartStatus::Active);
}

#[tokio::test]
async fn locked_cart_is_refused_without_creating_an_order() {
    let mut cart = alice_cart();
    cart.status = CartStatus::Locked;
    let carts = Arc::new(RecordingCarts::new(cart));
    let orders = Arc::new(RecordingOrders::new());

    let result = initiator(&carts, &orders)
        .initiate(&"alice".into(), CartId(1))
        .await;

    assert!(matches!(result, Err(CheckoutError::InvalidCartState(_))));
    assert_eq!(carts.locks(), 0);
    assert_eq!(orders.created(), 0);
}

#[tokio::test]
async fn empty_cart_is_refused_without_creating_an_order() {
    let carts = Arc::new(RecordingCarts::new(Cart::new(CartId(1), "alice".into())));
    let orders = Arc::new(RecordingOrders::new());

    let result = initiator(&carts, &orders)
        .initiate(&"alice".into(), CartId(1))
        .await;

    assert!(matches!(result, Err(CheckoutError::InvalidCartState(_))));
    assert_eq!(carts.locks(), 0);
    assert_eq!(orders.created(), 0);
}

#[tokio::test]
async fn another_users_cart_is_refused() {
    let carts = Arc::new(RecordingCarts::new(alice_cart()));
    let orders = Arc::new(RecordingOrders::new());

    let result = initiator(&carts, &orders)
        .initiate(&"mallory".into(), CartId(1))
        .await;

    assert!(matches!(result, Err(CheckoutError::InvalidCartState(_))));
    assert_eq!(orders.created(), 0);
}

#[tokio::test]
async fn unknown_cart_is_an_invalid_cart_state() {
    let carts = Arc::new(RecordingCarts::new(alice_cart()));
    let orders = Arc::new(RecordingOrders::new());

    let result = initiator(&carts, &orders)
        .initiate(&"alice".into(), CartId(42))
        .await;

    assert!(matches!(result, Err(CheckoutError::InvalidCartState(_))));
}

#[tokio::test]
async fn failed_order_creation_unlocks_the_cart() {
    let carts = Arc::new(RecordingCarts::new(alice_cart()));
    let orders = Arc::new(
        RecordingOrders::new().failing_create(OrderError::Unavailable("connection refused".into())),
    );

    let result = initiator(&carts, &orders)
        .initiate(&"alice".into(), CartId(1))
        .await;

    assert!(matches!(result, Err(CheckoutError::ServiceUnavailable(_))));
    assert_eq!(carts.locks(), 1);
    assert_eq!(carts.unlocks(), 1);
    assert_eq!(carts.cart().status, CartStatus::Active);
}

#[tokio::test]
async fn order_refusing_the_cart_is_an_invalid_cart_state() {
    let carts = Arc::new(RecordingCarts::new(alice_cart()));
    let orders = Arc::new(RecordingOrders::new().failing_create(OrderError::EmptyCart(CartId(1))));

    let result = initiator(&carts, &orders)
        .initiate(&"alice".into(), CartId(1))
        .await;

    assert!(matches!(result, Err(CheckoutError::InvalidCartState(_))));
    assert_eq!(carts.unlocks(), 1);
}

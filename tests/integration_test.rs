use std::sync::Arc;
use std::time::Duration;
use storefront_checkout::checkout::{CartStore, CheckoutOutcome};
use storefront_checkout::config::CheckoutConfig;
use storefront_checkout::error::CheckoutError;
use storefront_checkout::lifecycle::StorefrontSystem;
use storefront_checkout::model::{CartStatus, OrderStatus, PaymentStatus, ProductCreate, ProductId, UserName};
use storefront_checkout::services::{CartService, OrderService, PaymentStatusService};

async fn seed(system: &StorefrontSystem) -> (ProductId, ProductId) {
    let pads = system
        .product_client
        .create_product(ProductCreate::new("Brake pad", 100.0, 5))
        .await
        .unwrap();
    let filter = system
        .product_client
        .create_product(ProductCreate::new("Oil filter", 50.0, 5))
        .await
        .unwrap();
    (pads, filter)
}

async fn filled_store(system: &StorefrontSystem, user: &UserName) -> CartStore {
    let (pads, filter) = seed(system).await;
    let mut store = CartStore::new(Arc::new(system.cart_client.clone()), user.clone());
    store.add(pads, 1).await.unwrap();
    store.add(filter, 2).await.unwrap();
    store
}

/// Full flow against the real actors: the shopper pays after the third check.
#[tokio::test(start_paused = true)]
async fn test_paid_checkout_end_to_end() {
    let system = StorefrontSystem::new(&CheckoutConfig::default());
    let user = UserName::from("alice");
    let mut store = filled_store(&system, &user).await;
    assert_eq!(store.total_price(), 200.0);
    let cart_id = store.cart().unwrap().id;

    let coordinator = system.coordinator();
    let session = coordinator.begin(&user, cart_id).await.unwrap();
    let order_code = session.order_code();
    assert_eq!(session.intent().amount, 200.0);
    assert_eq!(
        session.intent().qr_code_payload,
        format!("PAYQR|{order_code}|200|AutoParts Checkout")
    );

    let payments = system.payment_client.clone();
    let shopper = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(7)).await;
        payments.mark_paid(order_code).await
    });

    let outcome = session.outcome().await;
    assert_eq!(
        outcome,
        CheckoutOutcome::Paid {
            order_code,
            attempts: 3
        }
    );
    assert_eq!(shopper.await.unwrap().unwrap(), PaymentStatus::Paid);

    let submitted = system
        .order_client
        .orders_by_status(OrderStatus::Submitted)
        .await
        .unwrap();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].order_code, order_code);
    assert_eq!(submitted[0].total_price, 200.0);

    let retired = store.refresh().await.unwrap();
    assert_eq!(retired.status, CartStatus::CheckedOut);
    assert!(retired.items.is_empty());

    // The next visit starts a fresh cart.
    let next = system.cart_client.get_or_create(&user).await.unwrap();
    assert_ne!(next.id, cart_id);
    assert!(next.is_active());

    drop(store);
    drop(coordinator);
    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_expired_checkout_restores_the_cart() {
    let config = CheckoutConfig {
        payment_timeout: Duration::from_secs(10),
        ..CheckoutConfig::default()
    };
    let system = StorefrontSystem::new(&config);
    let user = UserName::from("alice");
    let mut store = filled_store(&system, &user).await;
    let cart_id = store.cart().unwrap().id;

    let coordinator = system.coordinator();
    let session = coordinator.begin(&user, cart_id).await.unwrap();
    let order_code = session.order_code();
    assert_eq!(store.refresh().await.unwrap().status, CartStatus::Locked);

    let outcome = session.outcome().await;
    assert_eq!(outcome, CheckoutOutcome::Failed(CheckoutError::PaymentExpired(order_code)));

    assert_eq!(
        system.payment_client.status(order_code).await.unwrap(),
        PaymentStatus::Cancelled
    );
    let cancelled = system
        .order_client
        .orders_by_status(OrderStatus::Cancelled)
        .await
        .unwrap();
    assert_eq!(cancelled.len(), 1);
    assert_eq!(system.order_client.pending_order(&user).await.unwrap(), None);

    let cart = store.refresh().await.unwrap();
    assert_eq!(cart.status, CartStatus::Active);
    assert_eq!(cart.total_quantity(), 3);

    drop(store);
    drop(coordinator);
    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_pending_order_blocks_a_second_checkout() {
    let system = StorefrontSystem::new(&CheckoutConfig::default());
    let user = UserName::from("alice");
    let store = filled_store(&system, &user).await;
    let cart_id = store.cart().unwrap().id;

    let coordinator = system.coordinator();
    let mut first = coordinator.begin(&user, cart_id).await.unwrap();

    let second = coordinator.begin(&user, cart_id).await;
    assert_eq!(
        second.unwrap_err(),
        CheckoutError::PendingOrderExists(first.order_code())
    );

    first.close();
    assert_eq!(first.outcome().await, CheckoutOutcome::Closed);

    // Closing leaves the order pending, so the guard still holds.
    let third = coordinator.begin(&user, cart_id).await;
    assert!(matches!(third, Err(CheckoutError::PendingOrderExists(_))));

    drop(store);
    drop(coordinator);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_checkout_refuses_an_empty_cart() {
    let system = StorefrontSystem::new(&CheckoutConfig::default());
    let user = UserName::from("bob");
    let cart = system.cart_client.get_or_create(&user).await.unwrap();

    let coordinator = system.coordinator();
    let result = coordinator.begin(&user, cart.id).await;

    assert!(matches!(result, Err(CheckoutError::InvalidCartState(_))));
    assert!(system
        .order_client
        .orders_by_status(OrderStatus::Pending)
        .await
        .unwrap()
        .is_empty());
    assert!(system.cart_client.get(cart.id).await.unwrap().is_active());

    drop(coordinator);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_checkout_refuses_a_cart_below_one_unit() {
    let system = StorefrontSystem::new(&CheckoutConfig::default());
    let user = UserName::from("carol");
    let washer = system
        .product_client
        .create_product(ProductCreate::new("Drain plug washer", 0.5, 10))
        .await
        .unwrap();
    let cart = system.cart_client.get_or_create(&user).await.unwrap();
    system.cart_client.add_item(cart.id, washer, 1).await.unwrap();

    let coordinator = system.coordinator();
    let result = coordinator.begin(&user, cart.id).await;

    assert!(matches!(result, Err(CheckoutError::InvalidCartState(_))));
    assert!(system.cart_client.get(cart.id).await.unwrap().is_active());

    drop(coordinator);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_duplicate_order_codes_are_redrawn() {
    let codes = std::sync::Mutex::new(vec![500_u64, 500, 500, 501]);
    let system = StorefrontSystem::with_order_codes(&CheckoutConfig::default(), move || {
        let mut codes = codes.lock().unwrap();
        storefront_checkout::model::OrderCode(if codes.is_empty() { 999 } else { codes.remove(0) })
    });

    let (pads, _) = seed(&system).await;
    let alice = system.cart_client.get_or_create(&"alice".into()).await.unwrap();
    system.cart_client.add_item(alice.id, pads, 1).await.unwrap();
    let bob = system.cart_client.get_or_create(&"bob".into()).await.unwrap();
    system.cart_client.add_item(bob.id, pads, 1).await.unwrap();

    let first = system.order_client.create_order(alice.id).await.unwrap();
    let second = system.order_client.create_order(bob.id).await.unwrap();

    assert_eq!(first.order_code.0, 500);
    assert_eq!(second.order_code.0, 501);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_system_shutdown() {
    let system = StorefrontSystem::new(&CheckoutConfig::default());
    let result = system.shutdown().await;
    assert!(result.is_ok());
}

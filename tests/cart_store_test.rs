use std::sync::Arc;
use storefront_checkout::cart_actor::CartError;
use storefront_checkout::checkout::CartStore;
use storefront_checkout::config::CheckoutConfig;
use storefront_checkout::lifecycle::StorefrontSystem;
use storefront_checkout::model::{CartStatus, ProductCreate, ProductId};

async fn setup() -> (StorefrontSystem, CartStore, ProductId, ProductId) {
    let system = StorefrontSystem::new(&CheckoutConfig::default());
    let pads = system
        .product_client
        .create_product(ProductCreate::new("Brake pad", 100.0, 3).with_brand("Brembo"))
        .await
        .unwrap();
    let filter = system
        .product_client
        .create_product(ProductCreate::new("Oil filter", 50.0, 10))
        .await
        .unwrap();
    let store = CartStore::new(Arc::new(system.cart_client.clone()), "alice".into());
    (system, store, pads, filter)
}

#[tokio::test]
async fn load_creates_an_empty_active_cart_once() {
    let (system, mut store, _, _) = setup().await;
    assert!(store.cart().is_none());
    assert_eq!(store.total_quantity(), 0);

    let first = store.load().await.unwrap().id;
    let second = store.load().await.unwrap().id;

    assert_eq!(first, second);
    assert_eq!(store.cart().unwrap().status, CartStatus::Active);
    assert!(store.items().is_empty());

    drop(store);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn adding_items_merges_lines_and_updates_totals() {
    let (system, mut store, pads, filter) = setup().await;

    store.add(pads, 1).await.unwrap();
    store.add(filter, 1).await.unwrap();
    let cart = store.add(filter, 1).await.unwrap();

    assert_eq!(cart.items.len(), 2);
    assert_eq!(cart.item(filter).unwrap().quantity, 2);
    assert_eq!(cart.item(pads).unwrap().brand, "Brembo");
    assert_eq!(store.total_quantity(), 3);
    assert_eq!(store.total_price(), 200.0);

    drop(store);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn increment_and_decrement_by_line() {
    let (system, mut store, pads, _) = setup().await;
    store.add(pads, 1).await.unwrap();
    let line = store.items()[0].cart_item_id;

    assert_eq!(store.increment(line).await.unwrap().items[0].quantity, 2);
    assert_eq!(store.decrement(line).await.unwrap().items[0].quantity, 1);

    // Going below one removes the line.
    let cart = store.decrement(line).await.unwrap();
    assert!(cart.items.is_empty());

    drop(store);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn stock_limits_are_enforced_and_state_is_kept() {
    let (system, mut store, pads, _) = setup().await;
    store.add(pads, 2).await.unwrap();

    let err = store.add(pads, 2).await.unwrap_err();
    assert_eq!(
        err,
        CartError::InsufficientStock {
            requested: 4,
            available: 3
        }
    );
    assert_eq!(store.total_quantity(), 2);

    let err = store.update_quantity(pads, 5).await.unwrap_err();
    assert!(matches!(err, CartError::InsufficientStock { .. }));
    assert_eq!(store.update_quantity(pads, 3).await.unwrap().total_quantity(), 3);

    let err = store.update_quantity(pads, 0).await.unwrap_err();
    assert_eq!(err, CartError::InvalidQuantity(0));

    drop(store);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn remove_and_clear() {
    let (system, mut store, pads, filter) = setup().await;
    store.add(pads, 1).await.unwrap();
    store.add(filter, 4).await.unwrap();

    let cart = store.remove(pads).await.unwrap();
    assert_eq!(cart.items.len(), 1);
    assert!(cart.item(pads).is_none());

    let err = store.remove(pads).await.unwrap_err();
    assert!(matches!(err, CartError::ItemNotFound(_)));

    assert!(store.clear().await.unwrap().is_empty());
    assert_eq!(store.total_price(), 0.0);

    drop(store);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn locked_cart_rejects_edits_until_unlocked() {
    let (system, mut store, pads, filter) = setup().await;
    store.add(pads, 1).await.unwrap();

    assert_eq!(store.lock().await.unwrap().status, CartStatus::Locked);

    let err = store.add(filter, 1).await.unwrap_err();
    assert_eq!(err, CartError::NotActive(CartStatus::Locked));
    assert_eq!(store.items().len(), 1);

    let cart = store.unlock().await.unwrap();
    assert_eq!(cart.status, CartStatus::Active);
    assert_eq!(store.add(filter, 1).await.unwrap().items.len(), 2);

    drop(store);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn unknown_product_is_unavailable() {
    let (system, mut store, _, _) = setup().await;

    let err = store.add(ProductId(999), 1).await.unwrap_err();
    assert!(matches!(err, CartError::ProductUnavailable(_)));

    drop(store);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn oversized_quantity_is_rejected_and_the_cart_keeps_working() {
    let (system, mut store, pads, filter) = setup().await;
    store.add(pads, 1).await.unwrap();

    let err = store.add(pads, u32::MAX).await.unwrap_err();
    assert_eq!(err, CartError::InvalidQuantity(u32::MAX));

    let cart = store.refresh().await.unwrap();
    assert_eq!(cart.item(pads).unwrap().quantity, 1);
    assert_eq!(store.add(filter, 1).await.unwrap().items.len(), 2);

    drop(store);
    system.shutdown().await.unwrap();
}

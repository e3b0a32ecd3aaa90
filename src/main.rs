//! # Storefront Checkout Demo
//!
//! Runs one checkout against the in-memory storefront:
//!
//! 1. seeds two products,
//! 2. fills alice's cart through a [`CartStore`],
//! 3. begins checkout and shows the payment intent,
//! 4. simulates the shopper paying two poll intervals later,
//! 5. waits for the outcome and shuts down.
//!
//! ```bash
//! RUST_LOG=info CHECKOUT_POLL_INTERVAL_MS=500 cargo run
//! ```

use std::sync::Arc;
use storefront_checkout::checkout::CartStore;
use storefront_checkout::config::CheckoutConfig;
use storefront_checkout::lifecycle::{setup_tracing, StorefrontSystem};
use storefront_checkout::model::{ProductCreate, UserName};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    _ = dotenvy::dotenv();
    setup_tracing();

    let config = CheckoutConfig::from_env();
    let system = StorefrontSystem::new(&config);

    let span = tracing::info_span!("catalog");
    let (pads, filter) = async {
        info!("Seeding products");
        let pads = system
            .product_client
            .create_product(ProductCreate::new("Brake pad", 100.0, 10).with_brand("Brembo"))
            .await?;
        let filter = system
            .product_client
            .create_product(ProductCreate::new("Oil filter", 50.0, 10).with_brand("Bosch"))
            .await?;
        Ok::<_, storefront_checkout::product_actor::ProductError>((pads, filter))
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let user = UserName::from("alice");
    let mut store = CartStore::new(Arc::new(system.cart_client.clone()), user.clone());
    store.add(pads, 1).await.map_err(|e| e.to_string())?;
    let cart = store.add(filter, 2).await.map_err(|e| e.to_string())?;
    let cart_id = cart.id;
    info!(%cart_id, quantity = store.total_quantity(), total = store.total_price(), "Cart ready");

    let coordinator = system.coordinator();
    let session = coordinator
        .begin(&user, cart_id)
        .await
        .map_err(|e| e.to_string())?;
    let intent = session.intent().clone();
    info!(
        order_code = %intent.order_code,
        amount = intent.amount,
        qr = %intent.qr_code_payload,
        expires_at = %intent.expires_at,
        "Scan to pay"
    );

    let payments = system.payment_client.clone();
    let delay = config.poll_interval * 2;
    let shopper = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        payments.mark_paid(intent.order_code).await
    });

    let outcome = session.outcome().await;
    if outcome.is_paid() {
        info!(?outcome, "Checkout completed");
    } else {
        error!(?outcome, "Checkout did not complete");
    }

    match shopper.await {
        Ok(Err(e)) => error!(error = %e, "Simulated payment failed"),
        Err(e) => error!(error = %e, "Shopper task failed"),
        Ok(Ok(_)) => {}
    }

    store.refresh().await.map_err(|e| e.to_string())?;
    info!(items = store.items().len(), "Cart after checkout");

    drop(store);
    drop(coordinator);
    system.shutdown().await?;
    info!("Demo finished");
    Ok(())
}

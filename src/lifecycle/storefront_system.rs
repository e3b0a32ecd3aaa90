use crate::checkout::CheckoutCoordinator;
use crate::clients::{CartClient, OrderClient, PaymentClient, ProductClient};
use crate::config::CheckoutConfig;
use crate::model::OrderCode;
use crate::order_actor::{random_order_code, OrderContext};
use std::sync::Arc;
use tracing::{error, info};

/// The in-memory storefront: product, cart, payment and order actors, wired together.
///
/// # Example
///
/// ```ignore
/// let system = StorefrontSystem::new(&CheckoutConfig::default());
///
/// let product = system.product_client.create_product(ProductCreate::new("Brake pad", 100.0, 5)).await?;
/// let cart_id = system.cart_client.create_cart("alice".into()).await?;
/// system.cart_client.add_item(cart_id, product, 2).await?;
///
/// let coordinator = system.coordinator();
/// let session = coordinator.begin(&"alice".into(), cart_id).await?;
/// // ... the shopper pays ...
/// let outcome = session.outcome().await;
///
/// drop(coordinator);
/// system.shutdown().await?;
/// ```
pub struct StorefrontSystem {
    pub product_client: ProductClient,
    pub cart_client: CartClient,
    pub payment_client: PaymentClient,
    pub order_client: OrderClient,
    config: CheckoutConfig,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl StorefrontSystem {
    /// Starts every actor. Order codes are drawn from the clock plus a random offset.
    pub fn new(config: &CheckoutConfig) -> Self {
        Self::with_order_codes(config, random_order_code)
    }

    /// Same as [`new`](Self::new) with a custom order code source.
    pub fn with_order_codes(
        config: &CheckoutConfig,
        order_codes: impl Fn() -> OrderCode + Send + Sync + 'static,
    ) -> Self {
        let (product_actor, product_client) = crate::product_actor::new();
        let (cart_actor, cart_client) = crate::cart_actor::new();
        let (payment_actor, payment_client) = crate::payment_actor::new();
        let (order_actor, order_client) = crate::order_actor::new();

        let product_handle = tokio::spawn(product_actor.run(()));
        let payment_handle = tokio::spawn(payment_actor.run(()));
        let cart_handle = tokio::spawn(cart_actor.run(product_client.clone()));

        let order_context = OrderContext::new(
            cart_client.clone(),
            payment_client.clone(),
            config.order_code_retries,
        )
        .with_order_codes(order_codes);
        let order_handle = tokio::spawn(order_actor.run(order_context));

        info!(?config, "Storefront started");
        Self {
            product_client,
            cart_client,
            payment_client,
            order_client,
            config: config.clone(),
            handles: vec![order_handle, cart_handle, payment_handle, product_handle],
        }
    }

    pub fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    /// A checkout coordinator backed by this system's actors. It holds client clones, so drop
    /// it before calling [`shutdown`](Self::shutdown).
    pub fn coordinator(&self) -> CheckoutCoordinator {
        CheckoutCoordinator::new(
            Arc::new(self.cart_client.clone()),
            Arc::new(self.order_client.clone()),
            Arc::new(self.payment_client.clone()),
            &self.config,
        )
    }

    /// Drops the clients and waits for every actor to stop.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down storefront...");
        drop(self.order_client);
        drop(self.cart_client);
        drop(self.payment_client);
        drop(self.product_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Storefront shutdown complete.");
        Ok(())
    }
}

//! # Order State Updater
//!
//! Commits terminal statuses and reactivates carts. Neither operation ever fails from the
//! caller's point of view: errors are logged and reported as `false`.

use crate::model::{OrderCode, OrderStatus, UserName};
use crate::services::{CartService, OrderService};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{info, instrument, warn};

pub struct OrderStateUpdater {
    orders: Arc<dyn OrderService>,
    carts: Arc<dyn CartService>,
    applied: Mutex<HashSet<(OrderCode, OrderStatus)>>,
}

impl OrderStateUpdater {
    pub fn new(orders: Arc<dyn OrderService>, carts: Arc<dyn CartService>) -> Self {
        Self {
            orders,
            carts,
            applied: Mutex::new(HashSet::new()),
        }
    }

    fn already_applied(&self, key: &(OrderCode, OrderStatus)) -> bool {
        self.applied
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(key)
    }

    /// Applies `status` to the order once. Returns `true` when the order service accepted it.
    /// A status that was already applied through this updater is not sent again.
    #[instrument(skip(self))]
    pub async fn apply(&self, order_code: OrderCode, status: OrderStatus) -> bool {
        let key = (order_code, status);
        if self.already_applied(&key) {
            info!("Status already applied");
            return false;
        }
        match self.orders.change_status(order_code, status).await {
            Ok(changed) => {
                self.applied
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .insert(key);
                info!(changed, "Order status committed");
                true
            }
            Err(e) => {
                warn!(error = %e, "Could not update order status");
                false
            }
        }
    }

    /// Unlocks the user's cart so it can be edited and checked out again.
    #[instrument(skip(self))]
    pub async fn reactivate_cart(&self, user: &UserName) -> bool {
        match self.carts.unlock(user).await {
            Ok(()) => {
                info!("Cart reactivated");
                true
            }
            Err(e) => {
                warn!(error = %e, "Could not reactivate cart");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart_actor::CartError;
    use crate::model::{Cart, CartId, CartItemId, CreatedOrder, Order, ProductId};
    use crate::order_actor::OrderError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    const CODE: OrderCode = OrderCode(4242);

    #[derive(Default)]
    struct Orders {
        down: bool,
        calls: AtomicU32,
    }

    #[async_trait]
    impl OrderService for Orders {
        async fn create_order(&self, _cart_id: CartId) -> Result<CreatedOrder, OrderError> {
            Err(OrderError::Unavailable("not used".into()))
        }

        async fn change_status(&self, _code: OrderCode, _status: OrderStatus) -> Result<bool, OrderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.down {
                Err(OrderError::Unavailable("connection refused".into()))
            } else {
                Ok(true)
            }
        }

        async fn pending_order(&self, _user: &UserName) -> Result<Option<OrderCode>, OrderError> {
            Ok(None)
        }

        async fn orders_by_status(&self, _status: OrderStatus) -> Result<Vec<Order>, OrderError> {
            Ok(Vec::new())
        }
    }

    #[derive(Default)]
    struct Carts {
        down: bool,
        unlocks: AtomicU32,
    }

    fn unused() -> CartError {
        CartError::Unavailable("not used".into())
    }

    #[async_trait]
    impl CartService for Carts {
        async fn get_or_create(&self, _user: &UserName) -> Result<Cart, CartError> {
            Err(unused())
        }

        async fn get(&self, _cart_id: CartId) -> Result<Cart, CartError> {
            Err(unused())
        }

        async fn add_item(&self, _cart_id: CartId, _product_id: ProductId, _quantity: u32) -> Result<Cart, CartError> {
            Err(unused())
        }

        async fn remove_item(&self, _cart_id: CartId, _product_id: ProductId) -> Result<Cart, CartError> {
            Err(unused())
        }

        async fn update_quantity(
            &self,
            _cart_id: CartId,
            _product_id: ProductId,
            _quantity: u32,
        ) -> Result<Cart, CartError> {
            Err(unused())
        }

        async fn increment(&self, _cart_id: CartId, _cart_item_id: CartItemId) -> Result<Cart, CartError> {
            Err(unused())
        }

        async fn decrement(&self, _cart_id: CartId, _cart_item_id: CartItemId) -> Result<Cart, CartError> {
            Err(unused())
        }

        async fn clear(&self, _cart_id: CartId) -> Result<Cart, CartError> {
            Err(unused())
        }

        async fn lock(&self, _cart_id: CartId) -> Result<Cart, CartError> {
            Err(unused())
        }

        async fn unlock(&self, _user: &UserName) -> Result<(), CartError> {
            self.unlocks.fetch_add(1, Ordering::SeqCst);
            if self.down {
                Err(CartError::Unavailable("Actor closed".into()))
            } else {
                Ok(())
            }
        }

        async fn complete_checkout(&self, _cart_id: CartId) -> Result<(), CartError> {
            Err(unused())
        }
    }

    fn updater(orders: &Arc<Orders>, carts: &Arc<Carts>) -> OrderStateUpdater {
        OrderStateUpdater::new(orders.clone(), carts.clone())
    }

    #[tokio::test]
    async fn same_status_is_sent_once() {
        let orders = Arc::new(Orders::default());
        let carts = Arc::new(Carts::default());
        let updater = updater(&orders, &carts);

        assert!(updater.apply(CODE, OrderStatus::Cancelled).await);
        assert!(!updater.apply(CODE, OrderStatus::Cancelled).await);
        assert_eq!(orders.calls.load(Ordering::SeqCst), 1);

        assert!(updater.apply(CODE, OrderStatus::Delivered).await);
        assert_eq!(orders.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_update_is_swallowed_and_can_be_retried() {
        let orders = Arc::new(Orders {
            down: true,
            ..Orders::default()
        });
        let carts = Arc::new(Carts::default());
        let updater = updater(&orders, &carts);

        assert!(!updater.apply(CODE, OrderStatus::Submitted).await);
        assert!(!updater.apply(CODE, OrderStatus::Submitted).await);
        assert_eq!(orders.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn reactivation_reports_failures_without_raising() {
        let orders = Arc::new(Orders::default());
        let up = Arc::new(Carts::default());
        let down = Arc::new(Carts {
            down: true,
            ..Carts::default()
        });

        assert!(updater(&orders, &up).reactivate_cart(&"alice".into()).await);
        assert!(!updater(&orders, &down).reactivate_cart(&"alice".into()).await);
        assert_eq!(down.unlocks.load(Ordering::SeqCst), 1);
    }
}

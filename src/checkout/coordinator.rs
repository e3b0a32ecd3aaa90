//! # Checkout Coordinator
//!
//! Runs one checkout attempt end to end: the initiator creates the order, a poll task watches
//! the payment, and the outcome is settled:
//!
//! | Poll outcome        | Order       | Payment link | Cart                     | Result              |
//! |---------------------|-------------|--------------|--------------------------|---------------------|
//! | `Paid`              | `Submitted` |              | checked out              | `Paid`              |
//! | `Cancelled`         | `Cancelled` |              | reactivated              | `PaymentCancelled`  |
//! | `TimedOut`          | `Cancelled` | cancelled    | reactivated              | `PaymentExpired`    |
//! | `Exhausted`         | `Cancelled` | cancelled    | reactivated              | `PaymentExhausted`  |
//! | `Closed`            |             |              |                          | `Closed`            |
//!
//! If cancelling the link after a timeout reveals that the payment went through in the
//! meantime, the attempt is settled as paid.
//!
//! Closing a session leaves the order pending and the cart locked, so the shopper can come
//! back to the same QR code until the order is cancelled.

use crate::checkout::initiator::CheckoutInitiator;
use crate::checkout::poller::{PaymentPoller, PollOutcome};
use crate::checkout::task::Cancellable;
use crate::checkout::updater::OrderStateUpdater;
use crate::config::CheckoutConfig;
use crate::error::CheckoutError;
use crate::model::{CartId, OrderCode, OrderStatus, PaymentIntent, PaymentStatus, UserName};
use crate::payment_actor::PaymentError;
use crate::services::{CartService, OrderService, PaymentStatusService};
use std::sync::Arc;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutOutcome {
    Paid { order_code: OrderCode, attempts: u32 },
    Failed(CheckoutError),
    /// The session was closed before the payment resolved. Nothing was changed.
    Closed,
}

impl CheckoutOutcome {
    pub fn is_paid(&self) -> bool {
        matches!(self, CheckoutOutcome::Paid { .. })
    }
}

pub struct CheckoutCoordinator {
    initiator: CheckoutInitiator,
    poller: PaymentPoller,
    carts: Arc<dyn CartService>,
    orders: Arc<dyn OrderService>,
    payments: Arc<dyn PaymentStatusService>,
}

/// Settles a single attempt. Built fresh for every session, so the updater's record of
/// applied statuses never outlives the attempt.
struct Settler {
    updater: OrderStateUpdater,
    carts: Arc<dyn CartService>,
    payments: Arc<dyn PaymentStatusService>,
}

impl CheckoutCoordinator {
    pub fn new(
        carts: Arc<dyn CartService>,
        orders: Arc<dyn OrderService>,
        payments: Arc<dyn PaymentStatusService>,
        config: &CheckoutConfig,
    ) -> Self {
        Self {
            initiator: CheckoutInitiator::new(carts.clone(), orders.clone(), config.payment_timeout),
            poller: PaymentPoller::new(payments.clone(), config),
            carts,
            orders,
            payments,
        }
    }

    /// Starts a checkout. Precondition failures are returned here; everything after the
    /// order was created is reported through [`CheckoutSession::outcome`].
    #[instrument(skip(self))]
    pub async fn begin(&self, user: &UserName, cart_id: CartId) -> Result<CheckoutSession, CheckoutError> {
        let intent = self.initiator.initiate(user, cart_id).await?;

        let order_code = intent.order_code;
        let poller = self.poller.clone();
        let settler = Settler {
            updater: OrderStateUpdater::new(self.orders.clone(), self.carts.clone()),
            carts: self.carts.clone(),
            payments: self.payments.clone(),
        };
        let user = user.clone();
        let task = Cancellable::spawn(move |closed| async move {
            let polled = poller.poll(order_code, closed).await;
            settler.settle(&user, cart_id, order_code, polled).await
        });

        Ok(CheckoutSession { intent, task })
    }
}

impl Settler {
    #[instrument(skip(self))]
    async fn settle(
        &self,
        user: &UserName,
        cart_id: CartId,
        order_code: OrderCode,
        polled: PollOutcome,
    ) -> CheckoutOutcome {
        match polled {
            PollOutcome::Paid { attempts } => self.paid(cart_id, order_code, attempts).await,
            PollOutcome::Cancelled { .. } => {
                self.abandon(user, order_code).await;
                CheckoutOutcome::Failed(CheckoutError::PaymentCancelled(order_code))
            }
            PollOutcome::TimedOut { attempts } | PollOutcome::Exhausted { attempts } => {
                match self.payments.cancel(order_code).await {
                    Err(PaymentError::AlreadyFinal(PaymentStatus::Paid)) => {
                        info!("Payment settled just before cancellation");
                        return self.paid(cart_id, order_code, attempts).await;
                    }
                    Err(e) => warn!(error = %e, "Could not cancel payment link"),
                    Ok(()) => {}
                }
                self.abandon(user, order_code).await;
                let error = match polled {
                    PollOutcome::TimedOut { .. } => CheckoutError::PaymentExpired(order_code),
                    _ => CheckoutError::PaymentExhausted {
                        order_code,
                        attempts,
                    },
                };
                CheckoutOutcome::Failed(error)
            }
            PollOutcome::Closed { .. } => CheckoutOutcome::Closed,
        }
    }

    async fn paid(&self, cart_id: CartId, order_code: OrderCode, attempts: u32) -> CheckoutOutcome {
        self.updater.apply(order_code, OrderStatus::Submitted).await;
        if let Err(e) = self.carts.complete_checkout(cart_id).await {
            warn!(%cart_id, error = %e, "Could not check out cart");
        }
        CheckoutOutcome::Paid {
            order_code,
            attempts,
        }
    }

    async fn abandon(&self, user: &UserName, order_code: OrderCode) {
        self.updater.apply(order_code, OrderStatus::Cancelled).await;
        self.updater.reactivate_cart(user).await;
    }
}

/// One checkout attempt in flight. Dropping it has the same effect as [`close`](Self::close).
#[derive(Debug)]
pub struct CheckoutSession {
    intent: PaymentIntent,
    task: Cancellable<CheckoutOutcome>,
}

impl CheckoutSession {
    /// QR payload, order code, amount and expiry to show the shopper.
    pub fn intent(&self) -> &PaymentIntent {
        &self.intent
    }

    pub fn order_code(&self) -> OrderCode {
        self.intent.order_code
    }

    /// Stops polling. The outcome becomes [`CheckoutOutcome::Closed`] unless the payment had
    /// already resolved.
    pub fn close(&mut self) {
        self.task.close();
    }

    pub async fn outcome(self) -> CheckoutOutcome {
        let order_code = self.intent.order_code;
        match self.task.join().await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(%order_code, error = %e, "Checkout task failed");
                CheckoutOutcome::Closed
            }
        }
    }
}

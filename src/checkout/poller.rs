//! # Payment Poller
//!
//! Asks the payment service for an order's status on a fixed interval until one of:
//!
//! | Outcome     | Trigger                                                     |
//! |-------------|-------------------------------------------------------------|
//! | `Paid`      | the service reports `PAID`                                  |
//! | `Cancelled` | the service reports `CANCELLED`                             |
//! | `TimedOut`  | the wall-clock timeout elapses, whatever the attempt count  |
//! | `Exhausted` | `max_attempts` checks came back unresolved                  |
//! | `Closed`    | the session was closed or dropped                           |
//!
//! The first check happens one interval after start. A failed check counts as an unresolved
//! attempt and polling carries on. While a check is in flight, close and the deadline still win.

use crate::checkout::task::Cancellable;
use crate::config::CheckoutConfig;
use crate::model::{OrderCode, PaymentStatus};
use crate::services::PaymentStatusService;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Paid { attempts: u32 },
    Cancelled { attempts: u32 },
    TimedOut { attempts: u32 },
    Exhausted { attempts: u32 },
    Closed { attempts: u32 },
}

impl PollOutcome {
    /// Number of status checks that were sent.
    pub fn attempts(self) -> u32 {
        match self {
            PollOutcome::Paid { attempts }
            | PollOutcome::Cancelled { attempts }
            | PollOutcome::TimedOut { attempts }
            | PollOutcome::Exhausted { attempts }
            | PollOutcome::Closed { attempts } => attempts,
        }
    }
}

#[derive(Clone)]
pub struct PaymentPoller {
    payments: Arc<dyn PaymentStatusService>,
    interval: Duration,
    timeout: Duration,
    max_attempts: u32,
}

impl PaymentPoller {
    pub fn new(payments: Arc<dyn PaymentStatusService>, config: &CheckoutConfig) -> Self {
        Self {
            payments,
            interval: config.poll_interval,
            timeout: config.payment_timeout,
            max_attempts: config.max_attempts.max(1),
        }
    }

    /// Starts polling in its own task.
    pub fn start(&self, order_code: OrderCode) -> PollSession {
        let poller = self.clone();
        PollSession {
            order_code,
            task: Cancellable::spawn(move |closed| async move { poller.poll(order_code, closed).await }),
        }
    }

    /// Polls until a terminal outcome. Resolving or dropping `closed`'s sender ends it with
    /// [`PollOutcome::Closed`].
    #[instrument(skip(self, closed))]
    pub async fn poll(&self, order_code: OrderCode, mut closed: oneshot::Receiver<()>) -> PollOutcome {
        let deadline = time::sleep(self.timeout);
        tokio::pin!(deadline);
        let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut attempts = 0;

        let outcome = loop {
            tokio::select! {
                biased;
                _ = &mut closed => break PollOutcome::Closed { attempts },
                _ = &mut deadline => break PollOutcome::TimedOut { attempts },
                _ = ticker.tick() => {}
            }

            attempts += 1;
            let checked = tokio::select! {
                biased;
                _ = &mut closed => break PollOutcome::Closed { attempts },
                _ = &mut deadline => break PollOutcome::TimedOut { attempts },
                checked = self.payments.status(order_code) => checked,
            };

            match checked {
                Ok(PaymentStatus::Paid) => break PollOutcome::Paid { attempts },
                Ok(PaymentStatus::Cancelled) => break PollOutcome::Cancelled { attempts },
                Ok(PaymentStatus::Pending) => debug!(attempt = attempts, "Payment still pending"),
                Err(e) => warn!(attempt = attempts, error = %e, "Payment status check failed"),
            }

            if attempts >= self.max_attempts {
                break PollOutcome::Exhausted { attempts };
            }
        };

        info!(?outcome, "Polling finished");
        outcome
    }
}

/// A running poll. Closing or dropping it stops the interval and the deadline with it.
#[derive(Debug)]
pub struct PollSession {
    order_code: OrderCode,
    task: Cancellable<PollOutcome>,
}

impl PollSession {
    pub fn order_code(&self) -> OrderCode {
        self.order_code
    }

    pub fn close(&mut self) {
        self.task.close();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the poll to end.
    pub async fn outcome(self) -> PollOutcome {
        match self.task.join().await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(order_code = %self.order_code, error = %e, "Poll task failed");
                PollOutcome::Closed { attempts: 0 }
            }
        }
    }
}

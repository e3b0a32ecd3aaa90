//! # Checkout
//!
//! The checkout slice, wired together by [`CheckoutCoordinator`]:
//!
//! ```text
//! CartStore -> CheckoutInitiator -> PaymentPoller -> OrderStateUpdater -> cart checked out / reactivated
//! ```
//!
//! Everything here talks to the backend through the traits in [`crate::services`], so the
//! same flow runs against the in-memory actors and the REST backend.

pub mod cart_store;
pub mod coordinator;
pub mod initiator;
pub mod poller;
pub mod task;
pub mod updater;

pub use cart_store::CartStore;
pub use coordinator::{CheckoutCoordinator, CheckoutOutcome, CheckoutSession};
pub use initiator::CheckoutInitiator;
pub use poller::{PaymentPoller, PollOutcome, PollSession};
pub use task::Cancellable;
pub use updater::OrderStateUpdater;

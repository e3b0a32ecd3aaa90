//! # System Lifecycle
//!
//! Starting, wiring and stopping the in-memory storefront.
//!
//! Actors are created without dependencies and receive them through `run(context)`:
//!
//! | Actor    | Context          |
//! |----------|------------------|
//! | Product  | `()`             |
//! | Payment  | `()`             |
//! | Cart     | `ProductClient`  |
//! | Order    | `OrderContext` (cart and payment clients, order code source) |
//!
//! The dependency graph is acyclic, so dropping every client outside the actors is enough to
//! stop them all: the order actor exits first and releases its cart and payment clients, and
//! the cart actor then releases its product client.
//!
//! [`setup_tracing`] installs the log subscriber; see the [`tracing`] module.

pub mod storefront_system;
pub mod tracing;

pub use storefront_system::*;
pub use tracing::*;

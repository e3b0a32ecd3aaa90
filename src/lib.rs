//! # Storefront Checkout
//!
//! The checkout and payment-reconciliation slice of a storefront: a shopper's cart becomes a
//! pending order with a QR payment intent, the payment is polled until it resolves, and the
//! result is committed back to the order and the cart.
//!
//! ## Flow
//!
//! ```text
//! CartStore -> CheckoutInitiator -> PaymentPoller -> OrderStateUpdater -> cart checked out / reactivated
//! ```
//!
//! [`checkout::CheckoutCoordinator`] runs the whole flow for one attempt and hands back a
//! [`checkout::CheckoutSession`] that can be awaited or closed.
//!
//! ## Backends
//!
//! Checkout only sees the traits in [`services`]. Two backends implement them:
//!
//! - **In-memory actors**, built on the generic resource actor in [`framework`]. Each resource
//!   type ([`product_actor`], [`cart_actor`], [`payment_actor`], [`order_actor`]) runs in its own
//!   Tokio task and processes requests one at a time. [`lifecycle::StorefrontSystem`] starts and
//!   wires them; [`clients`] wraps them in typed handles. The payment actor stands in for the
//!   gateway.
//! - **HTTP**, in [`rest`], against the storefront backend's `/app/...` endpoints.
//!
//! ## Errors
//!
//! Each service has its own error enum (`CartError`, `OrderError`, `PaymentError`,
//! `ProductError`); checkout folds them into [`error::CheckoutError`].
//!
//! ## Testing
//!
//! [`framework::mock`] provides a `MockClient` with expectations for unit-testing code that
//! talks to an actor. Timer-driven tests run on a paused Tokio clock.
//!
//! ```bash
//! RUST_LOG=info cargo run
//! cargo test
//! ```

pub mod cart_actor;
pub mod checkout;
pub mod clients;
pub mod config;
pub mod error;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod payment_actor;
pub mod product_actor;
pub mod rest;
pub mod services;

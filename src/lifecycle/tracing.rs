//! # Tracing
//!
//! [`setup_tracing`] installs a compact `fmt` subscriber filtered by `RUST_LOG`. Module paths
//! are hidden; actor logs carry an `entity_type` field instead and checkout logs carry
//! `order_code`, `cart_id` and `attempt`.
//!
//! ```bash
//! RUST_LOG=info cargo run          # transitions only
//! RUST_LOG=debug cargo run         # payloads and every pending poll
//! RUST_LOG=storefront_checkout::checkout=debug cargo run
//! ```
//!
//! A paid checkout at `info` looks like:
//!
//! ```text
//! INFO begin:initiate: Checkout started order_code=1700000001234 amount=200.0
//! INFO poll: Polling finished outcome=Paid { attempts: 4 }
//! INFO settle:apply: Order status committed changed=true
//! ```

/// Installs the global subscriber. Call once, at startup.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}

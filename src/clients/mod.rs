//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient), one per
//! actor. The cart, order and payment clients also implement the service traits in
//! [`crate::services`], which is how checkout runs against the in-memory backend.

pub mod cart_client;
pub mod order_client;
pub mod payment_client;
pub mod product_client;

pub use cart_client::*;
pub use order_client::*;
pub use payment_client::*;
pub use product_client::*;

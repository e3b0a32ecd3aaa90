//! # Payment Actor
//!
//! Simulates the payment gateway. Each order gets one payment link keyed by its
//! [`OrderCode`](crate::model::OrderCode); links are stored through `insert`, so a
//! duplicate order code is refused the way a real gateway answers `409 Conflict`.
//!
//! A link starts `Pending` and ends either `Paid` (the shopper scanned the QR code) or
//! `Cancelled`. Both ends are final.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::PaymentClient;
use crate::framework::ResourceActor;
use crate::model::PaymentLink;

/// Creates a new Payment actor and its client.
pub fn new() -> (ResourceActor<PaymentLink>, PaymentClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    (actor, PaymentClient::new(generic_client))
}

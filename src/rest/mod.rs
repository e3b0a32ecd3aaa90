//! HTTP backend for the service traits.

pub mod client;
pub mod dto;
pub mod session;

pub use client::RestClient;
pub use session::{Session, SessionError};

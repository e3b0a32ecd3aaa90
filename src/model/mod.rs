//! Pure data structures shared by the actors, the REST clients and the checkout flow.

pub mod cart;
pub mod order;
pub mod payment;
pub mod product;
pub mod user;

pub use cart::*;
pub use order::*;
pub use payment::*;
pub use product::*;
pub use user::*;

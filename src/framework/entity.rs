//! # ActorEntity Trait
//!
//! The contract every in-memory resource (product, cart, order, payment link) implements so
//! that a single generic [`ResourceActor`](crate::framework::ResourceActor) can own it.
//!
//! Associated types pin each resource to its own payloads: a `CartCreate` can never be sent to
//! the order actor. Hooks are async and receive the actor's `Context`, which is where clients of
//! other actors live (the cart actor looks products up, the order actor snapshots carts and opens
//! payment links).

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource managed by a `ResourceActor` must implement.
///
/// # Provided Methods (Hooks)
/// - [`ActorEntity::on_create`] runs after [`ActorEntity::from_create_params`] and may reject
///   the new entity.
/// - [`ActorEntity::on_delete`] runs before removal.
///
/// Both default to `Ok(())`.
///
/// Resources that never accept updates use [`std::convert::Infallible`] as their `Update`
/// type and implement `on_update` with an empty match.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Identifier; generated ids are produced from a `u64` counter.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u64>;

    /// Creation payload.
    type Create: Send + Sync + Debug;

    /// Update payload.
    type Update: Send + Sync + Debug;

    /// Resource-specific operations (e.g. `Lock`, `ChangeStatus`).
    type Action: Send + Sync + Debug;

    /// Result of a custom action.
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected at `run()` time. Use `()` if none are needed.
    type Context: Send + Sync;

    /// One error enum per resource.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the entity from its id and payload. Called before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Called after construction, before the entity is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply an update payload.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called before the entity is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle a custom action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}

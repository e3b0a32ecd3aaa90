//! # ActorClient Trait
//!
//! Shared surface of the resource-specific clients (`CartClient`, `OrderClient`, ...). Each
//! wrapper supplies its inner [`ResourceClient`] and an error mapping, and inherits
//! `get`, `find` and `delete`.

use crate::framework::client::ResourceClient;
use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit the plain lookups.
///
/// ```ignore
/// #[async_trait]
/// impl ActorClient<Cart> for CartClient {
///     type Error = CartError;
///     fn inner(&self) -> &ResourceClient<Cart> { &self.inner }
///     fn map_error(e: FrameworkError) -> CartError {
///         e.into_entity_error(|e| CartError::Unavailable(e.to_string()))
///     }
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Every entity matching `predicate`.
    #[tracing::instrument(skip(self, predicate))]
    async fn find<P>(&self, predicate: P) -> Result<Vec<T>, Self::Error>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        tracing::debug!("Sending request");
        self.inner().find(predicate).await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}

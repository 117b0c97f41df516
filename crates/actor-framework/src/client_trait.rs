//! # ActorClient Trait
//!
//! Shared plumbing for resource-specific clients: `get`, `delete` and `find`
//! with the framework error already translated into the resource's own error.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard operations.
///
/// ```rust,ignore
/// #[async_trait]
/// impl ActorClient<Product> for CatalogClient {
///     type Error = CatalogError;
///     fn inner(&self) -> &ResourceClient<Product> { &self.inner }
///     fn map_error(e: FrameworkError) -> CatalogError { /* downcast or wrap */ }
/// }
///
/// // get(), delete() and find() are now available on CatalogClient.
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

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

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }

    /// Every entity the filter accepts, in ID order.
    #[tracing::instrument(skip(self, filter))]
    async fn find<F>(&self, filter: F) -> Result<Vec<T>, Self::Error>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        tracing::debug!("Sending request");
        self.inner().list(filter).await.map_err(Self::map_error)
    }
}

//! # ActorClient Trait
//!
//! Provides a common interface for resource‑specific clients, adding default `get`, `delete`
//! and `list` methods built on top of a generic `ResourceClient`.
use crate::{ActorEntity, Filter, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard operations.
///
/// Implementors supply the inner `ResourceClient` and an error mapping; the
/// plain lookups come for free while domain methods (`ship`, `cancel`, ...)
/// stay on the wrapper.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Clone)]
/// pub struct PurchaseClient {
///     inner: ResourceClient<Purchase>,
/// }
///
/// #[async_trait]
/// impl ActorClient<Purchase> for PurchaseClient {
///     type Error = PurchaseError;
///
///     fn inner(&self) -> &ResourceClient<Purchase> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> Self::Error {
///         PurchaseError::from(e.to_string())
///     }
/// }
///
/// // get(), delete() and list() are provided automatically
/// let purchase = client.get(PurchaseId(1)).await?;
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<String> + Send + Sync;

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

    /// Snapshot of every entity matching `filter`, in id order.
    #[tracing::instrument(skip(self))]
    async fn list(&self, filter: Filter<T>) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list(filter).await.map_err(Self::map_error)
    }
}

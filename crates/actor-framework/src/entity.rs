//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract every resource (an inventory box, a
//! purchase, ...) implements to be managed by the generic `ResourceActor`. It
//! names the associated types for IDs, DTOs, actions, context and errors, and
//! provides the lifecycle hooks (`on_create`, `on_update`, `on_delete`,
//! `handle_action`).
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//!
//! Both default to `Ok(())`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// Hooks are `#[async_trait]` so they can await other actors or external
/// collaborators. The `Context` type is injected into every hook at
/// `run(ctx)` time ("late binding"), which keeps construction free of
/// dependency cycles.
///
/// # Atomicity
/// A hook runs to completion before the owning actor looks at its next
/// message. Anything an entity does between reading and mutating its own state
/// inside one hook is therefore a single unit of work with respect to that
/// entity, even across `.await` points.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for automatic ID generation, and ordered so
    /// listings come back in creation order.
    type Id: Eq + Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance (DTO - Data Transfer Object).
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum representing resource-specific operations (e.g. `Draw`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One enum per actor rather than one per message: every hook of an entity
    /// returns the same error type, which keeps client-side matching simple.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The identifier this entity was created with.
    fn id(&self) -> &Self::Id;

    /// Construct the full Entity from the ID and Payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after construction, before the entity is stored.
    /// An error here discards the entity.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the system.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}

/// Maps an identifier back to the raw sequence number it was generated from.
///
/// Implemented by IDs of entities that live in a sharded pool; the sequence
/// number decides which shard owns the entity.
pub trait ShardKey {
    fn shard_key(&self) -> u32;
}

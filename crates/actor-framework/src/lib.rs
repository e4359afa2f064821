//! # Actor Framework
//!
//! This crate provides the foundational building blocks for type-safe, concurrent actor systems
//! in Rust. It applies a **Resource-Oriented Architecture (ROA)** on top of the **Actor Model**:
//! every kind of stateful entity is a resource with a uniform lifecycle, owned by exactly one
//! actor that processes requests one at a time.
//!
//! ## Why ROA + Actor Model?
//!
//! - **Uniform surface**: create, get, update, delete and list look the same for every resource.
//! - **Isolated state**: an actor owns its entities outright; no locks, no shared memory.
//! - **Coordination by message**: when one resource needs another (an inventory box recording a
//!   purchase), it calls the other actor's client from inside its own hook instead of reaching
//!   into its state.
//!
//! **Further Reading**:
//! - [Actor Model (Wikipedia)](https://en.wikipedia.org/wiki/Actor_model)
//! - [Actors in Rust](https://ryhl.io/blog/actors-with-tokio/) - Practical guide to implementing actors with Tokio
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - domain model and business rules
//! 2. **Runtime Layer** ([`ResourceActor`]) - message processing and sequencing
//! 3. **Interface Layer** ([`ResourceClient`], [`ShardedClient`], [`ActorClient`]) - typed calls
//!
//! ## Quick Start
//!
//! ```rust
//! use actor_framework::{ActorEntity, Filter, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Counter { id: u32, value: u64 }
//!
//! #[derive(Debug)] struct CounterCreate;
//! #[derive(Debug)] enum CounterAction { Increment }
//! #[derive(Debug, thiserror::Error)] #[error("counter error")] struct CounterError;
//!
//! #[async_trait]
//! impl ActorEntity for Counter {
//!     type Id = u32;
//!     type Create = CounterCreate;
//!     type Update = ();
//!     type Action = CounterAction;
//!     type ActionResult = u64;
//!     type Context = ();
//!     type Error = CounterError;
//!
//!     fn id(&self) -> &u32 { &self.id }
//!
//!     fn from_create_params(id: u32, _: CounterCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, value: 0 })
//!     }
//!
//!     async fn on_update(&mut self, _: (), _: &()) -> Result<(), Self::Error> { Ok(()) }
//!
//!     async fn handle_action(&mut self, action: CounterAction, _: &()) -> Result<u64, Self::Error> {
//!         match action {
//!             CounterAction::Increment => {
//!                 self.value += 1;
//!                 Ok(self.value)
//!             }
//!         }
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Counter>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create(CounterCreate).await.unwrap();
//!     assert_eq!(client.perform_action(id, CounterAction::Increment).await.unwrap(), 1);
//!     assert_eq!(client.list(Filter::all()).await.unwrap().len(), 1);
//! }
//! ```
//!
//! ## Context Injection Pattern
//!
//! Dependencies are injected at **runtime** via `run(ctx)`, not at construction time. All actors
//! and clients are created first, then each actor is started with the clients it needs:
//!
//! ```rust,ignore
//! let (purchase_actor, purchase_client) = ResourceActor::<Purchase>::new(32);
//! let (stock_actors, stock_client) = ResourceActor::<StockBox>::sharded(4, 32);
//!
//! tokio::spawn(purchase_actor.run(()));
//! for actor in stock_actors {
//!     tokio::spawn(actor.run(StockContext { purchases: purchase_client.clone(), .. }));
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task and handles its messages **sequentially**, including
//!   every `.await` inside a hook.
//! - Distinct actors run in parallel.
//! - [`ResourceActor::sharded`] splits one entity type over several actors: requests for the same
//!   entity stay ordered while different entities proceed concurrently.
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a real `ResourceClient<T>` from canned expectations so an actor
//! can be tested against a dependency that fails on demand. See the [`mock`] module.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod sharded;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::{ActorEntity, ShardKey};
pub use error::FrameworkError;
pub use message::{Filter, ResourceRequest, Response};
pub use sharded::ShardedClient;

//! # Stock Actor
//!
//! Inventory boxes and the draw engine.
//!
//! ## Overview
//!
//! Boxes live in a sharded pool of `ResourceActor<StockBox>`: every box id is
//! owned by exactly one shard, which handles all requests for that box one at
//! a time. Draws on the same box are therefore serialized while boxes on other
//! shards are served in parallel.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation: sealing and drawing
//! - [`allocator`] - box contents with hidden-style substitution
//! - [`error`] - [`StockError`]
//! - [`actions`] - [`StockAction`], [`StockActionResult`], [`DrawOutcome`]
//! - [`new()`] - Factory function that creates the shards and their client
//!
//! ## Dependencies
//!
//! Each shard runs with a [`StockContext`]: the catalog for sealing and for
//! purchase metadata, the purchase ledger, and the random source.

pub mod actions;
pub mod allocator;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::catalog::CatalogReader;
use crate::clients::PurchaseClient;
use crate::model::StockBox;
use crate::random::DrawSource;
use actor_framework::{ResourceActor, ShardedClient};
use std::sync::Arc;

/// Dependencies injected into every stock shard at `run(ctx)`.
#[derive(Clone)]
pub struct StockContext {
    pub catalog: Arc<dyn CatalogReader>,
    pub purchases: PurchaseClient,
    pub source: Arc<dyn DrawSource>,
    pub hidden_probability: f64,
}

impl StockContext {
    pub fn new(
        catalog: Arc<dyn CatalogReader>,
        purchases: PurchaseClient,
        source: Arc<dyn DrawSource>,
        hidden_probability: f64,
    ) -> Self {
        Self {
            catalog,
            purchases,
            source,
            hidden_probability,
        }
    }
}

/// Creates the stock shards and the client that routes between them.
pub fn new(
    shards: usize,
    buffer_size: usize,
) -> (Vec<ResourceActor<StockBox>>, ShardedClient<StockBox>) {
    ResourceActor::sharded(shards, buffer_size)
}

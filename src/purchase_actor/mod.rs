//! # Purchase Actor
//!
//! The order ledger: one [`Purchase`] per successful draw, and its shipping lifecycle.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation with the state machine
//! - [`error`] - [`PurchaseError`]
//! - [`actions`] - [`PurchaseAction`] and [`PurchaseActionResult`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! The actor has no dependencies (`Context = ()`). It never calls back into the
//! inventory actors, which is what lets an inventory box await it mid-draw.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Purchase;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Purchase actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Purchase>, ResourceClient<Purchase>) {
    ResourceActor::new(buffer_size)
}

//! # Sharded Actor Pools
//!
//! A single `ResourceActor` serializes *every* request for its entity type.
//! When only requests for the *same* entity need ordering, a pool of actors
//! keeps that guarantee while letting unrelated entities proceed in parallel.
//!
//! Each entity id belongs to exactly one shard, chosen from its sequence
//! number ([`ShardKey`]). Shard `k` of `n` only ever mints ids whose sequence
//! is `k+1 (mod n)`, so routing needs no lookup table:
//!
//! ```text
//! shard 0: 1, 5, 9, ...
//! shard 1: 2, 6, 10, ...      (n = 4)
//! shard 2: 3, 7, 11, ...
//! shard 3: 4, 8, 12, ...
//! ```
//!
//! Creates are spread round-robin. `list` asks every shard and merges the
//! answers in id order.

use crate::actor::ResourceActor;
use crate::client::ResourceClient;
use crate::entity::{ActorEntity, ShardKey};
use crate::error::FrameworkError;
use crate::message::Filter;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

impl<T: ActorEntity> ResourceActor<T>
where
    T::Id: ShardKey,
{
    /// Creates `shards` actors and one client that routes between them.
    ///
    /// Every actor must be spawned with its own `run(ctx)`; a count of zero is
    /// treated as one.
    pub fn sharded(shards: usize, buffer_size: usize) -> (Vec<Self>, ShardedClient<T>) {
        let shards = shards.max(1);
        let step = shards as u32;
        let (actors, clients): (Vec<_>, Vec<_>) = (0..step)
            .map(|shard| Self::with_sequence(buffer_size, shard + 1, step))
            .unzip();
        (actors, ShardedClient::new(clients))
    }
}

/// Client for a pool of `ResourceActor`s partitioned by entity id.
pub struct ShardedClient<T: ActorEntity> {
    shards: Vec<ResourceClient<T>>,
    cursor: Arc<AtomicUsize>,
}

impl<T: ActorEntity> Clone for ShardedClient<T> {
    fn clone(&self) -> Self {
        Self {
            shards: self.shards.clone(),
            cursor: Arc::clone(&self.cursor),
        }
    }
}

impl<T: ActorEntity> ShardedClient<T>
where
    T::Id: ShardKey,
{
    /// Wraps per-shard clients. The order of `shards` must match the order the
    /// actors were created in.
    pub fn new(shards: Vec<ResourceClient<T>>) -> Self {
        Self {
            shards,
            cursor: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    fn shard_for(&self, id: &T::Id) -> Result<&ResourceClient<T>, FrameworkError> {
        if self.shards.is_empty() {
            return Err(FrameworkError::NoShards);
        }
        let index = id.shard_key().saturating_sub(1) as usize % self.shards.len();
        Ok(&self.shards[index])
    }

    fn next_shard(&self) -> Result<&ResourceClient<T>, FrameworkError> {
        if self.shards.is_empty() {
            return Err(FrameworkError::NoShards);
        }
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % self.shards.len();
        Ok(&self.shards[index])
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, FrameworkError> {
        self.next_shard()?.create(params).await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.shard_for(&id)?.get(id).await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        self.shard_for(&id)?.update(id, update).await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.shard_for(&id)?.delete(id).await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.shard_for(&id)?.perform_action(id, action).await
    }

    /// Collects matching entities from every shard, merged in id order.
    pub async fn list(&self, filter: Filter<T>) -> Result<Vec<T>, FrameworkError> {
        let mut items = Vec::new();
        for shard in &self.shards {
            items.extend(shard.list(filter.clone()).await?);
        }
        items.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::fmt;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    struct TicketId(u32);

    impl From<u32> for TicketId {
        fn from(id: u32) -> Self {
            Self(id)
        }
    }

    impl fmt::Display for TicketId {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "ticket_{}", self.0)
        }
    }

    impl ShardKey for TicketId {
        fn shard_key(&self) -> u32 {
            self.0
        }
    }

    #[derive(Debug, Clone)]
    struct Ticket {
        id: TicketId,
        seats: u32,
    }

    #[derive(Debug)]
    struct TicketCreate {
        seats: u32,
    }

    #[derive(Debug)]
    enum TicketAction {
        Claim,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("no seats left")]
    struct NoSeats;

    #[async_trait]
    impl ActorEntity for Ticket {
        type Id = TicketId;
        type Create = TicketCreate;
        type Update = ();
        type Action = TicketAction;
        type ActionResult = u32;
        type Context = ();
        type Error = NoSeats;

        fn id(&self) -> &TicketId {
            &self.id
        }

        fn from_create_params(id: TicketId, params: TicketCreate) -> Result<Self, NoSeats> {
            Ok(Self {
                id,
                seats: params.seats,
            })
        }

        async fn on_update(&mut self, _: (), _: &()) -> Result<(), NoSeats> {
            Ok(())
        }

        async fn handle_action(&mut self, action: TicketAction, _: &()) -> Result<u32, NoSeats> {
            match action {
                TicketAction::Claim => {
                    if self.seats == 0 {
                        return Err(NoSeats);
                    }
                    // Yield between the check and the write; the actor must
                    // still not interleave another claim here.
                    tokio::task::yield_now().await;
                    self.seats -= 1;
                    Ok(self.seats)
                }
            }
        }
    }

    fn spawn_pool(shards: usize) -> ShardedClient<Ticket> {
        let (actors, client) = ResourceActor::<Ticket>::sharded(shards, 8);
        for actor in actors {
            tokio::spawn(actor.run(()));
        }
        client
    }

    #[tokio::test]
    async fn test_ids_are_unique_and_routed_back_to_their_shard() {
        let client = spawn_pool(3);
        assert_eq!(client.shard_count(), 3);

        let mut ids = Vec::new();
        for seats in 1..=7 {
            ids.push(client.create(TicketCreate { seats }).await.unwrap());
        }
        let mut sorted = ids.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 7);

        for id in ids {
            let ticket = client.get(id).await.unwrap().expect("routed to owner");
            assert_eq!(ticket.id, id);
        }
    }

    #[tokio::test]
    async fn test_list_merges_all_shards_in_id_order() {
        let client = spawn_pool(4);
        for seats in 0..6 {
            client.create(TicketCreate { seats }).await.unwrap();
        }

        let all = client.list(Filter::all()).await.unwrap();
        let ids: Vec<u32> = all.iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);

        let with_seats = client.list(Filter::new(|t: &Ticket| t.seats > 2)).await.unwrap();
        assert_eq!(with_seats.len(), 3);
    }

    #[tokio::test]
    async fn test_concurrent_claims_on_one_entity_never_oversell() {
        let client = spawn_pool(2);
        let id = client.create(TicketCreate { seats: 5 }).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..20 {
            let client = client.clone();
            handles.push(tokio::spawn(async move {
                client.perform_action(id, TicketAction::Claim).await
            }));
        }

        let mut claimed = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                claimed += 1;
            }
        }
        assert_eq!(claimed, 5);
        assert_eq!(client.get(id).await.unwrap().unwrap().seats, 0);
    }

    #[tokio::test]
    async fn test_empty_pool_reports_no_shards() {
        let client = ShardedClient::<Ticket>::new(Vec::new());
        let result = client.get(TicketId(1)).await;
        assert!(matches!(result, Err(FrameworkError::NoShards)));
    }
}

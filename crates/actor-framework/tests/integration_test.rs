use actor_framework::{ActorEntity, Filter, FrameworkError, ResourceActor};
use async_trait::async_trait;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Shelf {
    id: u32,
    label: String,
    items: Vec<String>,
}

#[derive(Debug)]
struct ShelfCreate {
    label: String,
    items: Vec<String>,
}

#[derive(Debug)]
struct ShelfUpdate {
    label: Option<String>,
}

#[derive(Debug)]
enum ShelfAction {
    Take,
    Count,
}

#[derive(Debug, PartialEq)]
enum ShelfResult {
    Taken(String),
    Count(usize),
}

#[derive(Debug, thiserror::Error)]
enum ShelfError {
    #[error("Shelf is empty")]
    Empty,
    #[error("Label must not be blank")]
    BlankLabel,
}

#[async_trait]
impl ActorEntity for Shelf {
    type Id = u32;
    type Create = ShelfCreate;
    type Update = ShelfUpdate;
    type Action = ShelfAction;
    type ActionResult = ShelfResult;
    type Context = ();
    type Error = ShelfError;

    fn id(&self) -> &u32 {
        &self.id
    }

    fn from_create_params(id: u32, params: ShelfCreate) -> Result<Self, Self::Error> {
        if params.label.trim().is_empty() {
            return Err(ShelfError::BlankLabel);
        }
        Ok(Self {
            id,
            label: params.label,
            items: params.items,
        })
    }

    async fn on_update(
        &mut self,
        update: ShelfUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if let Some(label) = update.label {
            self.label = label;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ShelfAction,
        _ctx: &Self::Context,
    ) -> Result<ShelfResult, Self::Error> {
        match action {
            ShelfAction::Take => self.items.pop().map(ShelfResult::Taken).ok_or(ShelfError::Empty),
            ShelfAction::Count => Ok(ShelfResult::Count(self.items.len())),
        }
    }
}

fn shelf(label: &str, items: &[&str]) -> ShelfCreate {
    ShelfCreate {
        label: label.into(),
        items: items.iter().map(|s| s.to_string()).collect(),
    }
}

// --- Tests ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let (actor, client) = ResourceActor::new(10);
    tokio::spawn(actor.run(()));

    // 1. Create
    let id: u32 = client.create(shelf("A", &["bolt", "nut"])).await.unwrap();
    assert_eq!(id, 1); // First ID should be 1

    // 2. Actions
    let taken = client.perform_action(id, ShelfAction::Take).await.unwrap();
    assert_eq!(taken, ShelfResult::Taken("nut".into()));
    let count = client.perform_action(id, ShelfAction::Count).await.unwrap();
    assert_eq!(count, ShelfResult::Count(1));

    // 3. Update
    let updated: Shelf = client
        .update(
            id,
            ShelfUpdate {
                label: Some("B".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.label, "B");
    assert_eq!(updated.items, vec!["bolt".to_string()]);

    // 4. Delete
    client.delete(id).await.unwrap();
    assert!(client.get(id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_entity_errors_are_recoverable_by_type() {
    let (actor, client) = ResourceActor::<Shelf>::new(10);
    tokio::spawn(actor.run(()));

    let rejected = client.create(shelf("  ", &[])).await.unwrap_err();
    assert!(matches!(
        rejected.entity_error::<ShelfError>(),
        Some(ShelfError::BlankLabel)
    ));

    let id = client.create(shelf("empty", &[])).await.unwrap();
    let err = client.perform_action(id, ShelfAction::Take).await.unwrap_err();
    assert!(matches!(err.entity_error::<ShelfError>(), Some(ShelfError::Empty)));

    let missing = client.perform_action(99, ShelfAction::Count).await.unwrap_err();
    assert!(matches!(missing, FrameworkError::NotFound(_)));
}

#[tokio::test]
async fn test_list_returns_matching_entities_in_id_order() {
    let (actor, client) = ResourceActor::<Shelf>::new(10);
    tokio::spawn(actor.run(()));

    client.create(shelf("tools", &["hammer"])).await.unwrap();
    client.create(shelf("empty", &[])).await.unwrap();
    client.create(shelf("fasteners", &["nut", "bolt"])).await.unwrap();

    let stocked = client
        .list(Filter::new(|s: &Shelf| !s.items.is_empty()))
        .await
        .unwrap();
    let labels: Vec<&str> = stocked.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["tools", "fasteners"]);
}

#[tokio::test]
async fn test_client_fails_once_actor_is_gone() {
    let (actor, client) = ResourceActor::<Shelf>::new(10);
    drop(actor);

    let result = client.get(1).await;
    assert!(matches!(result, Err(FrameworkError::ActorClosed)));
}

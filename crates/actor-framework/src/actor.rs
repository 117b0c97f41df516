//! # Generic Actor Server
//!
//! `ResourceActor` owns the store for one entity type and processes requests
//! sequentially, so no locking is needed around the store.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Predicate, ResourceRequest};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// # Concurrency Model
/// Each actor runs in its own Tokio task and handles one request at a time.
/// Two checkouts competing for the last unit of a product therefore reach the
/// catalog actor one after the other, and the second sees the first one's
/// decrement.
///
/// # Staged Writes
/// Mutating requests work on a clone of the entity and commit it only when the
/// hook succeeds:
///
/// * **Create / Ensure**: `from_create_params`, `on_create`, uniqueness check,
///   then insert.
/// * **Update**: `on_update` on a clone, uniqueness check, then replace.
/// * **Action**: `handle_action` on a clone, then replace.
/// * **Batch**: every action runs against staged clones; the whole set is
///   committed only if all of them succeed.
/// * **Delete**: `on_delete` may veto, otherwise the entity is removed.
///
/// # Usage
///
/// ```rust,ignore
/// let (actor, client) = ResourceActor::<Product>::new(32);
/// tokio::spawn(actor.run(()));
/// let id = client.create(ProductCreate { .. }).await?;
/// ```
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u32,
}

fn entity_error<E>(e: E) -> FrameworkError
where
    E: std::error::Error + Send + Sync + 'static,
{
    FrameworkError::EntityError(Box::new(e))
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the mailbox capacity; senders wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// The `context` is handed to every entity hook.
    pub async fn run(mut self, context: T::Context) {
        // Extract just the type name (e.g., "Cart" instead of "homeguard_store::model::cart::Cart")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = self.allocate_id();
                    let result = self.insert_new(id.clone(), params, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, size = self.store.len(), "Created"),
                        Err(e) => warn!(entity_type, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result.map(|_| id));
                }
                ResourceRequest::Ensure {
                    id,
                    params,
                    respond_to,
                } => {
                    let existing = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = existing.is_some(), "Ensure");
                    let result = match existing {
                        Some(item) => Ok(item),
                        None => {
                            let created = self.insert_new(id.clone(), params, &context).await;
                            match &created {
                                Ok(_) => info!(entity_type, %id, size = self.store.len(), "Created"),
                                Err(e) => warn!(entity_type, %id, error = %e, "Create failed"),
                            }
                            created
                        }
                    };
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { filter, respond_to } => {
                    let items = self.list(&filter);
                    debug!(entity_type, matched = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let result = self.update(&id, update, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Updated"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Update failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let result = self.delete(&id, &context).await;
                    match &result {
                        Ok(()) => info!(entity_type, %id, size = self.store.len(), "Deleted"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Delete failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let result = self.act(&id, action, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Action ok"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Batch {
                    actions,
                    respond_to,
                } => {
                    let count = actions.len();
                    debug!(entity_type, count, ?actions, "Batch");
                    let result = self.batch(actions, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, count, "Batch ok"),
                        Err(e) => warn!(entity_type, count, error = %e, "Batch rolled back"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    /// Next counter value not already taken by an `Ensure`d entity.
    fn allocate_id(&mut self) -> T::Id {
        loop {
            let id = T::Id::from(self.next_id);
            self.next_id += 1;
            if !self.store.contains_key(&id) {
                return id;
            }
        }
    }

    fn check_conflicts(&self, id: &T::Id, item: &T) -> Result<(), FrameworkError> {
        for (other_id, other) in &self.store {
            if other_id == id {
                continue;
            }
            if let Some(e) = item.conflicts_with(other) {
                return Err(entity_error(e));
            }
        }
        Ok(())
    }

    async fn insert_new(
        &mut self,
        id: T::Id,
        params: T::Create,
        context: &T::Context,
    ) -> Result<T, FrameworkError> {
        let mut item = T::from_create_params(id.clone(), params).map_err(entity_error)?;
        item.on_create(context).await.map_err(entity_error)?;
        self.check_conflicts(&id, &item)?;
        self.store.insert(id, item.clone());
        Ok(item)
    }

    fn list(&self, filter: &Predicate<T>) -> Vec<T> {
        self.store
            .values()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect()
    }

    fn staged(&self, id: &T::Id) -> Result<T, FrameworkError> {
        self.store
            .get(id)
            .cloned()
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))
    }

    async fn update(
        &mut self,
        id: &T::Id,
        update: T::Update,
        context: &T::Context,
    ) -> Result<T, FrameworkError> {
        let mut item = self.staged(id)?;
        item.on_update(update, context).await.map_err(entity_error)?;
        self.check_conflicts(id, &item)?;
        self.store.insert(id.clone(), item.clone());
        Ok(item)
    }

    async fn delete(&mut self, id: &T::Id, context: &T::Context) -> Result<(), FrameworkError> {
        let item = self
            .store
            .get(id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        item.on_delete(context).await.map_err(entity_error)?;
        self.store.remove(id);
        Ok(())
    }

    async fn act(
        &mut self,
        id: &T::Id,
        action: T::Action,
        context: &T::Context,
    ) -> Result<T::ActionResult, FrameworkError> {
        let mut item = self.staged(id)?;
        let result = item
            .handle_action(action, context)
            .await
            .map_err(entity_error)?;
        self.store.insert(id.clone(), item);
        Ok(result)
    }

    async fn batch(
        &mut self,
        actions: Vec<(T::Id, T::Action)>,
        context: &T::Context,
    ) -> Result<Vec<T::ActionResult>, FrameworkError> {
        let mut staged: BTreeMap<T::Id, T> = BTreeMap::new();
        let mut results = Vec::with_capacity(actions.len());

        for (id, action) in actions {
            let item = match staged.entry(id) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    let current = self.staged(entry.key())?;
                    entry.insert(current)
                }
            };
            let result = item
                .handle_action(action, context)
                .await
                .map_err(entity_error)?;
            results.push(result);
        }

        self.store.extend(staged);
        Ok(results)
    }
}

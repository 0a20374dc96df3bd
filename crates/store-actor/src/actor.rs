//! # Generic Actor Server
//!
//! `ResourceActor` is the server half of a store: it owns the entities of one
//! type and processes requests one at a time, so every request sees and leaves
//! a consistent store without locks.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Filter, ResourceRequest};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// # Usage Pattern
///
/// 1. **Create**: `ResourceActor::new()` returns the actor and its client.
/// 2. **Wire**: pass dependencies (other clients) into `actor.run(context)`.
/// 3. **Run**: spawn the run loop on a Tokio task.
///
/// ```rust
/// use store_actor::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Dish { id: u32, name: String }
/// #[derive(Debug)] struct DishCreate { name: String }
/// #[derive(Debug)] struct DishUpdate;
/// #[derive(Debug)] enum DishAction {}
/// #[derive(Debug, thiserror::Error)] #[error("dish error")] struct DishError;
///
/// #[async_trait]
/// impl ActorEntity for Dish {
///     type Id = u32;
///     type Create = DishCreate;
///     type Update = DishUpdate;
///     type Action = DishAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = DishError;
///
///     fn from_create_params(id: u32, p: DishCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, name: p.name })
///     }
///     async fn on_update(&mut self, _: DishUpdate, _: &()) -> Result<(), Self::Error> {
///         Ok(())
///     }
///     async fn handle_action(&mut self, _: DishAction, _: &()) -> Result<(), Self::Error> {
///         Ok(())
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Dish>::new(10);
///     tokio::spawn(actor.run(()));
///     let id = client.create(DishCreate { name: "Lahmacun".into() }).await.unwrap();
///     assert_eq!(client.get(id).await.unwrap().unwrap().name, "Lahmacun");
/// }
/// ```
///
/// # Write Semantics
///
/// `Update` and `Action` run their hook against a clone of the stored entity
/// and commit only on success, so a failed hook never leaves a half-applied
/// write behind. After `Create` and `Update` the candidate is checked with
/// [`ActorEntity::conflicts_with`] against every other entity.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id: u32,
    entity_type: &'static str,
}

fn rejected<E: std::error::Error + Send + Sync + 'static>(e: E) -> FrameworkError {
    FrameworkError::EntityError(Box::new(e))
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the request channel; callers wait for
    /// room when it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        // "Order" instead of "food_market::model::order::Order"
        let entity_type = std::any::type_name::<T>()
            .rsplit("::")
            .next()
            .unwrap_or("Unknown");
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id: 1,
            entity_type,
        };
        (actor, ResourceClient::new(sender))
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = self.entity_type;
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            // A dropped receiver means the caller gave up; the write still stands.
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    let _ = respond_to.send(self.create(params, &context).await);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { filter, respond_to } => {
                    let _ = respond_to.send(Ok(self.list(&filter)));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    let _ = respond_to.send(self.update(id, update, &context).await);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.delete(id, &context).await);
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    let _ = respond_to.send(self.act(id, action, &context).await);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    fn find_conflict(
        &self,
        candidate: &T,
        skip: Option<&T::Id>,
        context: &T::Context,
    ) -> Option<T::Id> {
        self.store
            .iter()
            .filter(|(id, _)| Some(*id) != skip)
            .find(|(_, other)| candidate.conflicts_with(other, context))
            .map(|(id, _)| id.clone())
    }

    /// Clone of the stored entity, for hooks that may fail halfway.
    fn candidate(&self, id: &T::Id) -> Result<T, FrameworkError> {
        self.store.get(id).cloned().ok_or_else(|| {
            warn!(entity_type = self.entity_type, %id, "Not found");
            FrameworkError::NotFound(id.to_string())
        })
    }

    async fn create(
        &mut self,
        params: T::Create,
        context: &T::Context,
    ) -> Result<T::Id, FrameworkError> {
        let entity_type = self.entity_type;
        debug!(entity_type, ?params, "Create");
        // The id is only consumed once the entity is stored.
        let id = T::Id::from(self.next_id);

        let mut item = T::from_create_params(id.clone(), params).map_err(|e| {
            warn!(entity_type, error = %e, "Create rejected");
            rejected(e)
        })?;
        item.on_create(context).await.map_err(|e| {
            warn!(entity_type, error = %e, "on_create rejected");
            rejected(e)
        })?;
        if let Some(existing) = self.find_conflict(&item, None, context) {
            warn!(entity_type, %existing, "Create conflicts");
            return Err(FrameworkError::Conflict(existing.to_string()));
        }

        self.next_id += 1;
        self.store.insert(id.clone(), item);
        info!(entity_type, %id, size = self.store.len(), "Created");
        Ok(id)
    }

    fn list(&self, filter: &Filter<T>) -> Vec<T> {
        let items: Vec<T> = self
            .store
            .values()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect();
        debug!(entity_type = self.entity_type, matched = items.len(), "List");
        items
    }

    async fn update(
        &mut self,
        id: T::Id,
        update: T::Update,
        context: &T::Context,
    ) -> Result<T, FrameworkError> {
        let entity_type = self.entity_type;
        debug!(entity_type, %id, ?update, "Update");
        let mut candidate = self.candidate(&id)?;
        candidate.on_update(update, context).await.map_err(|e| {
            warn!(entity_type, %id, error = %e, "Update rejected");
            rejected(e)
        })?;
        if let Some(existing) = self.find_conflict(&candidate, Some(&id), context) {
            warn!(entity_type, %id, %existing, "Update conflicts");
            return Err(FrameworkError::Conflict(existing.to_string()));
        }
        self.store.insert(id.clone(), candidate.clone());
        info!(entity_type, %id, "Updated");
        Ok(candidate)
    }

    async fn delete(&mut self, id: T::Id, context: &T::Context) -> Result<(), FrameworkError> {
        let entity_type = self.entity_type;
        debug!(entity_type, %id, "Delete");
        let Some(item) = self.store.get(&id) else {
            warn!(entity_type, %id, "Not found");
            return Err(FrameworkError::NotFound(id.to_string()));
        };
        item.on_delete(context).await.map_err(|e| {
            warn!(entity_type, %id, error = %e, "on_delete rejected");
            rejected(e)
        })?;
        self.store.remove(&id);
        info!(entity_type, %id, size = self.store.len(), "Deleted");
        Ok(())
    }

    async fn act(
        &mut self,
        id: T::Id,
        action: T::Action,
        context: &T::Context,
    ) -> Result<T::ActionResult, FrameworkError> {
        let entity_type = self.entity_type;
        debug!(entity_type, %id, ?action, "Action");
        let mut candidate = self.candidate(&id)?;
        let result = candidate.handle_action(action, context).await.map_err(|e| {
            warn!(entity_type, %id, error = %e, "Action rejected");
            rejected(e)
        })?;
        self.store.insert(id.clone(), candidate);
        info!(entity_type, %id, "Action applied");
        Ok(result)
    }
}

//! # ActorEntity Trait
//!
//! The contract every stored resource (accounts, menu items, orders) implements
//! to be managed by the generic [`ResourceActor`](crate::ResourceActor).
//!
//! Associated types pin down the id, the create/update payloads, the custom
//! actions, the injected context and the error type, so a menu payload can
//! never be sent to the order store. Hooks with default bodies
//! ([`ActorEntity::on_create`], [`ActorEntity::on_delete`],
//! [`ActorEntity::conflicts_with`]) only need overriding when an entity cares.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// Hooks are async so they can call other actors. The `Context` is handed to
/// `run()` rather than `new()`, which lets actors that depend on each other be
/// created first and wired afterwards.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for automatic ID generation.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Resource-specific operations that need exclusive access to one entity.
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// One error enum per entity, shared by every hook and action.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full Entity from the ID and Payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Uniqueness rule checked against every other stored entity.
    ///
    /// Runs inside the actor after `on_create` and after `on_update`, so two
    /// concurrent creates cannot both pass. Return `true` to reject.
    fn conflicts_with(&self, _other: &Self, _ctx: &Self::Context) -> bool {
        false
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is built and before it is stored.
    /// Validation that needs other actors belongs here.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the store.
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

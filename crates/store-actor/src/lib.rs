//! # Store Actor
//!
//! An in-memory document store built from actors. Each resource type gets one
//! [`ResourceActor`] running on its own Tokio task; the actor owns every entity
//! of that type and handles requests strictly one at a time. Callers hold a
//! cheap, cloneable [`ResourceClient`].
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]): payload types, hooks and the error type of a resource.
//! 2. **Runtime** ([`ResourceActor`]): the message loop and the store.
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]): typed async calls.
//!
//! ## Atomicity
//!
//! Because one actor serialises all requests for its resource type:
//!
//! - uniqueness rules ([`ActorEntity::conflicts_with`]) are checked and the
//!   write applied in the same step;
//! - an [`ActorEntity::Action`] reads, checks and writes one entity with no
//!   other request in between, which is how callers express conditional
//!   updates such as "set B only if the current value is still A";
//! - a failed hook leaves the stored entity untouched.
//!
//! There are no multi-entity transactions.
//!
//! ## Context Injection
//!
//! Dependencies are passed to [`ResourceActor::run`], not to
//! [`ResourceActor::new`]. Actors that call each other can all be created
//! first and wired afterwards.
//!
//! ## Testing
//!
//! See [`mock`] for [`mock::MockClient`], which scripts the replies of a
//! neighbouring actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Filter, ResourceRequest, Response};

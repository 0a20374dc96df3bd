//! # Menu Actor
//!
//! Stores every restaurant's menu items. No dependencies on other actors
//! (Context = ()); ownership checks live in [`MenuClient`].
//!
//! - [`entity`] - [`ActorEntity`](store_actor::ActorEntity) implementation for [`MenuItem`]
//! - [`error`] - [`MenuError`]

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::MenuClient;
use crate::model::MenuItem;
use store_actor::ResourceActor;

/// Creates a new Menu actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<MenuItem>, MenuClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, MenuClient::new(generic_client))
}

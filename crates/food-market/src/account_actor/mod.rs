//! # Account Actor
//!
//! Stores customers, restaurants and couriers. It has no dependencies on other
//! actors; its context is the [`EmailNamespace`](crate::config::EmailNamespace)
//! policy used by the uniqueness check.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](store_actor::ActorEntity) implementation for [`Account`]
//! - [`error`] - [`AccountError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::AccountClient;
use crate::model::Account;
use store_actor::ResourceActor;

/// Creates a new Account actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Account>, AccountClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    let client = AccountClient::new(generic_client);

    (actor, client)
}

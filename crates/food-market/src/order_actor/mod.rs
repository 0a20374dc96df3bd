//! # Order Actor
//!
//! Stores orders and enforces the parts of the workflow that must be atomic.
//!
//! ## Dependencies
//!
//! The Order actor needs the account and menu actors to validate new orders.
//! They are injected at runtime through the context:
//!
//! ```rust,ignore
//! let (order_actor, order_client) = order_actor::new(32, account_client.clone());
//! tokio::spawn(order_actor.run((account_client, menu_client)));
//! ```
//!
//! ## Structure
//!
//! - [`entity`] - creation validation (`on_create`) and action handling
//! - [`actions`] - [`OrderAction`]: compare-and-set status, courier claim
//! - [`error`] - [`OrderError`]

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::{AccountClient, OrderClient};
use crate::model::Order;
use store_actor::ResourceActor;

/// Creates a new Order actor and its client.
///
/// The client keeps `accounts` to join counterpart details into order lists.
pub fn new(buffer_size: usize, accounts: AccountClient) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, OrderClient::new(generic_client, accounts))
}

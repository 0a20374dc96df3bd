//! Typed clients over the three actors.
//!
//! Each wraps a [`ResourceClient`](store_actor::ResourceClient), maps store
//! errors back into its actor's error type, and carries the checks that need
//! the caller's identity (ownership, roles).

pub mod account_client;
pub mod menu_client;
pub mod order_client;

pub use account_client::*;
pub use menu_client::*;
pub use order_client::*;

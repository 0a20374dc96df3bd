//! # Food Market
//!
//! A food-ordering marketplace: customers order from restaurants' menus,
//! restaurants drive orders through a fixed status workflow, couriers claim
//! and complete deliveries.
//!
//! - **[model]**: Accounts, menu items, orders and the status state machine.
//! - **[account_actor]**, **[menu_actor]**, **[order_actor]**: one
//!   [`ResourceActor`](store_actor::ResourceActor) per store, with entity hooks
//!   for validation and actions for atomic status changes.
//! - **[clients]**: Typed wrappers that carry ownership checks and the order workflow.
//! - **[lifecycle]**: [`Marketplace`](lifecycle::Marketplace) starts and stops the actors.
//! - **[http]**: The axum JSON API.
//! - **[auth]**, **[config]**, **[cart]**: Credentials and sessions, settings, the shopping cart.

pub mod account_actor;
pub mod auth;
pub mod cart;
pub mod clients;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod menu_actor;
pub mod model;
pub mod order_actor;

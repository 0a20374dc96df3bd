//! # System Lifecycle & Orchestration
//!
//! Starting, wiring and stopping the three actors.
//!
//! ## Dependency Injection via Context
//!
//! Actors are created without their dependencies and receive them when they
//! start (`run(context)`):
//!
//! | Actor | Context |
//! |---|---|
//! | accounts | [`EmailNamespace`](crate::config::EmailNamespace) |
//! | menu | `()` |
//! | orders | `(AccountClient, MenuClient)` |
//!
//! The graph is acyclic (orders depend on accounts and menu, nothing depends
//! on orders), so dropping every client is enough to stop every actor.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - closes the sender side of the channels
//! 2. **Actors detect closure** - `receiver.recv()` returns `None`
//! 3. **Await completion** - wait for all actor tasks to finish
//!
//! Clones held elsewhere (the HTTP router holds some) keep their actor
//! alive, so the server must be stopped first.

pub mod marketplace;

pub use marketplace::*;

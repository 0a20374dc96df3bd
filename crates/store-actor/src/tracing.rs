//! # Observability
//!
//! Every actor logs with an `entity_type` field (`Account`, `MenuItem`,
//! `Order`) plus the entity id, so the module path adds nothing and is hidden.
//!
//! ```bash
//! RUST_LOG=info cargo run      # outcomes: Created, Updated, Action applied
//! RUST_LOG=debug cargo run     # plus full request payloads
//! ```

/// Installs the global `tracing` subscriber, filtered by `RUST_LOG`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}

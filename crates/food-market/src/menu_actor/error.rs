//! Error types for the Menu actor.

use thiserror::Error;

/// Errors that can occur during menu operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MenuError {
    #[error("Menu item not found")]
    NotFound(String),

    /// The caller is not the restaurant that owns the item.
    #[error("Not authorized to {0}")]
    Forbidden(String),

    #[error("{0}")]
    ValidationError(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

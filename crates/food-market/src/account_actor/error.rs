//! Error types for the Account actor.

use crate::model::AccountId;
use thiserror::Error;

/// Errors that can occur during account operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AccountError {
    /// The requested account was not found.
    #[error("Account not found: {0}")]
    NotFound(String),

    /// The restaurant does not exist, or exists but is closed.
    #[error("Restaurant not found or is currently closed")]
    RestaurantUnavailable(AccountId),

    /// Another account already uses this email.
    #[error("User already exists")]
    EmailTaken(String),

    /// Unknown email for the role, or wrong password. One message for both.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The caller does not own the account it tried to change.
    #[error("Not authorized to {0}")]
    Forbidden(String),

    /// The account data provided is invalid.
    #[error("{0}")]
    ValidationError(String),

    /// Hashing a credential failed.
    #[error("Credential error: {0}")]
    Credential(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

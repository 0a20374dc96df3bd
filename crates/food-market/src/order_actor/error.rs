//! Error types for the Order actor.

use crate::model::OrderStatus;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The restaurant does not exist or is not accepting orders.
    #[error("Restaurant not found or is currently closed")]
    RestaurantUnavailable,

    #[error("No order items found")]
    EmptyOrder,

    /// A line names an item that does not exist or belongs to another restaurant.
    #[error("Item {0} not valid for this restaurant")]
    InvalidItem(u32),

    /// The order data provided is invalid.
    #[error("Order validation error: {0}")]
    ValidationError(String),

    /// The caller is not a party allowed to change this order.
    #[error("Not authorized to {0}")]
    Forbidden(String),

    /// The order is `Delivered` or `Cancelled`.
    #[error("Order is already {0} and cannot be updated.")]
    Finalized(OrderStatus),

    #[error("Invalid status transition: cannot move from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// The stored status moved on between the decision and the write.
    #[error("Order status changed concurrently")]
    StatusChanged {
        expected: OrderStatus,
        actual: OrderStatus,
    },

    #[error("Order has already been claimed by another courier")]
    AlreadyClaimed,

    #[error("Order is {0} and not ready for pickup")]
    NotReadyForPickup(OrderStatus),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

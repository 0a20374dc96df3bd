//! Custom actions for the Order actor.
//!
//! Actions are the only way an order changes after creation. Each one runs
//! inside the order actor with exclusive access to the stored order, which
//! makes them the store's conditional update primitive.

use crate::model::{AccountId, Order, OrderStatus};

#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Moves the order to `next` only if its stored status is still `expected`.
    ///
    /// # Errors
    /// Fails with `StatusChanged` when another write got there first.
    CompareAndSetStatus {
        expected: OrderStatus,
        next: OrderStatus,
    },
    /// Claims an unassigned `Out for Delivery` order for a courier and moves
    /// it to `Delivering`.
    ///
    /// # Errors
    /// Fails with `AlreadyClaimed` if a courier is already assigned.
    AssignCourier { courier: AccountId },
}

/// Results from OrderActions - variants match 1:1 with OrderAction
#[derive(Debug, Clone)]
pub enum OrderActionResult {
    CompareAndSetStatus(Order),
    AssignCourier(Order),
}

impl OrderActionResult {
    pub fn into_order(self) -> Order {
        match self {
            OrderActionResult::CompareAndSetStatus(order)
            | OrderActionResult::AssignCourier(order) => order,
        }
    }
}

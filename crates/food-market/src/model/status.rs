//! The order status state machine.
//!
//! Both tables are total: every status has an explicit, possibly empty, set of
//! next statuses, and anything not listed is refused.
//!
//! ```text
//! restaurant                              courier
//! Pending          -> Confirmed, Cancelled
//! Confirmed        -> Preparing, Cancelled
//! Preparing        -> Out for Delivery
//! Out for Delivery -> Delivered           Out for Delivery -> Delivering (accept)
//! Delivering       -> (none)              Delivering       -> Delivered
//! Delivered        -> (none, terminal)
//! Cancelled        -> (none, terminal)
//! ```
use crate::model::Role;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    #[serde(rename = "Out for Delivery")]
    OutForDelivery,
    Delivering,
    Delivered,
    Cancelled,
}

use OrderStatus::*;

impl OrderStatus {
    pub const ALL: [OrderStatus; 7] = [
        Pending,
        Confirmed,
        Preparing,
        OutForDelivery,
        Delivering,
        Delivered,
        Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Pending => "Pending",
            Confirmed => "Confirmed",
            Preparing => "Preparing",
            OutForDelivery => "Out for Delivery",
            Delivering => "Delivering",
            Delivered => "Delivered",
            Cancelled => "Cancelled",
        }
    }

    /// No transition ever leaves a terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Delivered | Cancelled)
    }

    /// Statuses a party with `role` may move an order to from `self`.
    ///
    /// Customers never drive status. Courier rows only describe the table;
    /// claiming and ownership are checked by the order workflow.
    pub fn allowed_next(&self, role: Role) -> &'static [OrderStatus] {
        match role {
            Role::Restaurant => match self {
                Pending => &[Confirmed, Cancelled],
                Confirmed => &[Preparing, Cancelled],
                Preparing => &[OutForDelivery],
                OutForDelivery => &[Delivered],
                Delivering | Delivered | Cancelled => &[],
            },
            Role::Delivery => match self {
                OutForDelivery => &[Delivering],
                Delivering => &[Delivered],
                _ => &[],
            },
            Role::Customer => &[],
        }
    }

    pub fn can_move_to(&self, next: OrderStatus, role: Role) -> bool {
        self.allowed_next(role).contains(&next)
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown order status: {s}"))
    }
}

//! Marketplace data: the stored entities, their create/update payloads and the
//! read views served to clients.

pub mod account;
pub mod menu;
pub mod order;
pub mod status;

pub use account::*;
pub use menu::*;
pub use order::*;
pub use status::*;

/// Treats a blank string as "not provided" for partial updates.
pub(crate) fn provided(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Prices and money amounts must be real, non-negative numbers.
pub(crate) fn valid_amount(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Accounts: customers, restaurants and couriers in one store.
///
/// # Actor Framework
/// [`Account`] implements [`ActorEntity`](store_actor::ActorEntity) in
/// [`account_actor::entity`](crate::account_actor::entity). The `role` field is
/// set from the [`AccountProfile`] variant at creation and never changes, so a
/// restaurant can never lack restaurant data.
use crate::auth::PasswordHash;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub u32);

impl From<u32> for AccountId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "account_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Restaurant,
    Delivery,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Restaurant => "restaurant",
            Role::Delivery => "delivery",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Role::Customer),
            "restaurant" => Ok(Role::Restaurant),
            "delivery" => Ok(Role::Delivery),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerProfile {
    #[serde(default)]
    pub full_address: String,
    #[serde(default, alias = "il")]
    pub province: String,
    #[serde(default, alias = "ilce")]
    pub district: String,
}

impl CustomerProfile {
    /// The address used when an order does not name one; `None` without a street address.
    pub fn delivery_address(&self) -> Option<String> {
        if self.full_address.trim().is_empty() {
            return None;
        }
        let parts: Vec<&str> = [&self.full_address, &self.district, &self.province]
            .into_iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect();
        Some(parts.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantProfile {
    pub cuisine_type: String,
    pub address: String,
    pub description: String,
    pub min_order_value: f64,
    pub is_active: bool,
}

impl RestaurantProfile {
    /// A freshly registered restaurant is open and has no minimum order.
    pub fn new(
        cuisine_type: impl Into<String>,
        address: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            cuisine_type: cuisine_type.into(),
            address: address.into(),
            description: description.into(),
            min_order_value: 0.0,
            is_active: true,
        }
    }
}

/// Couriers carry no profile data beyond the shared account fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourierProfile {}

/// Role-specific account data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AccountProfile {
    Customer(CustomerProfile),
    Restaurant(RestaurantProfile),
    Courier(CourierProfile),
}

impl AccountProfile {
    pub fn role(&self) -> Role {
        match self {
            AccountProfile::Customer(_) => Role::Customer,
            AccountProfile::Restaurant(_) => Role::Restaurant,
            AccountProfile::Courier(_) => Role::Delivery,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(rename = "_id")]
    pub id: AccountId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: PasswordHash,
    pub role: Role,
    #[serde(flatten)]
    pub profile: AccountProfile,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn restaurant(&self) -> Option<&RestaurantProfile> {
        match &self.profile {
            AccountProfile::Restaurant(profile) => Some(profile),
            _ => None,
        }
    }

    pub fn customer(&self) -> Option<&CustomerProfile> {
        match &self.profile {
            AccountProfile::Customer(profile) => Some(profile),
            _ => None,
        }
    }

    /// Restaurants that are visible to the public and accept orders.
    pub fn is_active_restaurant(&self) -> bool {
        self.restaurant().is_some_and(|r| r.is_active)
    }

    /// The fields joined into order lists for the other party.
    pub fn summary(&self) -> PartySummary {
        let address = match &self.profile {
            AccountProfile::Customer(c) => c.delivery_address(),
            AccountProfile::Restaurant(r) => Some(r.address.clone()),
            AccountProfile::Courier(_) => None,
        };
        PartySummary {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            address,
        }
    }
}

/// Payload for creating an account. The credential arrives already hashed.
#[derive(Debug, Clone)]
pub struct AccountCreate {
    pub name: String,
    pub email: String,
    pub password_hash: PasswordHash,
    pub profile: AccountProfile,
}

/// A registration as submitted: plain password, role chosen by the profile.
#[derive(Clone)]
pub struct RegisterAccount {
    pub name: String,
    pub email: String,
    pub password: String,
    pub profile: AccountProfile,
}

impl std::fmt::Debug for RegisterAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterAccount")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.profile.role())
            .finish_non_exhaustive()
    }
}

/// Partial update of a restaurant's public profile.
///
/// Blank strings keep the previous value. `minOrderValue` and `isActive`
/// apply whenever present, including `0` and `false`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub cuisine_type: Option<String>,
    pub address: Option<String>,
    pub min_order_value: Option<f64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone)]
pub enum AccountUpdate {
    Restaurant(RestaurantUpdate),
    Password(PasswordHash),
}

/// Counterpart details shown next to an order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartySummary {
    #[serde(rename = "_id")]
    pub id: AccountId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

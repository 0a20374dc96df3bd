//! Entity trait implementation for the Account domain type.
//!
//! Email uniqueness is enforced by [`ActorEntity::conflicts_with`], which the
//! actor evaluates inside its own task, so two concurrent registrations for the
//! same email cannot both succeed. The [`EmailNamespace`] context decides
//! whether the same email may exist once per role.

use super::AccountError;
use crate::config::EmailNamespace;
use crate::model::{
    provided, valid_amount, Account, AccountCreate, AccountId, AccountProfile, AccountUpdate,
};
use async_trait::async_trait;
use chrono::Utc;
use store_actor::ActorEntity;

/// Lowercased, trimmed form used for storage and lookups.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
impl ActorEntity for Account {
    type Id = AccountId;
    type Create = AccountCreate;
    type Update = AccountUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = EmailNamespace;
    type Error = AccountError;

    fn from_create_params(id: AccountId, params: AccountCreate) -> Result<Self, AccountError> {
        let name = params.name.trim().to_string();
        let email = normalize_email(&params.email);
        if name.is_empty() {
            return Err(AccountError::ValidationError("Name is required".into()));
        }
        if email.is_empty() || !email.contains('@') {
            return Err(AccountError::ValidationError(
                "A valid email is required".into(),
            ));
        }
        if let AccountProfile::Restaurant(restaurant) = &params.profile {
            if restaurant.cuisine_type.trim().is_empty() || restaurant.address.trim().is_empty() {
                return Err(AccountError::ValidationError(
                    "Cuisine type and address are required".into(),
                ));
            }
        }

        Ok(Self {
            id,
            name,
            email,
            password_hash: params.password_hash,
            role: params.profile.role(),
            profile: params.profile,
            created_at: Utc::now(),
        })
    }

    fn conflicts_with(&self, other: &Self, namespace: &EmailNamespace) -> bool {
        self.email == other.email
            && match namespace {
                EmailNamespace::Shared => true,
                EmailNamespace::PerRole => self.role == other.role,
            }
    }

    /// Handles updates to the Account entity.
    ///
    /// # Fields Updated
    /// - `Restaurant`: public profile fields; blank strings keep the old value
    /// - `Password`: replaces the stored hash
    async fn on_update(
        &mut self,
        update: AccountUpdate,
        _ctx: &EmailNamespace,
    ) -> Result<(), AccountError> {
        match update {
            AccountUpdate::Restaurant(update) => {
                let id = self.id;
                let AccountProfile::Restaurant(profile) = &mut self.profile else {
                    return Err(AccountError::RestaurantUnavailable(id));
                };
                if let Some(min) = update.min_order_value {
                    if !valid_amount(min) {
                        return Err(AccountError::ValidationError(
                            "Minimum order value must be a non-negative number".into(),
                        ));
                    }
                    profile.min_order_value = min;
                }
                if let Some(description) = provided(update.description) {
                    profile.description = description;
                }
                if let Some(cuisine_type) = provided(update.cuisine_type) {
                    profile.cuisine_type = cuisine_type;
                }
                if let Some(address) = provided(update.address) {
                    profile.address = address;
                }
                if let Some(is_active) = update.is_active {
                    profile.is_active = is_active;
                }
                if let Some(name) = provided(update.name) {
                    self.name = name.trim().to_string();
                }
            }
            AccountUpdate::Password(hash) => self.password_hash = hash,
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        _action: (),
        _ctx: &EmailNamespace,
    ) -> Result<(), AccountError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{PasswordHash, MIN_PASSWORD_COST};
    use crate::model::{CourierProfile, CustomerProfile, RestaurantProfile, RestaurantUpdate, Role};

    fn create(email: &str, profile: AccountProfile) -> AccountCreate {
        AccountCreate {
            name: "Ayse".into(),
            email: email.into(),
            password_hash: PasswordHash::new("pw", MIN_PASSWORD_COST).unwrap(),
            profile,
        }
    }

    fn restaurant(id: u32) -> Account {
        Account::from_create_params(
            AccountId(id),
            create(
                "kitchen@example.com",
                AccountProfile::Restaurant(RestaurantProfile::new("Kebab", "Adana", "Grill")),
            ),
        )
        .unwrap()
    }

    #[test]
    fn email_is_normalized_and_role_follows_profile() {
        let account = Account::from_create_params(
            AccountId(1),
            create("  Ayse@Example.COM ", AccountProfile::Customer(CustomerProfile::default())),
        )
        .unwrap();
        assert_eq!(account.email, "ayse@example.com");
        assert_eq!(account.role, Role::Customer);
    }

    #[test]
    fn missing_fields_are_rejected() {
        let mut params = create("a@b.c", AccountProfile::Courier(CourierProfile {}));
        params.name = "  ".into();
        assert!(matches!(
            Account::from_create_params(AccountId(1), params),
            Err(AccountError::ValidationError(_))
        ));

        let params = create("not-an-email", AccountProfile::Courier(CourierProfile {}));
        assert!(Account::from_create_params(AccountId(1), params).is_err());

        let params = create(
            "r@b.c",
            AccountProfile::Restaurant(RestaurantProfile::new("", "Adana", "")),
        );
        assert!(Account::from_create_params(AccountId(1), params).is_err());
    }

    #[test]
    fn conflict_depends_on_namespace() {
        let customer = Account::from_create_params(
            AccountId(1),
            create("kitchen@example.com", AccountProfile::Customer(CustomerProfile::default())),
        )
        .unwrap();
        let owner = restaurant(2);
        assert!(customer.conflicts_with(&owner, &EmailNamespace::Shared));
        assert!(!customer.conflicts_with(&owner, &EmailNamespace::PerRole));
        assert!(owner.conflicts_with(&restaurant(3), &EmailNamespace::PerRole));
    }

    #[tokio::test]
    async fn restaurant_update_keeps_blank_fields_and_applies_falsy_values() {
        let mut account = restaurant(1);
        let update = RestaurantUpdate {
            name: Some(String::new()),
            description: Some("  ".into()),
            cuisine_type: Some("Ocakbasi".into()),
            address: None,
            min_order_value: Some(0.0),
            is_active: Some(false),
        };
        account
            .on_update(AccountUpdate::Restaurant(update), &EmailNamespace::Shared)
            .await
            .unwrap();

        let profile = account.restaurant().unwrap();
        assert_eq!(account.name, "Ayse");
        assert_eq!(profile.description, "Grill");
        assert_eq!(profile.cuisine_type, "Ocakbasi");
        assert_eq!(profile.address, "Adana");
        assert_eq!(profile.min_order_value, 0.0);
        assert!(!profile.is_active);
    }

    #[tokio::test]
    async fn restaurant_update_on_a_customer_is_refused() {
        let mut account = Account::from_create_params(
            AccountId(4),
            create("c@example.com", AccountProfile::Customer(CustomerProfile::default())),
        )
        .unwrap();
        let err = account
            .on_update(
                AccountUpdate::Restaurant(RestaurantUpdate::default()),
                &EmailNamespace::Shared,
            )
            .await
            .unwrap_err();
        assert_eq!(err, AccountError::RestaurantUnavailable(AccountId(4)));
    }

    #[tokio::test]
    async fn negative_minimum_is_refused() {
        let mut account = restaurant(1);
        let update = RestaurantUpdate {
            min_order_value: Some(-1.0),
            ..Default::default()
        };
        assert!(account
            .on_update(AccountUpdate::Restaurant(update), &EmailNamespace::Shared)
            .await
            .is_err());
    }
}

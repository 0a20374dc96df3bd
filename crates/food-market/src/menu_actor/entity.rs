//! Entity trait implementation for the MenuItem domain type.
//!
//! Partial updates follow two rules: text fields treat a blank string as "keep
//! the current value", while `price` and `is_available` apply whenever they are
//! present, so `0` and `false` are real updates.

use super::MenuError;
use crate::model::{
    provided, valid_amount, MenuCategory, MenuItem, MenuItemCreate, MenuItemId, MenuItemUpdate,
};
use async_trait::async_trait;
use chrono::Utc;
use store_actor::ActorEntity;

fn check_price(price: f64) -> Result<f64, MenuError> {
    if valid_amount(price) {
        Ok(price)
    } else {
        Err(MenuError::ValidationError(
            "Price must be a non-negative number".into(),
        ))
    }
}

#[async_trait]
impl ActorEntity for MenuItem {
    type Id = MenuItemId;
    type Create = MenuItemCreate;
    type Update = MenuItemUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = MenuError;

    /// Creates a new, available MenuItem.
    fn from_create_params(id: MenuItemId, params: MenuItemCreate) -> Result<Self, MenuError> {
        let name = params.name.trim().to_string();
        if name.is_empty() {
            return Err(MenuError::ValidationError("Name is required".into()));
        }

        Ok(Self {
            id,
            restaurant_id: params.restaurant_id,
            name,
            description: params.description,
            price: check_price(params.price)?,
            category: params.category,
            image_url: params.image_url,
            is_available: true,
            created_at: Utc::now(),
        })
    }

    async fn on_update(&mut self, update: MenuItemUpdate, _ctx: &()) -> Result<(), MenuError> {
        if let Some(name) = provided(update.name) {
            self.name = name.trim().to_string();
        }
        if let Some(description) = provided(update.description) {
            self.description = description;
        }
        if let Some(price) = update.price {
            self.price = check_price(price)?;
        }
        if let Some(category) = provided(update.category) {
            self.category = category
                .parse::<MenuCategory>()
                .map_err(MenuError::ValidationError)?;
        }
        if let Some(url) = provided(update.image_url) {
            self.image_url = Some(url);
        }
        if let Some(is_available) = update.is_available {
            self.is_available = is_available;
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), MenuError> {
        Ok(())
    }
}

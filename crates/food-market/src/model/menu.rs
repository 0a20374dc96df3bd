/// Menu items offered by restaurants.
///
/// # Actor Framework
/// [`MenuItem`] implements [`ActorEntity`](store_actor::ActorEntity) in
/// [`menu_actor::entity`](crate::menu_actor::entity). Partial updates
/// ([`MenuItemUpdate`]) are applied by the `on_update` hook.
use crate::model::AccountId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Type-safe identifier for Menu Items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuItemId(pub u32);

impl From<u32> for MenuItemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for MenuItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "menu_item_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MenuCategory {
    #[serde(rename = "Main Dish")]
    MainDish,
    Appetizer,
    Dessert,
    Drink,
    Side,
}

impl MenuCategory {
    pub const ALL: [MenuCategory; 5] = [
        MenuCategory::MainDish,
        MenuCategory::Appetizer,
        MenuCategory::Dessert,
        MenuCategory::Drink,
        MenuCategory::Side,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MenuCategory::MainDish => "Main Dish",
            MenuCategory::Appetizer => "Appetizer",
            MenuCategory::Dessert => "Dessert",
            MenuCategory::Drink => "Drink",
            MenuCategory::Side => "Side",
        }
    }
}

impl Display for MenuCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MenuCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown menu category: {s}"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[serde(rename = "_id")]
    pub id: MenuItemId,
    pub restaurant_id: AccountId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: MenuCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a menu item. `restaurant_id` is always the caller.
#[derive(Debug, Clone)]
pub struct MenuItemCreate {
    pub restaurant_id: AccountId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: MenuCategory,
    pub image_url: Option<String>,
}

/// Request body for a new menu item, before the owner is attached.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMenuItem {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub category: MenuCategory,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl NewMenuItem {
    pub fn owned_by(self, restaurant_id: AccountId) -> MenuItemCreate {
        MenuItemCreate {
            restaurant_id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            image_url: self.image_url.filter(|url| !url.trim().is_empty()),
        }
    }
}

/// Partial update of a menu item.
///
/// Blank strings keep the previous value; `price` and `isAvailable` apply
/// whenever present, including `0` and `false`. The category travels as a
/// string so that a blank one can mean "keep".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub is_available: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_uses_display_names_on_the_wire() {
        let json = serde_json::to_string(&MenuCategory::MainDish).unwrap();
        assert_eq!(json, "\"Main Dish\"");
        let parsed: MenuCategory = serde_json::from_str("\"Dessert\"").unwrap();
        assert_eq!(parsed, MenuCategory::Dessert);
        assert!(serde_json::from_str::<MenuCategory>("\"MainDish\"").is_err());
    }

    #[test]
    fn category_parses_every_display_name() {
        for category in MenuCategory::ALL {
            assert_eq!(category.as_str().parse::<MenuCategory>(), Ok(category));
        }
        assert!("Soup".parse::<MenuCategory>().is_err());
    }

    #[test]
    fn blank_image_url_is_dropped_on_create() {
        let item = NewMenuItem {
            name: "Baklava".into(),
            description: String::new(),
            price: 4.5,
            category: MenuCategory::Dessert,
            image_url: Some(" ".into()),
        };
        let create = item.owned_by(AccountId(3));
        assert_eq!(create.restaurant_id, AccountId(3));
        assert_eq!(create.image_url, None);
    }
}

//! # Menu Client
//!
//! Menu management for restaurants. Only the owning restaurant may change or
//! remove an item.
use crate::menu_actor::MenuError;
use crate::model::{AccountId, MenuItem, MenuItemId, MenuItemUpdate, NewMenuItem};
use async_trait::async_trait;
use store_actor::{ActorClient, Filter, FrameworkError, ResourceClient};
use tracing::{info, instrument, warn};

/// Client for interacting with the Menu actor.
#[derive(Clone)]
pub struct MenuClient {
    inner: ResourceClient<MenuItem>,
}

impl MenuClient {
    pub fn new(inner: ResourceClient<MenuItem>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<MenuItem> for MenuClient {
    type Error = MenuError;

    fn inner(&self) -> &ResourceClient<MenuItem> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<MenuError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => MenuError::NotFound(id),
            Err(other) => MenuError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl MenuClient {
    #[instrument(skip(self))]
    pub async fn list_for_restaurant(
        &self,
        restaurant_id: AccountId,
    ) -> Result<Vec<MenuItem>, MenuError> {
        let mut items = self
            .list(Filter::new(move |item: &MenuItem| {
                item.restaurant_id == restaurant_id
            }))
            .await?;
        items.sort_by_key(|item| item.id.0);
        Ok(items)
    }

    /// Adds an item to the caller's own menu.
    #[instrument(skip(self))]
    pub async fn create_item(
        &self,
        caller: AccountId,
        item: NewMenuItem,
    ) -> Result<MenuItem, MenuError> {
        let id = self
            .inner
            .create(item.owned_by(caller))
            .await
            .map_err(Self::map_error)?;
        info!(item_id = %id, restaurant = %caller, "Menu item created");
        self.get(id)
            .await?
            .ok_or_else(|| MenuError::NotFound(id.to_string()))
    }

    async fn owned_item(
        &self,
        id: MenuItemId,
        caller: AccountId,
        action: &str,
    ) -> Result<MenuItem, MenuError> {
        let item = self
            .get(id)
            .await?
            .ok_or_else(|| MenuError::NotFound(id.to_string()))?;
        if item.restaurant_id != caller {
            warn!(item_id = %id, %caller, "Refusing menu change by non-owner");
            return Err(MenuError::Forbidden(format!("{action} this menu item")));
        }
        Ok(item)
    }

    #[instrument(skip(self))]
    pub async fn update_item(
        &self,
        id: MenuItemId,
        caller: AccountId,
        update: MenuItemUpdate,
    ) -> Result<MenuItem, MenuError> {
        self.owned_item(id, caller, "update").await?;
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: MenuItemId, caller: AccountId) -> Result<(), MenuError> {
        self.owned_item(id, caller, "delete").await?;
        self.inner.delete(id).await.map_err(Self::map_error)?;
        info!(item_id = %id, "Menu item removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MenuCategory;
    use chrono::Utc;
    use store_actor::mock::MockClient;

    fn item(id: u32, restaurant: u32) -> MenuItem {
        MenuItem {
            id: MenuItemId(id),
            restaurant_id: AccountId(restaurant),
            name: "Lahmacun".into(),
            description: String::new(),
            price: 3.0,
            category: MenuCategory::MainDish,
            image_url: None,
            is_available: true,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn non_owner_cannot_update() {
        let mut mock = MockClient::<MenuItem>::new();
        mock.expect_get(MenuItemId(5)).return_ok(Some(item(5, 1)));
        let client = MenuClient::new(mock.client());

        let err = client
            .update_item(MenuItemId(5), AccountId(2), MenuItemUpdate::default())
            .await
            .unwrap_err();
        assert_eq!(err, MenuError::Forbidden("update this menu item".into()));
        mock.verify();
    }

    #[tokio::test]
    async fn missing_item_is_not_found() {
        let mut mock = MockClient::<MenuItem>::new();
        mock.expect_get(MenuItemId(5)).return_ok(None);
        let client = MenuClient::new(mock.client());

        let err = client.delete_item(MenuItemId(5), AccountId(1)).await.unwrap_err();
        assert!(matches!(err, MenuError::NotFound(_)));
        mock.verify();
    }

    #[tokio::test]
    async fn owner_update_goes_to_the_store() {
        let mut mock = MockClient::<MenuItem>::new();
        mock.expect_get(MenuItemId(5)).return_ok(Some(item(5, 1)));
        let mut updated = item(5, 1);
        updated.price = 0.0;
        mock.expect_update(MenuItemId(5)).return_ok(updated.clone());
        let client = MenuClient::new(mock.client());

        let result = client
            .update_item(
                MenuItemId(5),
                AccountId(1),
                MenuItemUpdate {
                    price: Some(0.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(result, updated);
        mock.verify();
    }

    #[tokio::test]
    async fn channel_failures_become_communication_errors() {
        let mut mock = MockClient::<MenuItem>::new();
        mock.expect_list().return_err(FrameworkError::ActorClosed);
        let client = MenuClient::new(mock.client());

        let err = client.list_for_restaurant(AccountId(1)).await.unwrap_err();
        assert!(matches!(err, MenuError::ActorCommunicationError(_)));
        mock.verify();
    }
}

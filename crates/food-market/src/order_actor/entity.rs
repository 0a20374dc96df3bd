//! Entity trait implementation for the Order domain type.
//!
//! `on_create` validates and prices a new order against the account and menu
//! actors, which arrive as the actor context. Status changes only happen
//! through [`OrderAction`]s.

use super::actions::{OrderAction, OrderActionResult};
use super::OrderError;
use crate::clients::{AccountClient, MenuClient};
use crate::model::{Order, OrderCreate, OrderId, OrderStatus};
use async_trait::async_trait;
use chrono::Utc;
use store_actor::{ActorClient, ActorEntity};
use tracing::debug;

fn dependency<E: std::fmt::Display>(e: E) -> OrderError {
    OrderError::ActorCommunicationError(e.to_string())
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = ();
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Context = (AccountClient, MenuClient);
    type Error = OrderError;

    /// Creates a new Order from creation parameters.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        Ok(Self::new(id, params))
    }

    /// Validates the order and snapshots its lines.
    ///
    /// Checks run in a fixed order: restaurant, then lines, then each item,
    /// then the delivery address. The first failure wins.
    async fn on_create(&mut self, ctx: &Self::Context) -> Result<(), OrderError> {
        let (accounts, menu) = ctx;

        let restaurant = accounts.get(self.restaurant_id).await.map_err(dependency)?;
        if !restaurant.is_some_and(|r| r.is_active_restaurant()) {
            return Err(OrderError::RestaurantUnavailable);
        }

        if self.lines.is_empty() {
            return Err(OrderError::EmptyOrder);
        }

        let restaurant_id = self.restaurant_id;
        for line in &mut self.lines {
            let item = menu
                .get(line.menu_item_id)
                .await
                .map_err(dependency)?
                .filter(|item| item.restaurant_id == restaurant_id)
                .ok_or(OrderError::InvalidItem(line.menu_item_id.0))?;
            if line.quantity == 0 {
                return Err(OrderError::ValidationError(format!(
                    "Quantity for item {} must be at least 1",
                    line.menu_item_id.0
                )));
            }
            line.name = item.name;
            line.price_at_order = item.price;
        }
        self.total_amount = self.compute_total();

        if self.customer_address.is_empty() {
            let customer = accounts.get(self.customer_id).await.map_err(dependency)?;
            self.customer_address = customer
                .as_ref()
                .and_then(|c| c.customer())
                .and_then(|c| c.delivery_address())
                .ok_or_else(|| {
                    OrderError::ValidationError("Delivery address is required".into())
                })?;
        }

        debug!(order_id = %self.id, total = self.total_amount, "Order priced");
        Ok(())
    }

    /// Orders are never edited field by field.
    async fn on_update(&mut self, _update: (), _ctx: &Self::Context) -> Result<(), OrderError> {
        Err(OrderError::ValidationError(
            "Orders change only through status transitions".into(),
        ))
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        _ctx: &Self::Context,
    ) -> Result<OrderActionResult, OrderError> {
        match action {
            OrderAction::CompareAndSetStatus { expected, next } => {
                if self.status != expected {
                    return Err(OrderError::StatusChanged {
                        expected,
                        actual: self.status,
                    });
                }
                self.status = next;
                self.updated_at = Utc::now();
                Ok(OrderActionResult::CompareAndSetStatus(self.clone()))
            }
            OrderAction::AssignCourier { courier } => {
                if self.courier_id.is_some() {
                    return Err(OrderError::AlreadyClaimed);
                }
                if self.status != OrderStatus::OutForDelivery {
                    return Err(OrderError::NotReadyForPickup(self.status));
                }
                self.courier_id = Some(courier);
                self.status = OrderStatus::Delivering;
                self.updated_at = Utc::now();
                Ok(OrderActionResult::AssignCourier(self.clone()))
            }
        }
    }
}

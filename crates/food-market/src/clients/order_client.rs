//! # Order Client
//!
//! The order workflow as seen by its callers: placing orders, status changes
//! by restaurants and couriers, and the per-party order lists.
//!
//! Validation of new orders happens in the Order actor's `on_create` hook.
//! Status changes are decided here and committed with a compare-and-set
//! action, so a decision made on a stale status is never written.
use crate::account_actor::AccountError;
use crate::clients::AccountClient;
use crate::model::{
    newest_first, AccountId, Order, OrderCreate, OrderId, OrderStatus, OrderView, PartySummary,
    PlaceOrder, Role,
};
use crate::order_actor::{OrderAction, OrderError};
use async_trait::async_trait;
use std::collections::HashMap;
use store_actor::{ActorClient, Filter, FrameworkError, ResourceClient};
use tracing::{debug, info, instrument, warn};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    accounts: AccountClient,
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<OrderError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => OrderError::NotFound(id),
            Err(other) => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

fn account_failure(e: AccountError) -> OrderError {
    OrderError::ActorCommunicationError(e.to_string())
}

/// Which account an order list joins in next to each order.
#[derive(Debug, Clone, Copy)]
enum Counterpart {
    Customer,
    Restaurant,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>, accounts: AccountClient) -> Self {
        Self { inner, accounts }
    }

    #[instrument(skip(self))]
    pub async fn place_order(
        &self,
        customer_id: AccountId,
        request: PlaceOrder,
    ) -> Result<Order, OrderError> {
        debug!("Sending create_order to actor");
        let id = self
            .inner
            .create(OrderCreate::new(customer_id, request))
            .await
            .map_err(Self::map_error)?;
        info!(order_id = %id, "Order placed");
        self.order(id).await
    }

    #[instrument(skip(self))]
    pub async fn order(&self, id: OrderId) -> Result<Order, OrderError> {
        self.get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    /// Moves an order to `target` on behalf of a restaurant or courier.
    ///
    /// Restaurants may only touch their own orders and follow the restaurant
    /// table. Couriers follow the courier table: a move to `Delivering` is a
    /// claim, and only the assigned courier may complete a delivery.
    #[instrument(skip(self))]
    pub async fn set_status(
        &self,
        id: OrderId,
        caller: AccountId,
        role: Role,
        target: OrderStatus,
    ) -> Result<Order, OrderError> {
        let order = self.order(id).await?;

        match role {
            Role::Restaurant if order.restaurant_id != caller => {
                warn!(%caller, "Refusing status change by another restaurant");
                return Err(OrderError::Forbidden("update this order".into()));
            }
            Role::Customer => return Err(OrderError::Forbidden("update order status".into())),
            _ => {}
        }

        if order.status.is_terminal() {
            return Err(OrderError::Finalized(order.status));
        }
        if !order.status.can_move_to(target, role) {
            return Err(OrderError::InvalidTransition {
                from: order.status,
                to: target,
            });
        }

        if role == Role::Delivery {
            if target == OrderStatus::Delivering {
                return self.accept(id, caller).await;
            }
            if order.courier_id != Some(caller) {
                warn!(%caller, "Refusing delivery completion by unassigned courier");
                return Err(OrderError::Forbidden("complete this delivery".into()));
            }
        }

        let updated = self
            .inner
            .perform_action(
                id,
                OrderAction::CompareAndSetStatus {
                    expected: order.status,
                    next: target,
                },
            )
            .await
            .map_err(Self::map_error)?
            .into_order();
        info!(from = %order.status, to = %updated.status, "Order status changed");
        Ok(updated)
    }

    /// Claims an `Out for Delivery` order for a courier. Only one courier wins.
    #[instrument(skip(self))]
    pub async fn accept(&self, id: OrderId, courier: AccountId) -> Result<Order, OrderError> {
        let order = self
            .inner
            .perform_action(id, OrderAction::AssignCourier { courier })
            .await
            .map_err(Self::map_error)?
            .into_order();
        info!(order_id = %id, %courier, "Order claimed for delivery");
        Ok(order)
    }

    #[instrument(skip(self))]
    pub async fn list_for_customer(
        &self,
        customer_id: AccountId,
    ) -> Result<Vec<OrderView>, OrderError> {
        let orders = self
            .list(Filter::new(move |o: &Order| o.customer_id == customer_id))
            .await?;
        self.join(orders, Counterpart::Restaurant).await
    }

    #[instrument(skip(self))]
    pub async fn list_for_restaurant(
        &self,
        restaurant_id: AccountId,
    ) -> Result<Vec<OrderView>, OrderError> {
        let orders = self
            .list(Filter::new(move |o: &Order| o.restaurant_id == restaurant_id))
            .await?;
        self.join(orders, Counterpart::Customer).await
    }

    /// Orders waiting for a courier, with the restaurant to pick up from.
    #[instrument(skip(self))]
    pub async fn available_for_delivery(&self) -> Result<Vec<OrderView>, OrderError> {
        let orders = self
            .list(Filter::new(|o: &Order| {
                o.status == OrderStatus::OutForDelivery && o.courier_id.is_none()
            }))
            .await?;
        self.join(orders, Counterpart::Restaurant).await
    }

    /// A courier's deliveries in progress, with the customer to deliver to.
    #[instrument(skip(self))]
    pub async fn active_deliveries(
        &self,
        courier: AccountId,
    ) -> Result<Vec<OrderView>, OrderError> {
        let orders = self
            .list(Filter::new(move |o: &Order| {
                o.status == OrderStatus::Delivering && o.courier_id == Some(courier)
            }))
            .await?;
        self.join(orders, Counterpart::Customer).await
    }

    async fn join(
        &self,
        orders: Vec<Order>,
        counterpart: Counterpart,
    ) -> Result<Vec<OrderView>, OrderError> {
        let mut summaries: HashMap<AccountId, Option<PartySummary>> = HashMap::new();
        let mut views = Vec::with_capacity(orders.len());

        for order in orders {
            let party = match counterpart {
                Counterpart::Customer => order.customer_id,
                Counterpart::Restaurant => order.restaurant_id,
            };
            let summary = match summaries.get(&party) {
                Some(summary) => summary.clone(),
                None => {
                    let summary = self.accounts.summary(party).await.map_err(account_failure)?;
                    summaries.insert(party, summary.clone());
                    summary
                }
            };
            views.push(OrderView {
                order,
                counterpart: summary,
            });
        }

        newest_first(&mut views);
        debug!(count = views.len(), "Orders listed");
        Ok(views)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Account, MenuItemId, OrderItemRequest};
    use crate::order_actor::OrderActionResult;
    use store_actor::mock::{create_mock_client, expect_action, expect_get, MockClient};

    fn order(status: OrderStatus, courier_id: Option<AccountId>) -> Order {
        let mut order = Order::new(
            OrderId(9),
            OrderCreate {
                customer_id: AccountId(1),
                restaurant_id: AccountId(2),
                items: vec![OrderItemRequest {
                    menu_item_id: MenuItemId(3),
                    quantity: 1,
                }],
                customer_address: Some("Moda Cd. 5".into()),
            },
        );
        order.status = status;
        order.courier_id = courier_id;
        order
    }

    #[tokio::test]
    async fn status_change_is_conditioned_on_the_status_it_read() {
        let accounts = MockClient::<Account>::new();
        let (inner, mut requests) = create_mock_client::<Order>(4);
        let client = OrderClient::new(inner, AccountClient::new(accounts.client()));
        let call = tokio::spawn(async move {
            client
                .set_status(OrderId(9), AccountId(2), Role::Restaurant, OrderStatus::Confirmed)
                .await
        });

        let (id, reply) = expect_get(&mut requests).await.unwrap();
        assert_eq!(id, OrderId(9));
        reply.send(Ok(Some(order(OrderStatus::Pending, None)))).unwrap();

        let (id, action, reply) = expect_action(&mut requests).await.unwrap();
        assert_eq!(id, OrderId(9));
        match action {
            OrderAction::CompareAndSetStatus { expected, next } => {
                assert_eq!(expected, OrderStatus::Pending);
                assert_eq!(next, OrderStatus::Confirmed);
            }
            other => panic!("unexpected action {other:?}"),
        }
        reply
            .send(Ok(OrderActionResult::CompareAndSetStatus(order(
                OrderStatus::Confirmed,
                None,
            ))))
            .unwrap();

        let updated = call.await.unwrap().unwrap();
        assert_eq!(updated.status, OrderStatus::Confirmed);
        accounts.verify();
    }

    #[tokio::test]
    async fn courier_moving_to_delivering_claims_the_order() {
        let accounts = MockClient::<Account>::new();
        let (inner, mut requests) = create_mock_client::<Order>(4);
        let client = OrderClient::new(inner, AccountClient::new(accounts.client()));
        let call = tokio::spawn(async move {
            client
                .set_status(OrderId(9), AccountId(7), Role::Delivery, OrderStatus::Delivering)
                .await
        });

        let (_, reply) = expect_get(&mut requests).await.unwrap();
        reply
            .send(Ok(Some(order(OrderStatus::OutForDelivery, None))))
            .unwrap();

        let (_, action, reply) = expect_action(&mut requests).await.unwrap();
        assert!(matches!(
            action,
            OrderAction::AssignCourier { courier } if courier == AccountId(7)
        ));
        reply
            .send(Ok(OrderActionResult::AssignCourier(order(
                OrderStatus::Delivering,
                Some(AccountId(7)),
            ))))
            .unwrap();

        let claimed = call.await.unwrap().unwrap();
        assert_eq!(claimed.courier_id, Some(AccountId(7)));
    }

    #[tokio::test]
    async fn refused_transition_never_reaches_the_actor() {
        let accounts = MockClient::<Account>::new();
        let (inner, mut requests) = create_mock_client::<Order>(4);
        let client = OrderClient::new(inner, AccountClient::new(accounts.client()));
        let call = tokio::spawn(async move {
            client
                .set_status(OrderId(9), AccountId(2), Role::Restaurant, OrderStatus::Delivered)
                .await
        });

        let (_, reply) = expect_get(&mut requests).await.unwrap();
        reply.send(Ok(Some(order(OrderStatus::Pending, None)))).unwrap();

        let err = call.await.unwrap().unwrap_err();
        assert_eq!(
            err,
            OrderError::InvalidTransition {
                from: OrderStatus::Pending,
                to: OrderStatus::Delivered,
            }
        );
        assert!(requests.try_recv().is_err());
    }
}

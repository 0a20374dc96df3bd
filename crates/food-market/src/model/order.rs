/// Customer orders and their line snapshots.
///
/// # Actor Framework
/// [`Order`] implements [`ActorEntity`](store_actor::ActorEntity) in
/// [`order_actor::entity`](crate::order_actor::entity). Creation validation
/// (restaurant, lines, address) happens in its `on_create` hook; status only
/// moves through [`OrderAction`](crate::order_actor::OrderAction).
use crate::model::{AccountId, MenuItemId, OrderStatus, PartySummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// A menu item as it was when the order was placed. Later menu edits do not touch it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub menu_item_id: MenuItemId,
    pub name: String,
    pub quantity: u32,
    pub price_at_order: f64,
}

impl OrderLine {
    pub fn line_total(&self) -> f64 {
        self.price_at_order * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: OrderId,
    pub customer_id: AccountId,
    pub restaurant_id: AccountId,
    #[serde(rename = "orderItems")]
    pub lines: Vec<OrderLine>,
    pub total_amount: f64,
    pub customer_address: String,
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none", rename = "deliveryPersonId")]
    pub courier_id: Option<AccountId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Creates a pending order from the request. Lines carry only ids and
    /// quantities until `on_create` prices them from the menu; an empty
    /// address is resolved from the customer's profile there too.
    pub fn new(id: OrderId, params: OrderCreate) -> Self {
        let now = Utc::now();
        let lines = params
            .items
            .into_iter()
            .map(|item| OrderLine {
                menu_item_id: item.menu_item_id,
                name: String::new(),
                quantity: item.quantity,
                price_at_order: 0.0,
            })
            .collect();
        Self {
            id,
            customer_id: params.customer_id,
            restaurant_id: params.restaurant_id,
            lines,
            total_amount: 0.0,
            customer_address: params
                .customer_address
                .map(|a| a.trim().to_string())
                .unwrap_or_default(),
            status: OrderStatus::Pending,
            courier_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sum of price times quantity over all lines.
    pub fn compute_total(&self) -> f64 {
        self.lines.iter().map(OrderLine::line_total).sum()
    }
}

/// One requested line of a new order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub menu_item_id: MenuItemId,
    pub quantity: u32,
}

/// Request body for placing an order; the customer comes from the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrder {
    pub restaurant_id: AccountId,
    #[serde(default)]
    pub order_items: Vec<OrderItemRequest>,
    #[serde(default)]
    pub customer_address: Option<String>,
}

/// Payload for creating a new order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub customer_id: AccountId,
    pub restaurant_id: AccountId,
    pub items: Vec<OrderItemRequest>,
    pub customer_address: Option<String>,
}

impl OrderCreate {
    pub fn new(customer_id: AccountId, request: PlaceOrder) -> Self {
        Self {
            customer_id,
            restaurant_id: request.restaurant_id,
            items: request.order_items,
            customer_address: request.customer_address,
        }
    }
}

/// An order together with the other party's details, as listed to a user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    #[serde(flatten)]
    pub order: Order,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counterpart: Option<PartySummary>,
}

/// Newest first; equal timestamps fall back to the higher id first.
pub fn newest_first(orders: &mut [OrderView]) {
    orders.sort_by(|a, b| {
        b.order
            .created_at
            .cmp(&a.order.created_at)
            .then_with(|| b.order.id.cmp(&a.order.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn request(items: &[(u32, u32)], address: Option<&str>) -> OrderCreate {
        OrderCreate {
            customer_id: AccountId(1),
            restaurant_id: AccountId(2),
            items: items
                .iter()
                .map(|&(id, quantity)| OrderItemRequest {
                    menu_item_id: MenuItemId(id),
                    quantity,
                })
                .collect(),
            customer_address: address.map(str::to_string),
        }
    }

    #[test]
    fn new_order_is_pending_and_unpriced() {
        let order = Order::new(OrderId(1), request(&[(10, 2), (11, 1)], Some("  Moda 5 ")));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.courier_id, None);
        assert_eq!(order.lines.len(), 2);
        assert_eq!(order.lines[0].quantity, 2);
        assert_eq!(order.customer_address, "Moda 5");
        assert_eq!(order.compute_total(), 0.0);
    }

    #[test]
    fn total_is_price_times_quantity() {
        let mut order = Order::new(OrderId(1), request(&[(10, 2), (11, 1)], None));
        order.lines[0].price_at_order = 10.0;
        order.lines[1].price_at_order = 5.0;
        assert_eq!(order.compute_total(), 25.0);
    }

    #[test]
    fn newest_first_breaks_ties_by_id() {
        let base = Order::new(OrderId(1), request(&[(10, 1)], None));
        let at = base.created_at;
        let view = |id: u32, offset: i64| OrderView {
            order: Order {
                id: OrderId(id),
                created_at: at + Duration::seconds(offset),
                ..base.clone()
            },
            counterpart: None,
        };
        let mut orders = vec![view(1, 0), view(2, 5), view(3, 0), view(4, -5)];
        newest_first(&mut orders);
        let ids: Vec<u32> = orders.iter().map(|v| v.order.id.0).collect();
        assert_eq!(ids, [2, 3, 1, 4]);
    }

    #[test]
    fn place_order_reads_camel_case() {
        let body = r#"{
            "restaurantId": 7,
            "orderItems": [{ "menuItemId": 3, "quantity": 2 }],
            "customerAddress": "Kadikoy"
        }"#;
        let request: PlaceOrder = serde_json::from_str(body).unwrap();
        assert_eq!(request.restaurant_id, AccountId(7));
        assert_eq!(request.order_items[0].menu_item_id, MenuItemId(3));
        assert_eq!(request.customer_address.as_deref(), Some("Kadikoy"));
    }
}

//! A shopping cart held by one session, bound to a single restaurant.
//!
//! The cart never talks to the stores; it only prepares a [`PlaceOrder`]
//! request. Prices in the cart are display values; the order is priced again
//! from the menu when it is placed.
use crate::model::{AccountId, MenuItem, MenuItemId, OrderItemRequest, PlaceOrder};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Cart is empty")]
    Empty,
    #[error("Item {item} belongs to another restaurant")]
    OtherRestaurant { item: MenuItemId },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub menu_item_id: MenuItemId,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    restaurant_id: AccountId,
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new(restaurant_id: AccountId) -> Self {
        Self {
            restaurant_id,
            lines: Vec::new(),
        }
    }

    pub fn restaurant_id(&self) -> AccountId {
        self.restaurant_id
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Adds one unit of `item`, merging with an existing line.
    pub fn add(&mut self, item: &MenuItem) -> Result<(), CartError> {
        if item.restaurant_id != self.restaurant_id {
            return Err(CartError::OtherRestaurant { item: item.id });
        }
        match self.lines.iter_mut().find(|l| l.menu_item_id == item.id) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(CartLine {
                menu_item_id: item.id,
                name: item.name.clone(),
                price: item.price,
                quantity: 1,
            }),
        }
        Ok(())
    }

    /// Removes one unit of `item`; the line disappears at zero.
    pub fn remove(&mut self, item: MenuItemId) {
        if let Some(pos) = self.lines.iter().position(|l| l.menu_item_id == item) {
            if self.lines[pos].quantity > 1 {
                self.lines[pos].quantity -= 1;
            } else {
                self.lines.remove(pos);
            }
        }
    }

    pub fn subtotal(&self) -> f64 {
        self.lines
            .iter()
            .map(|l| l.price * f64::from(l.quantity))
            .sum()
    }

    /// Builds the order request. The cart is left untouched so a failed
    /// order can be retried.
    pub fn checkout(&self, address: Option<String>) -> Result<PlaceOrder, CartError> {
        if self.lines.is_empty() {
            return Err(CartError::Empty);
        }
        Ok(PlaceOrder {
            restaurant_id: self.restaurant_id,
            order_items: self
                .lines
                .iter()
                .map(|l| OrderItemRequest {
                    menu_item_id: l.menu_item_id,
                    quantity: l.quantity,
                })
                .collect(),
            customer_address: address,
        })
    }
}

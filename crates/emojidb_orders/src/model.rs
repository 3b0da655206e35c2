//! Serializable order and menu views.

use serde::{Deserialize, Serialize};

/// One dish of an order, with how many portions were ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Dish name, as listed on the menu.
    pub name: String,
    /// Number of portions.
    pub quantity: u64,
}

impl OrderLine {
    /// Creates an order line.
    pub fn new(name: impl Into<String>, quantity: u64) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order id, unique among open orders.
    pub id: u64,
    /// Table number.
    pub table: u64,
    /// Ordered dishes.
    pub dishes: Vec<OrderLine>,
    /// Milliseconds since the Unix epoch at which the order was placed.
    pub created_at: u64,
}

/// A dish on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dish {
    /// Dish name.
    pub name: String,
    /// Special dishes move their orders to the front of the queue.
    pub special: bool,
}

//! Order service queries.

use crate::config::{self, ORDER_API};
use crate::error::Result;
use crate::models::{Order, OrderStatus, OrderSubmission, StatusUpdate};
use crate::transport::Transport;

/// Query interface for the order service.
pub struct OrderQuery<'a> {
    transport: &'a Transport,
}

impl<'a> OrderQuery<'a> {
    /// Create a new `OrderQuery` bound to the given transport.
    pub fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// List all orders.
    pub fn list(&self) -> Result<Vec<Order>> {
        self.transport.get_list(ORDER_API)
    }

    /// Get a single order by id.
    pub fn get(&self, order_id: i64) -> Result<Order> {
        self.transport.get_json(&config::item_path(ORDER_API, order_id))
    }

    /// Submit an order. Usually reached through [`Checkout`](crate::checkout::Checkout).
    pub fn create(&self, submission: &OrderSubmission) -> Result<Order> {
        self.transport.post_json(ORDER_API, submission)
    }

    /// Change an order's status and return the updated record.
    pub fn update_status(&self, order_id: i64, status: OrderStatus) -> Result<Order> {
        let path = format!("{}/status", config::item_path(ORDER_API, order_id));
        self.transport.patch_json(&path, &StatusUpdate { status })
    }

    /// Delete an order by id.
    pub fn delete(&self, order_id: i64) -> Result<()> {
        self.transport.delete(&config::item_path(ORDER_API, order_id))
    }
}

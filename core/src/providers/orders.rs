//! Order repository trait.

use crate::error::Result;
use crate::types::{Order, OrderId, OrderItem, OrderItemId};

/// Read access to orders and order items.
///
/// Writes to order items happen on the caller's side: the reconciliation
/// service mutates the `OrderItem` it was handed, and whoever drives the
/// checkout persists it, the same way the rest of the order pipeline does.
pub trait OrderRepository: Send + Sync {
    /// Load an order by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage query fails.
    async fn order(&self, id: OrderId) -> Result<Option<Order>>;

    /// Load an order item by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage query fails.
    async fn order_item(&self, id: OrderItemId) -> Result<Option<OrderItem>>;
}

//! Mock order repository for testing.

use crate::error::{RegistrationError, Result};
use crate::providers::OrderRepository;
use crate::types::{Order, OrderId, OrderItem, OrderItemId};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Mock order repository.
///
/// Uses in-memory storage for testing.
#[derive(Debug, Clone)]
pub struct MockOrderRepository {
    orders: Arc<Mutex<HashMap<OrderId, Order>>>,
    items: Arc<Mutex<HashMap<OrderItemId, OrderItem>>>,
}

impl MockOrderRepository {
    /// Create a new mock order repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            orders: Arc::new(Mutex::new(HashMap::new())),
            items: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Seed an order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[allow(clippy::unwrap_used)] // Test helper
    pub fn insert_order(&self, order: Order) {
        self.orders.lock().unwrap().insert(order.id, order);
    }

    /// Seed an order item.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[allow(clippy::unwrap_used)] // Test helper
    pub fn insert_order_item(&self, item: OrderItem) {
        self.items.lock().unwrap().insert(item.id, item);
    }
}

impl Default for MockOrderRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderRepository for MockOrderRepository {
    fn order(&self, id: OrderId) -> impl Future<Output = Result<Option<Order>>> + Send {
        let orders = Arc::clone(&self.orders);

        async move {
            Ok(orders
                .lock()
                .map_err(|_| RegistrationError::storage("order mock lock poisoned"))?
                .get(&id)
                .cloned())
        }
    }

    fn order_item(
        &self,
        id: OrderItemId,
    ) -> impl Future<Output = Result<Option<OrderItem>>> + Send {
        let items = Arc::clone(&self.items);

        async move {
            Ok(items
                .lock()
                .map_err(|_| RegistrationError::storage("order mock lock poisoned"))?
                .get(&id)
                .cloned())
        }
    }
}

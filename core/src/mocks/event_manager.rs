//! Mock event manager for testing.

use crate::error::{RegistrationError, Result};
use crate::providers::EventManager;
use crate::types::{EventMeta, Product, ProductId};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Mock event manager.
///
/// Products become events by being seeded; a product can be seeded as an
/// event with or without settings.
#[derive(Debug, Clone)]
pub struct MockEventManager {
    events: Arc<Mutex<HashMap<ProductId, Option<EventMeta>>>>,
}

impl MockEventManager {
    /// Create a new mock event manager.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Flag a product as an event with the given settings.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[allow(clippy::unwrap_used)] // Test helper
    pub fn insert_event(&self, product: ProductId, meta: EventMeta) {
        self.events.lock().unwrap().insert(product, Some(meta));
    }

    /// Flag a product as an event that has no settings yet.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[allow(clippy::unwrap_used)] // Test helper
    pub fn insert_event_without_meta(&self, product: ProductId) {
        self.events.lock().unwrap().insert(product, None);
    }
}

impl Default for MockEventManager {
    fn default() -> Self {
        Self::new()
    }
}

impl EventManager for MockEventManager {
    fn is_event(&self, product: &Product) -> impl Future<Output = Result<bool>> + Send {
        let events = Arc::clone(&self.events);
        let product_id = product.id;

        async move {
            Ok(events
                .lock()
                .map_err(|_| RegistrationError::storage("event manager mock lock poisoned"))?
                .contains_key(&product_id))
        }
    }

    fn event_meta(
        &self,
        product: &Product,
    ) -> impl Future<Output = Result<Option<EventMeta>>> + Send {
        let events = Arc::clone(&self.events);
        let product_id = product.id;

        async move {
            Ok(events
                .lock()
                .map_err(|_| RegistrationError::storage("event manager mock lock poisoned"))?
                .get(&product_id)
                .cloned()
                .flatten())
        }
    }
}

//! Event manager trait.

use crate::error::Result;
use crate::types::{EventMeta, Product};

/// The external event backend's view of products.
///
/// A product is an event only if this collaborator says so; the commerce
/// side carries no event flag of its own.
pub trait EventManager: Send + Sync {
    /// Whether the product has been configured as an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend lookup fails.
    async fn is_event(&self, product: &Product) -> Result<bool>;

    /// The event settings for a product.
    ///
    /// Returns `None` when the product is not an event or its settings have
    /// not been created yet — a product can be flagged as an event before
    /// its metadata exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend lookup fails.
    async fn event_meta(&self, product: &Product) -> Result<Option<EventMeta>>;
}

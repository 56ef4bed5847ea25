//! Product catalog repository trait.

use crate::error::Result;
use crate::types::{
    Product, ProductId, ProductVariation, ProductVariationType, VariationId, VariationTypeId,
};

/// Read access to products, variations, and variation types.
pub trait CatalogRepository: Send + Sync {
    /// Load a product variation by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage query fails.
    async fn variation(&self, id: VariationId) -> Result<Option<ProductVariation>>;

    /// Load a variation type definition by machine name.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage query fails.
    async fn variation_type(&self, id: &VariationTypeId) -> Result<Option<ProductVariationType>>;

    /// Load a product by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage query fails.
    async fn product(&self, id: ProductId) -> Result<Option<Product>>;
}

//! Mock catalog repository for testing.

use crate::error::{RegistrationError, Result};
use crate::providers::CatalogRepository;
use crate::types::{
    Product, ProductId, ProductVariation, ProductVariationType, VariationId, VariationTypeId,
};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Mock catalog repository.
///
/// Uses in-memory storage for testing.
#[derive(Debug, Clone)]
pub struct MockCatalogRepository {
    variations: Arc<Mutex<HashMap<VariationId, ProductVariation>>>,
    variation_types: Arc<Mutex<HashMap<VariationTypeId, ProductVariationType>>>,
    products: Arc<Mutex<HashMap<ProductId, Product>>>,
}

impl MockCatalogRepository {
    /// Create a new mock catalog repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            variations: Arc::new(Mutex::new(HashMap::new())),
            variation_types: Arc::new(Mutex::new(HashMap::new())),
            products: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Seed a product variation.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[allow(clippy::unwrap_used)] // Test helper
    pub fn insert_variation(&self, variation: ProductVariation) {
        self.variations.lock().unwrap().insert(variation.id, variation);
    }

    /// Seed a variation type definition.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[allow(clippy::unwrap_used)] // Test helper
    pub fn insert_variation_type(&self, variation_type: ProductVariationType) {
        self.variation_types
            .lock()
            .unwrap()
            .insert(variation_type.id.clone(), variation_type);
    }

    /// Seed a product.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[allow(clippy::unwrap_used)] // Test helper
    pub fn insert_product(&self, product: Product) {
        self.products.lock().unwrap().insert(product.id, product);
    }
}

impl Default for MockCatalogRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogRepository for MockCatalogRepository {
    fn variation(
        &self,
        id: VariationId,
    ) -> impl Future<Output = Result<Option<ProductVariation>>> + Send {
        let variations = Arc::clone(&self.variations);

        async move {
            Ok(variations
                .lock()
                .map_err(|_| RegistrationError::storage("catalog mock lock poisoned"))?
                .get(&id)
                .cloned())
        }
    }

    fn variation_type(
        &self,
        id: &VariationTypeId,
    ) -> impl Future<Output = Result<Option<ProductVariationType>>> + Send {
        let variation_types = Arc::clone(&self.variation_types);
        let id = id.clone();

        async move {
            Ok(variation_types
                .lock()
                .map_err(|_| RegistrationError::storage("catalog mock lock poisoned"))?
                .get(&id)
                .cloned())
        }
    }

    fn product(&self, id: ProductId) -> impl Future<Output = Result<Option<Product>>> + Send {
        let products = Arc::clone(&self.products);

        async move {
            Ok(products
                .lock()
                .map_err(|_| RegistrationError::storage("catalog mock lock poisoned"))?
                .get(&id)
                .cloned())
        }
    }
}

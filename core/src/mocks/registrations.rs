//! Mock registration repository for testing.

use crate::error::{RegistrationError, Result};
use crate::providers::RegistrationRepository;
use crate::types::{
    NewRegistration, OrderItemId, Registration, RegistrationId, RegistrationType,
    RegistrationTypeId,
};
use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Mock registration repository.
///
/// Registrations live in a `BTreeMap`, so query order is ascending by id —
/// "first returned by the query" is the oldest registration. Created
/// registrations get ids from an atomic sequence, matching the
/// monotonically-increasing ids real storage assigns.
#[derive(Debug, Clone)]
pub struct MockRegistrationRepository {
    registrations: Arc<Mutex<BTreeMap<RegistrationId, Registration>>>,
    registration_types: Arc<Mutex<HashMap<RegistrationTypeId, RegistrationType>>>,
    next_id: Arc<AtomicU64>,
}

impl MockRegistrationRepository {
    /// Create a new mock registration repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registrations: Arc::new(Mutex::new(BTreeMap::new())),
            registration_types: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Seed a registration with an explicit id. The id sequence advances
    /// past it so later creations don't collide.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[allow(clippy::unwrap_used)] // Test helper
    pub fn insert_registration(&self, registration: Registration) {
        self.next_id
            .fetch_max(registration.id.as_u64() + 1, Ordering::SeqCst);
        self.registrations
            .lock()
            .unwrap()
            .insert(registration.id, registration);
    }

    /// Seed a registration type definition.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[allow(clippy::unwrap_used)] // Test helper
    pub fn insert_registration_type(&self, registration_type: RegistrationType) {
        self.registration_types
            .lock()
            .unwrap()
            .insert(registration_type.id.clone(), registration_type);
    }

    /// Number of registrations currently stored.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[allow(clippy::unwrap_used)] // Test helper
    #[must_use]
    pub fn len(&self) -> usize {
        self.registrations.lock().unwrap().len()
    }

    /// Whether no registrations are stored.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[allow(clippy::unwrap_used)] // Test helper
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registrations.lock().unwrap().is_empty()
    }
}

impl Default for MockRegistrationRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationRepository for MockRegistrationRepository {
    fn ids_for_order_item(
        &self,
        order_item: OrderItemId,
    ) -> impl Future<Output = Result<Vec<RegistrationId>>> + Send {
        let registrations = Arc::clone(&self.registrations);

        async move {
            Ok(registrations
                .lock()
                .map_err(|_| RegistrationError::storage("registration mock lock poisoned"))?
                .values()
                .filter(|registration| registration.order_item == Some(order_item))
                .map(|registration| registration.id)
                .collect())
        }
    }

    fn ids_for_order_items(
        &self,
        order_items: &[OrderItemId],
    ) -> impl Future<Output = Result<Vec<RegistrationId>>> + Send {
        let registrations = Arc::clone(&self.registrations);
        let order_items = order_items.to_vec();

        async move {
            Ok(registrations
                .lock()
                .map_err(|_| RegistrationError::storage("registration mock lock poisoned"))?
                .values()
                .filter(|registration| {
                    registration
                        .order_item
                        .is_some_and(|item| order_items.contains(&item))
                })
                .map(|registration| registration.id)
                .collect())
        }
    }

    fn load(
        &self,
        id: RegistrationId,
    ) -> impl Future<Output = Result<Option<Registration>>> + Send {
        let registrations = Arc::clone(&self.registrations);

        async move {
            Ok(registrations
                .lock()
                .map_err(|_| RegistrationError::storage("registration mock lock poisoned"))?
                .get(&id)
                .cloned())
        }
    }

    fn load_many(
        &self,
        ids: &[RegistrationId],
    ) -> impl Future<Output = Result<Vec<Registration>>> + Send {
        let registrations = Arc::clone(&self.registrations);
        let ids = ids.to_vec();

        async move {
            let guard = registrations
                .lock()
                .map_err(|_| RegistrationError::storage("registration mock lock poisoned"))?;
            Ok(ids.iter().filter_map(|id| guard.get(id).cloned()).collect())
        }
    }

    fn create(
        &self,
        registration: &NewRegistration,
    ) -> impl Future<Output = Result<Registration>> + Send {
        let registrations = Arc::clone(&self.registrations);
        let next_id = Arc::clone(&self.next_id);
        let draft = registration.clone();

        async move {
            let id = RegistrationId::new(next_id.fetch_add(1, Ordering::SeqCst));
            let registration = Registration {
                id,
                registration_type: draft.registration_type,
                event: draft.event,
                order_item: draft.order_item,
                registrant_qty: draft.registrant_qty,
            };
            registrations
                .lock()
                .map_err(|_| RegistrationError::storage("registration mock lock poisoned"))?
                .insert(id, registration.clone());
            Ok(registration)
        }
    }

    fn update(
        &self,
        registration: &Registration,
    ) -> impl Future<Output = Result<Registration>> + Send {
        let registrations = Arc::clone(&self.registrations);
        let registration = registration.clone();

        async move {
            let mut guard = registrations
                .lock()
                .map_err(|_| RegistrationError::storage("registration mock lock poisoned"))?;
            if !guard.contains_key(&registration.id) {
                return Err(RegistrationError::storage(format!(
                    "registration {} does not exist",
                    registration.id
                )));
            }
            guard.insert(registration.id, registration.clone());
            Ok(registration)
        }
    }

    fn registration_type(
        &self,
        id: &RegistrationTypeId,
    ) -> impl Future<Output = Result<Option<RegistrationType>>> + Send {
        let registration_types = Arc::clone(&self.registration_types);
        let id = id.clone();

        async move {
            Ok(registration_types
                .lock()
                .map_err(|_| RegistrationError::storage("registration mock lock poisoned"))?
                .get(&id)
                .cloned())
        }
    }
}

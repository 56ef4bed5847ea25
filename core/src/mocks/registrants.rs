//! Mock registrant repository for testing.

use crate::error::{RegistrationError, Result};
use crate::providers::RegistrantRepository;
use crate::types::{Identity, IdentityRef, Registrant, RegistrationId};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Mock registrant repository.
///
/// Registrants are stored per registration in insertion order; stubs
/// (registrants without an id) are kept alongside assigned rows, the way
/// real storage materializes placeholder rows.
#[derive(Debug, Clone)]
pub struct MockRegistrantRepository {
    registrants: Arc<Mutex<HashMap<RegistrationId, Vec<Registrant>>>>,
    identities: Arc<Mutex<HashMap<IdentityRef, Identity>>>,
}

impl MockRegistrantRepository {
    /// Create a new mock registrant repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registrants: Arc::new(Mutex::new(HashMap::new())),
            identities: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Seed a registrant row.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[allow(clippy::unwrap_used)] // Test helper
    pub fn insert_registrant(&self, registrant: Registrant) {
        self.registrants
            .lock()
            .unwrap()
            .entry(registrant.registration)
            .or_default()
            .push(registrant);
    }

    /// Seed an identity.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[allow(clippy::unwrap_used)] // Test helper
    pub fn insert_identity(&self, identity: Identity) {
        self.identities
            .lock()
            .unwrap()
            .insert(identity.reference(), identity);
    }
}

impl Default for MockRegistrantRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrantRepository for MockRegistrantRepository {
    fn for_registration(
        &self,
        registration: RegistrationId,
    ) -> impl Future<Output = Result<Vec<Registrant>>> + Send {
        let registrants = Arc::clone(&self.registrants);

        async move {
            Ok(registrants
                .lock()
                .map_err(|_| RegistrationError::storage("registrant mock lock poisoned"))?
                .get(&registration)
                .cloned()
                .unwrap_or_default())
        }
    }

    fn identity(
        &self,
        reference: &IdentityRef,
    ) -> impl Future<Output = Result<Option<Identity>>> + Send {
        let identities = Arc::clone(&self.identities);
        let reference = *reference;

        async move {
            Ok(identities
                .lock()
                .map_err(|_| RegistrationError::storage("registrant mock lock poisoned"))?
                .get(&reference)
                .cloned())
        }
    }
}

//! Registrant repository trait.

use crate::error::Result;
use crate::types::{Identity, IdentityRef, Registrant, RegistrationId};

/// Read access to registrants and the identities they link to.
pub trait RegistrantRepository: Send + Sync {
    /// All registrant rows for a registration, stubs included, in stable
    /// storage order.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage query fails.
    async fn for_registration(&self, registration: RegistrationId) -> Result<Vec<Registrant>>;

    /// Resolve an identity reference. Returns `None` when the referenced
    /// identity has been deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage query fails.
    async fn identity(&self, reference: &IdentityRef) -> Result<Option<Identity>>;
}

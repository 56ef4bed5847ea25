//! Registration repository trait.

use crate::error::Result;
use crate::types::{
    NewRegistration, OrderItemId, Registration, RegistrationId, RegistrationType,
    RegistrationTypeId,
};

/// Storage access for registrations.
///
/// The id-returning query methods mirror the underlying entity query
/// contract (`condition(field, value).execute()` returns ids); the service
/// layer decides ordering and which ids to load. Query order is whatever
/// the backend returns; the in-memory implementation yields ascending ids.
pub trait RegistrationRepository: Send + Sync {
    /// Ids of registrations whose order-item back-reference equals the
    /// given id. At most one is expected; more than one means the
    /// uniqueness invariant was violated by a concurrent writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage query fails.
    async fn ids_for_order_item(&self, order_item: OrderItemId) -> Result<Vec<RegistrationId>>;

    /// Ids of registrations whose back-reference is any of the given order
    /// items. Callers must not pass an empty slice; the service guards
    /// against issuing that query.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage query fails.
    async fn ids_for_order_items(
        &self,
        order_items: &[OrderItemId],
    ) -> Result<Vec<RegistrationId>>;

    /// Load one registration by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage query fails.
    async fn load(&self, id: RegistrationId) -> Result<Option<Registration>>;

    /// Load several registrations, preserving the order of the id slice.
    /// Ids that no longer exist are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage query fails.
    async fn load_many(&self, ids: &[RegistrationId]) -> Result<Vec<Registration>>;

    /// Persist a new registration. Storage assigns the id.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    async fn create(&self, registration: &NewRegistration) -> Result<Registration>;

    /// Persist changes to an existing registration.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails or the registration does not
    /// exist.
    async fn update(&self, registration: &Registration) -> Result<Registration>;

    /// Load a registration type definition by machine name.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage query fails.
    async fn registration_type(
        &self,
        id: &RegistrationTypeId,
    ) -> Result<Option<RegistrationType>>;
}

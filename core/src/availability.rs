//! Checks if an event is open for registrations.

use crate::error::Result;
use crate::providers::{
    AlwaysEligible, CatalogRepository, EligibilityPolicy, EventManager, OrderRepository,
    RegistrantRepository, RegistrationRepository,
};
use crate::registration::RegistrationData;
use crate::types::{AvailabilityContext, OrderItem};

/// Purchasability gate for event order items.
///
/// The order-validation pipeline calls [`applies`](Self::applies) to find
/// out whether this checker has an opinion on an order item at all, then
/// [`check`](Self::check) to decide whether the item can be purchased right
/// now. Both are read-only and cheap; they run per line item on every
/// cart and checkout validation pass.
#[derive(Clone)]
pub struct EventAvailabilityChecker<M, O, C, R, G, P = AlwaysEligible>
where
    M: EventManager + Clone,
    O: OrderRepository + Clone,
    C: CatalogRepository + Clone,
    R: RegistrationRepository + Clone,
    G: RegistrantRepository + Clone,
    P: EligibilityPolicy,
{
    event_manager: M,
    registration_data: RegistrationData<M, O, C, R, G>,
    eligibility: P,
}

impl<M, O, C, R, G, P> EventAvailabilityChecker<M, O, C, R, G, P>
where
    M: EventManager + Clone,
    O: OrderRepository + Clone,
    C: CatalogRepository + Clone,
    R: RegistrationRepository + Clone,
    G: RegistrantRepository + Clone,
    P: EligibilityPolicy,
{
    /// Creates a new availability checker with the given eligibility
    /// policy
    #[must_use]
    pub const fn new(
        event_manager: M,
        registration_data: RegistrationData<M, O, C, R, G>,
        eligibility: P,
    ) -> Self {
        Self {
            event_manager,
            registration_data,
            eligibility,
        }
    }

    /// Whether this checker applies to the order item, i.e. whether the
    /// item resolves to an event product.
    ///
    /// # Errors
    ///
    /// Returns an error if a storage lookup fails.
    pub async fn applies(&self, order_item: &OrderItem) -> Result<bool> {
        Ok(self
            .registration_data
            .event_for_order_item(order_item)
            .await?
            .is_some())
    }

    /// Whether the order item can be purchased right now.
    ///
    /// `false` when the item doesn't resolve to an event, the event has no
    /// settings, registrations are closed, or no registration type is
    /// configured. Otherwise the eligibility policy decides; the default
    /// policy admits everyone.
    ///
    /// # Errors
    ///
    /// Returns an error if a storage lookup fails.
    pub async fn check(
        &self,
        order_item: &OrderItem,
        context: &AvailabilityContext,
    ) -> Result<bool> {
        let Some(product) = self
            .registration_data
            .event_for_order_item(order_item)
            .await?
        else {
            return Ok(false);
        };

        let Some(meta) = self.event_manager.event_meta(&product).await? else {
            // No settings available.
            tracing::debug!(event = %product.id, "event has no settings, unavailable");
            return Ok(false);
        };

        if !meta.is_accepting_registrations() {
            tracing::debug!(event = %product.id, "event is not accepting registrations");
            return Ok(false);
        }

        // Check for registration types.
        if meta.registration_types().is_empty() {
            tracing::debug!(event = %product.id, "event has no registration types");
            return Ok(false);
        }

        self.eligibility.eligible(context, &product, &meta).await
    }
}

impl<M, O, C, R, G> EventAvailabilityChecker<M, O, C, R, G, AlwaysEligible>
where
    M: EventManager + Clone,
    O: OrderRepository + Clone,
    C: CatalogRepository + Clone,
    R: RegistrationRepository + Clone,
    G: RegistrantRepository + Clone,
{
    /// Creates a checker with the default admit-everyone eligibility
    /// policy
    #[must_use]
    pub const fn allowing_all(
        event_manager: M,
        registration_data: RegistrationData<M, O, C, R, G>,
    ) -> Self {
        Self::new(event_manager, registration_data, AlwaysEligible)
    }
}

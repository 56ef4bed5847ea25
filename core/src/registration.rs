//! Registration reconciliation and query service.

use crate::error::{ConfigurationError, RegistrationError, Result};
use crate::providers::{
    CatalogRepository, EventManager, OrderRepository, RegistrantRepository,
    RegistrationRepository,
};
use crate::report::{RegistrantList, RegistrationRecord};
use crate::types::{
    NewRegistration, Order, OrderItem, OrderItemId, Product, PurchasedEntity, RegistrantId,
    Registration,
};
use std::collections::BTreeMap;

/// Service for managing registrations attached to commerce orders.
///
/// One registration exists per event order item; the service creates them
/// lazily, keeps line-item quantity in step with the registrant count, and
/// produces the registrant summaries and export records the host
/// application renders.
///
/// All collaborators are constructor-injected (see [`crate::providers`]);
/// the service holds no state of its own and every operation is a
/// short-lived sequence of reads and writes within the caller's request.
#[derive(Clone)]
pub struct RegistrationData<M, O, C, R, G>
where
    M: EventManager + Clone,
    O: OrderRepository + Clone,
    C: CatalogRepository + Clone,
    R: RegistrationRepository + Clone,
    G: RegistrantRepository + Clone,
{
    event_manager: M,
    orders: O,
    catalog: C,
    registrations: R,
    registrants: G,
}

impl<M, O, C, R, G> RegistrationData<M, O, C, R, G>
where
    M: EventManager + Clone,
    O: OrderRepository + Clone,
    C: CatalogRepository + Clone,
    R: RegistrationRepository + Clone,
    G: RegistrantRepository + Clone,
{
    /// Creates a new registration data service
    #[must_use]
    pub const fn new(
        event_manager: M,
        orders: O,
        catalog: C,
        registrations: R,
        registrants: G,
    ) -> Self {
        Self {
            event_manager,
            orders,
            catalog,
            registrations,
            registrants,
        }
    }

    /// Returns the order item's product if the product is an event.
    ///
    /// The purchased entity must be a product variation, the variation's
    /// product must still exist, and the event manager must recognize the
    /// product as an event. Anything short of that resolves to `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if a storage lookup fails.
    pub async fn event_for_order_item(&self, order_item: &OrderItem) -> Result<Option<Product>> {
        let Some(PurchasedEntity::Variation(variation_id)) = order_item.purchased else {
            return Ok(None);
        };
        let Some(variation) = self.catalog.variation(variation_id).await? else {
            return Ok(None);
        };
        let Some(product) = self.catalog.product(variation.product_id).await? else {
            return Ok(None);
        };
        if self.event_manager.is_event(&product).await? {
            Ok(Some(product))
        } else {
            Ok(None)
        }
    }

    /// Creates registrations for order items that don't have them yet.
    ///
    /// Items that don't resolve to an event are skipped, as are items that
    /// already carry a registration, so repeated calls over the same order
    /// create nothing new.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when an event has zero or more than
    /// one registration type; the error aborts the remaining items. Also
    /// returns an error if a storage operation fails.
    pub async fn generate_order_registrations(&self, order: &Order) -> Result<()> {
        for &item_id in &order.item_ids {
            let Some(order_item) = self.orders.order_item(item_id).await? else {
                tracing::debug!(order_item = %item_id, "order item no longer exists, skipping");
                continue;
            };

            let Some(event) = self.event_for_order_item(&order_item).await? else {
                // Not an event.
                continue;
            };

            // Check for an existing registration on the order item.
            if self.registration_by_order_item(item_id).await?.is_some() {
                continue;
            }

            let registration = self.create_registration(&event, item_id).await?;
            tracing::info!(
                registration = %registration.id,
                order_item = %item_id,
                event = %event.id,
                "created registration for order item"
            );
        }
        Ok(())
    }

    /// Creates a registration for the given event and order item.
    async fn create_registration(
        &self,
        event: &Product,
        order_item: OrderItemId,
    ) -> Result<Registration> {
        let registration_types = match self.event_manager.event_meta(event).await? {
            Some(meta) => meta.registration_types().to_vec(),
            None => Vec::new(),
        };
        if registration_types.len() > 1 {
            return Err(ConfigurationError::MultipleRegistrationTypes {
                event: event.id,
                count: registration_types.len(),
            }
            .into());
        }
        let Some(registration_type) = registration_types.first() else {
            return Err(ConfigurationError::NoRegistrationTypes { event: event.id }.into());
        };

        let draft = NewRegistration::new(registration_type.id.clone(), event.id)
            .with_order_item(order_item);
        self.registrations.create(&draft).await
    }

    /// Returns the single registration for the given order item id.
    ///
    /// The uniqueness invariant forbids more than one; should duplicates
    /// exist anyway (a concurrent-creation anomaly), the first id the query
    /// returns wins.
    ///
    /// # Errors
    ///
    /// Returns an error if a storage lookup fails.
    pub async fn registration_by_order_item(
        &self,
        order_item: OrderItemId,
    ) -> Result<Option<Registration>> {
        let ids = self.registrations.ids_for_order_item(order_item).await?;
        if ids.len() > 1 {
            tracing::warn!(
                order_item = %order_item,
                count = ids.len(),
                "multiple registrations reference one order item, using the first"
            );
        }
        let Some(&first) = ids.first() else {
            return Ok(None);
        };
        self.registrations.load(first).await
    }

    /// Returns all registrations attached to the order's items, most
    /// recently created first (descending registration id).
    ///
    /// # Errors
    ///
    /// Returns an error if a storage lookup fails.
    pub async fn order_registrations(&self, order: &Order) -> Result<Vec<Registration>> {
        if order.item_ids.is_empty() {
            // No order items. Bail out to avoid an unbounded query.
            return Ok(Vec::new());
        }

        let mut ids = self.registrations.ids_for_order_items(&order.item_ids).await?;
        ids.sort_unstable_by(|a, b| b.cmp(a));
        self.registrations.load_many(&ids).await
    }

    /// Returns the order item a registration was created for, if the
    /// registration carries the back-reference and the item still exists.
    ///
    /// # Errors
    ///
    /// Returns an error if a storage lookup fails.
    pub async fn order_item_for_registration(
        &self,
        registration: &Registration,
    ) -> Result<Option<OrderItem>> {
        match registration.order_item {
            Some(id) => self.orders.order_item(id).await,
            None => Ok(None),
        }
    }

    /// Updates the order item quantity from the registrant count.
    ///
    /// Quantity tracks the number of registrants with an assigned id. With
    /// none assigned the item stays at quantity one so the cart doesn't
    /// prune it, while the registration's own quantity drops to zero so no
    /// identity-less registrant stubs get created elsewhere.
    ///
    /// The item is mutated in place; the caller persists it along with the
    /// rest of the order. The registration is persisted here.
    ///
    /// # Errors
    ///
    /// Returns an error if a storage operation fails.
    pub async fn update_order_item_quantity(&self, order_item: &mut OrderItem) -> Result<()> {
        if let Some(mut registration) = self.registration_by_order_item(order_item.id).await? {
            let assigned = self
                .registrants
                .for_registration(registration.id)
                .await?
                .iter()
                .filter(|registrant| !registrant.is_stub())
                .count();
            #[allow(clippy::cast_possible_truncation)] // Registrant counts fit in u32
            let assigned = assigned as u32;

            if assigned > 0 {
                order_item.set_quantity(assigned);
                registration.set_registrant_qty(assigned);
            } else {
                order_item.set_quantity(1);
                registration.set_registrant_qty(0);
            }
            self.registrations.update(&registration).await?;
            tracing::info!(
                order_item = %order_item.id,
                registration = %registration.id,
                assigned,
                "reconciled order item quantity with registrant count"
            );
        } else if self.event_for_order_item(order_item).await?.is_some() {
            // Event item whose registration hasn't been generated yet.
            order_item.set_quantity(1);
        }
        Ok(())
    }

    /// Builds a registrant summary per order item.
    ///
    /// Each list holds one display label per registrant with an assigned
    /// id, preferring the linked identity's label over the registrant's
    /// own. Items without a registration, or whose registration has only
    /// stubs, are absent from the result.
    ///
    /// # Errors
    ///
    /// Returns an error if a storage lookup fails.
    pub async fn registrant_lists(
        &self,
        order: &Order,
    ) -> Result<BTreeMap<OrderItemId, RegistrantList>> {
        let mut lists = BTreeMap::new();

        for &item_id in &order.item_ids {
            let Some(registration) = self.registration_by_order_item(item_id).await? else {
                continue;
            };

            let mut labels = Vec::new();
            for registrant in self.registrants.for_registration(registration.id).await? {
                // Skip empty registrants.
                if registrant.is_stub() {
                    continue;
                }
                let label = match &registrant.identity {
                    Some(reference) => match self.registrants.identity(reference).await? {
                        Some(identity) => identity.label,
                        None => registrant.label.clone(),
                    },
                    None => registrant.label.clone(),
                };
                labels.push(label);
            }

            if !labels.is_empty() {
                lists.insert(item_id, RegistrantList::new(labels));
            }
        }

        Ok(lists)
    }

    /// Flattens registrations into one export record per registrant.
    ///
    /// Each record denormalizes the registration with its parent order,
    /// order item, purchased variation, and billing profile. Stub
    /// registrants carry no id and are excluded.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::DanglingReference`] when a reference
    /// the export depends on is missing — these fields must be populated
    /// on every registration created through the order flow. Also returns
    /// an error if a storage lookup fails.
    pub async fn export_records(
        &self,
        registrations: &[Registration],
    ) -> Result<BTreeMap<RegistrantId, RegistrationRecord>> {
        let mut records = BTreeMap::new();

        for registration in registrations {
            let context = || format!("exporting registration {}", registration.id);

            let registration_type = self
                .registrations
                .registration_type(&registration.registration_type)
                .await?
                .ok_or_else(|| RegistrationError::dangling("registration type", context()))?;
            let conference = self
                .catalog
                .product(registration.event)
                .await?
                .ok_or_else(|| RegistrationError::dangling("event product", context()))?;
            let order_item_id = registration
                .order_item
                .ok_or_else(|| RegistrationError::dangling("order item", context()))?;
            let order_item = self
                .orders
                .order_item(order_item_id)
                .await?
                .ok_or_else(|| RegistrationError::dangling("order item", context()))?;
            let order = self
                .orders
                .order(order_item.order_id)
                .await?
                .ok_or_else(|| RegistrationError::dangling("order", context()))?;
            let Some(PurchasedEntity::Variation(variation_id)) = order_item.purchased else {
                return Err(RegistrationError::dangling("product variation", context()));
            };
            let variation = self
                .catalog
                .variation(variation_id)
                .await?
                .ok_or_else(|| RegistrationError::dangling("product variation", context()))?;
            let variation_type = self
                .catalog
                .variation_type(&variation.variation_type)
                .await?
                .ok_or_else(|| RegistrationError::dangling("variation type", context()))?;

            let registrant_company = order
                .billing_profile
                .as_ref()
                .and_then(|profile| profile.organization.clone())
                .unwrap_or_default();

            for registrant in self.registrants.for_registration(registration.id).await? {
                let Some(registrant_id) = registrant.id else {
                    continue;
                };

                let identity = match &registrant.identity {
                    Some(reference) => self.registrants.identity(reference).await?,
                    None => None,
                };
                let (identity_id, identity_type, registrant_label) = match identity {
                    Some(identity) => (Some(identity.id), Some(identity.kind), identity.label),
                    None => (None, None, registrant.label.clone()),
                };

                records.insert(
                    registrant_id,
                    RegistrationRecord {
                        order_id: order.order_number.clone(),
                        order_date: order.created,
                        conference_id: conference.id,
                        conference_name: conference.title.clone(),
                        registration_id: registration.id,
                        registration_type: registration_type.label.clone(),
                        order_item_id,
                        product_variation_id: variation.id,
                        product_variation_title: variation.title.clone(),
                        product_variation_type: variation.variation_type.clone(),
                        product_variation_type_title: variation_type.label.clone(),
                        registrant_company: registrant_company.clone(),
                        registrant_id,
                        registrant_identity_id: identity_id,
                        registrant_identity_type: identity_type,
                        registrant_label,
                    },
                );
            }
        }

        Ok(records)
    }
}

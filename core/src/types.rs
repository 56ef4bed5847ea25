//! Domain types for the commerce/registration bridge.
//!
//! This module defines the typed data model shared by the reconciliation
//! service and the availability gate. Entity references that the storage
//! layer expresses as nullable fields are modelled as `Option`s; references
//! that are required for an entity to make sense at all (a variation's
//! product, a registrant's registration) are required at construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier for an order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(u64);

impl OrderId {
    /// Creates a new `OrderId` from a raw storage id
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw storage id
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an order item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderItemId(u64);

impl OrderItemId {
    /// Creates a new `OrderItemId` from a raw storage id
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw storage id
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a product.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductId(u64);

impl ProductId {
    /// Creates a new `ProductId` from a raw storage id
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw storage id
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a product variation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VariationId(u64);

impl VariationId {
    /// Creates a new `VariationId` from a raw storage id
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw storage id
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for VariationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a registration.
///
/// Ids are assigned by storage in creation order, so sorting by descending
/// id yields most-recently-created first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RegistrationId(u64);

impl RegistrationId {
    /// Creates a new `RegistrationId` from a raw storage id
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw storage id
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a registrant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RegistrantId(u64);

impl RegistrantId {
    /// Creates a new `RegistrantId` from a raw storage id
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw storage id
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RegistrantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an identity (person or organization).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IdentityId(u64);

impl IdentityId {
    /// Creates a new `IdentityId` from a raw storage id
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw storage id
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a customer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CustomerId(u64);

impl CustomerId {
    /// Creates a new `CustomerId` from a raw storage id
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw storage id
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Machine name of a registration type.
///
/// Registration types are configuration, not content, so their ids are
/// human-assigned machine names rather than storage sequence numbers.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegistrationTypeId(String);

impl RegistrationTypeId {
    /// Creates a new `RegistrationTypeId` from a machine name
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the machine name
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegistrationTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Machine name of a product variation type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariationTypeId(String);

impl VariationTypeId {
    /// Creates a new `VariationTypeId` from a machine name
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the machine name
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VariationTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Commerce Entities
// ============================================================================

/// The billing profile attached to an order.
///
/// Only the fields the registration export consumes are carried here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingProfile {
    /// Organization name on the billing address, if any.
    pub organization: Option<String>,
}

impl BillingProfile {
    /// Creates a billing profile with an organization name
    #[must_use]
    pub fn with_organization(organization: impl Into<String>) -> Self {
        Self {
            organization: Some(organization.into()),
        }
    }
}

/// A commerce order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Order identifier.
    pub id: OrderId,
    /// Human-facing order number.
    pub order_number: String,
    /// When the order was created.
    pub created: DateTime<Utc>,
    /// References to the order's items, in cart order.
    pub item_ids: Vec<OrderItemId>,
    /// The customer who placed the order, once known.
    pub customer: Option<CustomerId>,
    /// Billing profile, once checkout has collected one.
    pub billing_profile: Option<BillingProfile>,
}

impl Order {
    /// Creates a new order with the given items
    #[must_use]
    pub fn new(
        id: OrderId,
        order_number: impl Into<String>,
        created: DateTime<Utc>,
        item_ids: Vec<OrderItemId>,
    ) -> Self {
        Self {
            id,
            order_number: order_number.into(),
            created,
            item_ids,
            customer: None,
            billing_profile: None,
        }
    }

    /// Attaches a billing profile
    #[must_use]
    pub fn with_billing_profile(mut self, profile: BillingProfile) -> Self {
        self.billing_profile = Some(profile);
        self
    }

    /// Attaches a customer
    #[must_use]
    pub const fn with_customer(mut self, customer: CustomerId) -> Self {
        self.customer = Some(customer);
        self
    }
}

/// The entity a line item purchases.
///
/// Event resolution only proceeds through the `Variation` arm; anything
/// else a store sells (gift cards, donations) is opaque to this crate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurchasedEntity {
    /// A product variation.
    Variation(VariationId),
    /// Some other purchasable entity type.
    Other {
        /// Entity type id of the purchasable.
        entity_type: String,
        /// Raw storage id of the purchasable.
        id: u64,
    },
}

/// A single line item on an order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Order item identifier.
    pub id: OrderItemId,
    /// The order this item belongs to.
    pub order_id: OrderId,
    /// What was purchased; `None` when the purchasable has been deleted.
    pub purchased: Option<PurchasedEntity>,
    /// Quantity on the line item.
    pub quantity: u32,
}

impl OrderItem {
    /// Creates a new order item
    #[must_use]
    pub const fn new(
        id: OrderItemId,
        order_id: OrderId,
        purchased: Option<PurchasedEntity>,
        quantity: u32,
    ) -> Self {
        Self {
            id,
            order_id,
            purchased,
            quantity,
        }
    }

    /// Sets the line item quantity
    pub const fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }
}

/// A product variation (the sellable form of a product).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariation {
    /// Variation identifier.
    pub id: VariationId,
    /// The product this variation belongs to.
    pub product_id: ProductId,
    /// Display title.
    pub title: String,
    /// The variation type (bundle) this variation was created as.
    pub variation_type: VariationTypeId,
}

impl ProductVariation {
    /// Creates a new product variation
    #[must_use]
    pub fn new(
        id: VariationId,
        product_id: ProductId,
        title: impl Into<String>,
        variation_type: VariationTypeId,
    ) -> Self {
        Self {
            id,
            product_id,
            title: title.into(),
            variation_type,
        }
    }
}

/// A product variation type (bundle) definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariationType {
    /// Machine name of the variation type.
    pub id: VariationTypeId,
    /// Human-facing label.
    pub label: String,
}

/// A product. Whether a product is an event is the event manager's call,
/// not a property of the product itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
}

impl Product {
    /// Creates a new product
    #[must_use]
    pub fn new(id: ProductId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

// ============================================================================
// Event & Registration Entities
// ============================================================================

/// A configured registration type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationType {
    /// Machine name of the registration type.
    pub id: RegistrationTypeId,
    /// Human-facing label.
    pub label: String,
}

impl RegistrationType {
    /// Creates a new registration type
    #[must_use]
    pub fn new(id: RegistrationTypeId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

/// Event settings attached to a product that has been configured as an
/// event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMeta {
    accepting_registrations: bool,
    registration_types: Vec<RegistrationType>,
}

impl EventMeta {
    /// Creates event settings
    #[must_use]
    pub const fn new(
        accepting_registrations: bool,
        registration_types: Vec<RegistrationType>,
    ) -> Self {
        Self {
            accepting_registrations,
            registration_types,
        }
    }

    /// Whether the event currently accepts new registrations.
    #[must_use]
    pub const fn is_accepting_registrations(&self) -> bool {
        self.accepting_registrations
    }

    /// The registration types configured for the event. May be empty, may
    /// hold more than one; registration generation only supports exactly
    /// one.
    #[must_use]
    pub fn registration_types(&self) -> &[RegistrationType] {
        &self.registration_types
    }

    /// Ids of the configured registration types.
    #[must_use]
    pub fn registration_type_ids(&self) -> Vec<RegistrationTypeId> {
        self.registration_types
            .iter()
            .map(|registration_type| registration_type.id.clone())
            .collect()
    }
}

/// A not-yet-persisted registration.
///
/// Storage assigns the id on creation; see
/// [`RegistrationRepository::create`](crate::providers::RegistrationRepository::create).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRegistration {
    /// The single registration type the registration is created as.
    pub registration_type: RegistrationTypeId,
    /// The event product being registered for.
    pub event: ProductId,
    /// Back-reference to the order item that paid for this registration.
    pub order_item: Option<OrderItemId>,
    /// Registrant quantity; starts at zero until registrants are added.
    pub registrant_qty: u32,
}

impl NewRegistration {
    /// Creates a registration draft for an event
    #[must_use]
    pub const fn new(registration_type: RegistrationTypeId, event: ProductId) -> Self {
        Self {
            registration_type,
            event,
            order_item: None,
            registrant_qty: 0,
        }
    }

    /// Attaches the order-item back-reference
    #[must_use]
    pub const fn with_order_item(mut self, order_item: OrderItemId) -> Self {
        self.order_item = Some(order_item);
        self
    }
}

/// A persisted registration: the record tying one order item to one event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    /// Registration identifier.
    pub id: RegistrationId,
    /// The registration type chosen at creation.
    pub registration_type: RegistrationTypeId,
    /// The event product this registration is for.
    pub event: ProductId,
    /// Back-reference to the owning order item. `None` for registrations
    /// created outside the order flow.
    pub order_item: Option<OrderItemId>,
    /// Number of registrants the registration is expected to carry.
    pub registrant_qty: u32,
}

impl Registration {
    /// Sets the registrant quantity
    pub const fn set_registrant_qty(&mut self, quantity: u32) {
        self.registrant_qty = quantity;
    }
}

/// One person/seat within a registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registrant {
    /// Registrant identifier; `None` for a stub (placeholder row that has
    /// not been assigned yet).
    pub id: Option<RegistrantId>,
    /// The registration this registrant belongs to.
    pub registration: RegistrationId,
    /// The identity this registrant is linked to, if any.
    pub identity: Option<IdentityRef>,
    /// The registrant's own display label.
    pub label: String,
}

impl Registrant {
    /// Creates an assigned registrant
    #[must_use]
    pub fn new(
        id: RegistrantId,
        registration: RegistrationId,
        identity: Option<IdentityRef>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id),
            registration,
            identity,
            label: label.into(),
        }
    }

    /// Creates a stub registrant (no id assigned yet)
    #[must_use]
    pub const fn stub(registration: RegistrationId) -> Self {
        Self {
            id: None,
            registration,
            identity: None,
            label: String::new(),
        }
    }

    /// Whether this registrant is a placeholder without an assigned id.
    #[must_use]
    pub const fn is_stub(&self) -> bool {
        self.id.is_none()
    }
}

/// The kind of entity an identity is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityKind {
    /// A person.
    Person,
    /// An organization.
    Organization,
}

impl IdentityKind {
    /// Returns the entity type id string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Organization => "organization",
        }
    }
}

impl fmt::Display for IdentityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A typed reference to an identity entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentityRef {
    /// The kind of identity referenced.
    pub kind: IdentityKind,
    /// The referenced identity's id.
    pub id: IdentityId,
}

/// A person or organization a registrant can be linked to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Identity identifier.
    pub id: IdentityId,
    /// What kind of identity this is.
    pub kind: IdentityKind,
    /// Display label.
    pub label: String,
}

impl Identity {
    /// Creates a new identity
    #[must_use]
    pub fn new(id: IdentityId, kind: IdentityKind, label: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            label: label.into(),
        }
    }

    /// The reference form of this identity.
    #[must_use]
    pub const fn reference(&self) -> IdentityRef {
        IdentityRef {
            kind: self.kind,
            id: self.id,
        }
    }
}

// ============================================================================
// Availability
// ============================================================================

/// Context handed to the availability gate by the order-validation
/// pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityContext {
    /// The customer the check runs for, when known.
    pub customer: Option<CustomerId>,
    /// The time of the check.
    pub time: DateTime<Utc>,
}

impl AvailabilityContext {
    /// Creates a context for an anonymous check
    #[must_use]
    pub const fn anonymous(time: DateTime<Utc>) -> Self {
        Self {
            customer: None,
            time,
        }
    }

    /// Creates a context for a known customer
    #[must_use]
    pub const fn for_customer(customer: CustomerId, time: DateTime<Utc>) -> Self {
        Self {
            customer: Some(customer),
            time,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;

    #[test]
    fn event_meta_type_ids() {
        let meta = EventMeta::new(
            true,
            vec![
                RegistrationType::new(RegistrationTypeId::new("conference"), "Conference"),
                RegistrationType::new(RegistrationTypeId::new("workshop"), "Workshop"),
            ],
        );
        assert!(meta.is_accepting_registrations());
        assert_eq!(
            meta.registration_type_ids(),
            vec![
                RegistrationTypeId::new("conference"),
                RegistrationTypeId::new("workshop"),
            ]
        );
    }

    #[test]
    fn registrant_stub_has_no_id() {
        let stub = Registrant::stub(RegistrationId::new(1));
        assert!(stub.is_stub());
        assert!(stub.identity.is_none());

        let assigned = Registrant::new(
            RegistrantId::new(7),
            RegistrationId::new(1),
            None,
            "Seat 1",
        );
        assert!(!assigned.is_stub());
    }

    #[test]
    fn new_registration_carries_back_reference() {
        let draft = NewRegistration::new(
            RegistrationTypeId::new("conference"),
            ProductId::new(12),
        )
        .with_order_item(OrderItemId::new(34));

        assert_eq!(draft.order_item, Some(OrderItemId::new(34)));
        assert_eq!(draft.registrant_qty, 0);
    }

    #[test]
    fn identity_kind_strings() {
        assert_eq!(IdentityKind::Person.as_str(), "person");
        assert_eq!(IdentityKind::Organization.to_string(), "organization");
    }

    #[test]
    fn registration_ids_order_by_creation() {
        assert!(RegistrationId::new(103) > RegistrationId::new(101));
    }
}

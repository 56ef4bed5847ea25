//! Tests for the event availability gate.
//!
//! `applies` answers "is this an event item at all"; `check` answers "can
//! it be purchased right now". Everything here is read-only.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code

use chrono::{DateTime, TimeZone, Utc};
use commerce_registration_core::error::Result;
use commerce_registration_core::mocks::{
    MockCatalogRepository, MockEventManager, MockOrderRepository, MockRegistrantRepository,
    MockRegistrationRepository,
};
use commerce_registration_core::providers::EligibilityPolicy;
use commerce_registration_core::types::{
    AvailabilityContext, CustomerId, EventMeta, OrderId, OrderItem, OrderItemId, Product,
    ProductId, ProductVariation, PurchasedEntity, RegistrationType, RegistrationTypeId,
    VariationId, VariationTypeId,
};
use commerce_registration_core::{EventAvailabilityChecker, RegistrationData};

// ============================================================================
// Test Helpers
// ============================================================================

struct Fixture {
    events: MockEventManager,
    orders: MockOrderRepository,
    catalog: MockCatalogRepository,
    registrations: MockRegistrationRepository,
    registrants: MockRegistrantRepository,
}

type Service = RegistrationData<
    MockEventManager,
    MockOrderRepository,
    MockCatalogRepository,
    MockRegistrationRepository,
    MockRegistrantRepository,
>;

impl Fixture {
    fn new() -> Self {
        Self {
            events: MockEventManager::new(),
            orders: MockOrderRepository::new(),
            catalog: MockCatalogRepository::new(),
            registrations: MockRegistrationRepository::new(),
            registrants: MockRegistrantRepository::new(),
        }
    }

    fn service(&self) -> Service {
        RegistrationData::new(
            self.events.clone(),
            self.orders.clone(),
            self.catalog.clone(),
            self.registrations.clone(),
            self.registrants.clone(),
        )
    }

    fn checker(
        &self,
    ) -> EventAvailabilityChecker<
        MockEventManager,
        MockOrderRepository,
        MockCatalogRepository,
        MockRegistrationRepository,
        MockRegistrantRepository,
    > {
        EventAvailabilityChecker::allowing_all(self.events.clone(), self.service())
    }

    fn seed_product(&self, product_id: u64, variation_id: u64) -> Product {
        let product = Product::new(ProductId::new(product_id), "Rust Conference 2026");
        self.catalog.insert_product(product.clone());
        self.catalog.insert_variation(ProductVariation::new(
            VariationId::new(variation_id),
            product.id,
            "General admission",
            VariationTypeId::new("event_ticket"),
        ));
        product
    }

    fn event_item(&self, variation_id: u64) -> OrderItem {
        OrderItem::new(
            OrderItemId::new(30),
            OrderId::new(1),
            Some(PurchasedEntity::Variation(VariationId::new(variation_id))),
            1,
        )
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 4, 10, 30, 0).unwrap()
}

fn conference_type() -> RegistrationType {
    RegistrationType::new(RegistrationTypeId::new("conference"), "Conference attendee")
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn does_not_apply_to_non_event_items() {
    let fixture = Fixture::new();
    fixture.seed_product(10, 20); // never flagged as an event
    let checker = fixture.checker();

    assert!(!checker.applies(&fixture.event_item(20)).await.unwrap());

    let no_purchasable = OrderItem::new(OrderItemId::new(31), OrderId::new(1), None, 1);
    assert!(!checker.applies(&no_purchasable).await.unwrap());
}

#[tokio::test]
async fn applies_to_event_items() {
    let fixture = Fixture::new();
    let product = fixture.seed_product(10, 20);
    fixture
        .events
        .insert_event(product.id, EventMeta::new(true, vec![conference_type()]));

    assert!(fixture.checker().applies(&fixture.event_item(20)).await.unwrap());
}

#[tokio::test]
async fn check_is_false_for_non_event_items() {
    let fixture = Fixture::new();
    fixture.seed_product(10, 20);

    let available = fixture
        .checker()
        .check(&fixture.event_item(20), &AvailabilityContext::anonymous(now()))
        .await
        .unwrap();

    assert!(!available);
}

#[tokio::test]
async fn check_is_false_without_event_settings() {
    let fixture = Fixture::new();
    let product = fixture.seed_product(10, 20);
    fixture.events.insert_event_without_meta(product.id);

    let available = fixture
        .checker()
        .check(&fixture.event_item(20), &AvailabilityContext::anonymous(now()))
        .await
        .unwrap();

    assert!(!available);
}

#[tokio::test]
async fn check_is_false_when_registrations_are_closed() {
    let fixture = Fixture::new();
    let product = fixture.seed_product(10, 20);
    fixture
        .events
        .insert_event(product.id, EventMeta::new(false, vec![conference_type()]));

    let available = fixture
        .checker()
        .check(&fixture.event_item(20), &AvailabilityContext::anonymous(now()))
        .await
        .unwrap();

    assert!(!available);
}

#[tokio::test]
async fn check_is_false_with_no_registration_types() {
    let fixture = Fixture::new();
    let product = fixture.seed_product(10, 20);
    fixture
        .events
        .insert_event(product.id, EventMeta::new(true, vec![]));

    let available = fixture
        .checker()
        .check(&fixture.event_item(20), &AvailabilityContext::anonymous(now()))
        .await
        .unwrap();

    assert!(!available);
}

#[tokio::test]
async fn check_is_true_for_an_open_configured_event() {
    let fixture = Fixture::new();
    let product = fixture.seed_product(10, 20);
    fixture
        .events
        .insert_event(product.id, EventMeta::new(true, vec![conference_type()]));

    let available = fixture
        .checker()
        .check(&fixture.event_item(20), &AvailabilityContext::anonymous(now()))
        .await
        .unwrap();

    assert!(available);
}

// ============================================================================
// Eligibility seam
// ============================================================================

/// A policy that only admits one specific customer.
#[derive(Clone)]
struct MembersOnly {
    member: CustomerId,
}

impl EligibilityPolicy for MembersOnly {
    async fn eligible(
        &self,
        context: &AvailabilityContext,
        _event: &Product,
        _meta: &EventMeta,
    ) -> Result<bool> {
        Ok(context.customer == Some(self.member))
    }
}

#[tokio::test]
async fn custom_eligibility_policy_decides_open_events() {
    let fixture = Fixture::new();
    let product = fixture.seed_product(10, 20);
    fixture
        .events
        .insert_event(product.id, EventMeta::new(true, vec![conference_type()]));

    let checker = EventAvailabilityChecker::new(
        fixture.events.clone(),
        fixture.service(),
        MembersOnly {
            member: CustomerId::new(42),
        },
    );
    let item = fixture.event_item(20);

    assert!(checker
        .check(&item, &AvailabilityContext::for_customer(CustomerId::new(42), now()))
        .await
        .unwrap());
    assert!(!checker
        .check(&item, &AvailabilityContext::anonymous(now()))
        .await
        .unwrap());
    assert!(!checker
        .check(&item, &AvailabilityContext::for_customer(CustomerId::new(7), now()))
        .await
        .unwrap());
}

//! Tests for registrant lists and flat export records.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code

use chrono::{DateTime, TimeZone, Utc};
use commerce_registration_core::mocks::{
    MockCatalogRepository, MockEventManager, MockOrderRepository, MockRegistrantRepository,
    MockRegistrationRepository,
};
use commerce_registration_core::report::REGISTRANT_LIST_TITLE;
use commerce_registration_core::types::{
    BillingProfile, Identity, IdentityId, IdentityKind, IdentityRef, Order, OrderId, OrderItem,
    OrderItemId, Product, ProductId, ProductVariation, ProductVariationType, PurchasedEntity,
    Registrant, RegistrantId, Registration, RegistrationId, RegistrationType, RegistrationTypeId,
    VariationId, VariationTypeId,
};
use commerce_registration_core::{RegistrationData, RegistrationError};

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

    /// Seed the whole conference order: catalog, order with billing
    /// profile, one event item, one registration. Returns the order and
    /// the registration.
    fn seed_conference_order(&self) -> (Order, Registration) {
        self.catalog
            .insert_product(Product::new(ProductId::new(10), "Rust Conference 2026"));
        self.catalog.insert_variation(ProductVariation::new(
            VariationId::new(20),
            ProductId::new(10),
            "General admission",
            VariationTypeId::new("event_ticket"),
        ));
        self.catalog.insert_variation_type(ProductVariationType {
            id: VariationTypeId::new("event_ticket"),
            label: "Event ticket".to_string(),
        });
        self.registrations
            .insert_registration_type(RegistrationType::new(
                RegistrationTypeId::new("conference"),
                "Conference attendee",
            ));

        let order = Order::new(
            OrderId::new(1),
            "ORD-1001",
            created_at(),
            vec![OrderItemId::new(30)],
        )
        .with_billing_profile(BillingProfile::with_organization("Ferris Works BV"));
        self.orders.insert_order(order.clone());
        self.orders.insert_order_item(OrderItem::new(
            OrderItemId::new(30),
            OrderId::new(1),
            Some(PurchasedEntity::Variation(VariationId::new(20))),
            2,
        ));

        let registration = Registration {
            id: RegistrationId::new(50),
            registration_type: RegistrationTypeId::new("conference"),
            event: ProductId::new(10),
            order_item: Some(OrderItemId::new(30)),
            registrant_qty: 2,
        };
        self.registrations.insert_registration(registration.clone());

        (order, registration)
    }
}

fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 4, 10, 30, 0).unwrap()
}

// ============================================================================
// Registrant lists
// ============================================================================

#[tokio::test]
async fn registrant_lists_prefer_identity_labels_and_skip_stubs() {
    let fixture = Fixture::new();
    let (order, registration) = fixture.seed_conference_order();

    let ada = Identity::new(IdentityId::new(200), IdentityKind::Person, "Ada Lovelace");
    fixture.registrants.insert_identity(ada.clone());
    fixture.registrants.insert_registrant(Registrant::new(
        RegistrantId::new(100),
        registration.id,
        Some(ada.reference()),
        "registrant 100",
    ));
    // No identity: the registrant's own label is used.
    fixture.registrants.insert_registrant(Registrant::new(
        RegistrantId::new(101),
        registration.id,
        None,
        "Grace Hopper",
    ));
    // Dangling identity reference: falls back to the registrant's label.
    fixture.registrants.insert_registrant(Registrant::new(
        RegistrantId::new(102),
        registration.id,
        Some(IdentityRef {
            kind: IdentityKind::Person,
            id: IdentityId::new(999),
        }),
        "Unlinked registrant",
    ));
    // A stub never shows up.
    fixture
        .registrants
        .insert_registrant(Registrant::stub(registration.id));

    let lists = fixture.service().registrant_lists(&order).await.unwrap();

    let list = lists.get(&OrderItemId::new(30)).expect("list for item 30");
    assert_eq!(list.title, REGISTRANT_LIST_TITLE);
    assert_eq!(
        list.items,
        vec![
            "Ada Lovelace".to_string(),
            "Grace Hopper".to_string(),
            "Unlinked registrant".to_string(),
        ]
    );
}

#[tokio::test]
async fn items_with_only_stub_registrants_get_no_list() {
    let fixture = Fixture::new();
    let (order, registration) = fixture.seed_conference_order();
    fixture
        .registrants
        .insert_registrant(Registrant::stub(registration.id));

    let lists = fixture.service().registrant_lists(&order).await.unwrap();

    assert!(lists.is_empty());
}

// ============================================================================
// Export records
// ============================================================================

#[tokio::test]
async fn export_flattens_one_record_per_registrant() {
    let fixture = Fixture::new();
    let (_order, registration) = fixture.seed_conference_order();

    let ada = Identity::new(IdentityId::new(200), IdentityKind::Person, "Ada Lovelace");
    fixture.registrants.insert_identity(ada.clone());
    fixture.registrants.insert_registrant(Registrant::new(
        RegistrantId::new(100),
        registration.id,
        Some(ada.reference()),
        "registrant 100",
    ));
    fixture.registrants.insert_registrant(Registrant::new(
        RegistrantId::new(101),
        registration.id,
        None,
        "Grace Hopper",
    ));

    let records = fixture
        .service()
        .export_records(&[registration])
        .await
        .unwrap();

    assert_eq!(records.len(), 2);

    let linked = records.get(&RegistrantId::new(100)).expect("record 100");
    assert_eq!(linked.order_id, "ORD-1001");
    assert_eq!(linked.order_date, created_at());
    assert_eq!(linked.conference_id, ProductId::new(10));
    assert_eq!(linked.conference_name, "Rust Conference 2026");
    assert_eq!(linked.registration_id, RegistrationId::new(50));
    assert_eq!(linked.registration_type, "Conference attendee");
    assert_eq!(linked.order_item_id, OrderItemId::new(30));
    assert_eq!(linked.product_variation_id, VariationId::new(20));
    assert_eq!(linked.product_variation_title, "General admission");
    assert_eq!(linked.product_variation_type, VariationTypeId::new("event_ticket"));
    assert_eq!(linked.product_variation_type_title, "Event ticket");
    assert_eq!(linked.registrant_company, "Ferris Works BV");
    assert_eq!(linked.registrant_id, RegistrantId::new(100));
    assert_eq!(linked.registrant_identity_id, Some(IdentityId::new(200)));
    assert_eq!(linked.registrant_identity_type, Some(IdentityKind::Person));
    assert_eq!(linked.registrant_label, "Ada Lovelace");

    let unlinked = records.get(&RegistrantId::new(101)).expect("record 101");
    assert_eq!(unlinked.registrant_identity_id, None);
    assert_eq!(unlinked.registrant_identity_type, None);
    assert_eq!(unlinked.registrant_label, "Grace Hopper");
}

#[tokio::test]
async fn export_company_is_empty_without_billing_profile() {
    let fixture = Fixture::new();
    let (mut order, registration) = fixture.seed_conference_order();
    order.billing_profile = None;
    fixture.orders.insert_order(order);

    fixture.registrants.insert_registrant(Registrant::new(
        RegistrantId::new(100),
        registration.id,
        None,
        "Grace Hopper",
    ));

    let records = fixture
        .service()
        .export_records(&[registration])
        .await
        .unwrap();

    assert_eq!(
        records.get(&RegistrantId::new(100)).expect("record").registrant_company,
        ""
    );
}

#[tokio::test]
async fn export_record_field_names_are_the_contract() {
    let fixture = Fixture::new();
    let (_order, registration) = fixture.seed_conference_order();
    let ada = Identity::new(IdentityId::new(200), IdentityKind::Person, "Ada Lovelace");
    fixture.registrants.insert_identity(ada.clone());
    fixture.registrants.insert_registrant(Registrant::new(
        RegistrantId::new(100),
        registration.id,
        Some(ada.reference()),
        "registrant 100",
    ));

    let records = fixture
        .service()
        .export_records(&[registration])
        .await
        .unwrap();
    let value = serde_json::to_value(records.get(&RegistrantId::new(100)).expect("record"))
        .expect("serializes");

    for field in [
        "order_id",
        "order_date",
        "conference_id",
        "conference_name",
        "registration_id",
        "registration_type",
        "order_item_id",
        "product_variation_id",
        "product_variation_title",
        "product_variation_type",
        "product_variation_type_title",
        "registrant_company",
        "registrant_id",
        "registrant_identity_id",
        "registrant_identity_type",
        "registrant_label",
    ] {
        assert!(value.get(field).is_some(), "missing export field {field}");
    }
    assert_eq!(value["registrant_identity_type"], "person");
}

#[tokio::test]
async fn export_fails_fast_on_dangling_references() {
    let fixture = Fixture::new();
    let (_order, _) = fixture.seed_conference_order();

    // A registration that never got its order-item back-reference.
    let detached = Registration {
        id: RegistrationId::new(60),
        registration_type: RegistrationTypeId::new("conference"),
        event: ProductId::new(10),
        order_item: None,
        registrant_qty: 0,
    };
    fixture.registrations.insert_registration(detached.clone());

    let error = fixture
        .service()
        .export_records(&[detached])
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        RegistrationError::DanglingReference { entity: "order item", .. }
    ));
}

#[tokio::test]
async fn export_fails_fast_on_unknown_registration_type() {
    let fixture = Fixture::new();
    let (_order, mut registration) = fixture.seed_conference_order();
    registration.registration_type = RegistrationTypeId::new("retired_type");
    fixture.registrations.insert_registration(registration.clone());

    let error = fixture
        .service()
        .export_records(&[registration])
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        RegistrationError::DanglingReference { entity: "registration type", .. }
    ));
}

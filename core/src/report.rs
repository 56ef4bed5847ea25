//! Presentation and export shapes.
//!
//! These are the two read models the host application consumes: a titled
//! registrant list per order item for checkout/review screens, and a flat
//! denormalized record per registrant for reporting and export. Field names
//! on [`RegistrationRecord`] are the export contract — downstream
//! spreadsheets key on them.

use crate::types::{
    IdentityId, IdentityKind, OrderItemId, ProductId, RegistrantId, RegistrationId, VariationId,
    VariationTypeId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title shown above each registrant list.
pub const REGISTRANT_LIST_TITLE: &str = "Registrants";

/// A titled list of registrant display labels for one order item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrantList {
    /// List heading.
    pub title: String,
    /// One display label per registrant with an assigned id, in storage
    /// order.
    pub items: Vec<String>,
}

impl RegistrantList {
    /// Creates a registrant list with the standard title
    #[must_use]
    pub fn new(items: Vec<String>) -> Self {
        Self {
            title: REGISTRANT_LIST_TITLE.to_string(),
            items,
        }
    }
}

/// One flat export record per registrant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRecord {
    /// Human-facing order number.
    pub order_id: String,
    /// When the order was created.
    pub order_date: DateTime<Utc>,
    /// The event product's id.
    pub conference_id: ProductId,
    /// The event product's title.
    pub conference_name: String,
    /// The registration's id.
    pub registration_id: RegistrationId,
    /// Label of the registration's type.
    pub registration_type: String,
    /// The owning order item's id.
    pub order_item_id: OrderItemId,
    /// Id of the purchased variation.
    pub product_variation_id: VariationId,
    /// Title of the purchased variation.
    pub product_variation_title: String,
    /// Machine name of the variation's type.
    pub product_variation_type: VariationTypeId,
    /// Label of the variation's type.
    pub product_variation_type_title: String,
    /// Organization from the order's billing profile, or empty.
    pub registrant_company: String,
    /// The registrant's id.
    pub registrant_id: RegistrantId,
    /// Id of the linked identity, if any.
    pub registrant_identity_id: Option<IdentityId>,
    /// Kind of the linked identity, if any.
    pub registrant_identity_type: Option<IdentityKind>,
    /// Identity label when linked, the registrant's own label otherwise.
    pub registrant_label: String,
}

//! # Commerce Registration Core
//!
//! This crate bridges a commerce order pipeline with an event-registration
//! backend: buying a product that represents an event creates a matching
//! registration, order-item quantity stays synchronized with the registrant
//! count, and registrant summaries and export records are produced for the
//! host application to render.
//!
//! ## Architecture
//!
//! Two services over injected collaborator traits:
//!
//! ```text
//! OrderItem ──► PurchasedEntity ──► ProductVariation ──► Product
//!                                                           │
//!                                          EventManager.is_event?
//!                                                           │
//!            ┌──────────────────────────────────────────────┤
//!            ▼                                              ▼
//!   RegistrationData                           EventAvailabilityChecker
//!   - generate registrations per item          - applies: is it an event?
//!   - quantity ⇄ registrant count              - check: open, configured,
//!   - registrant lists, export records                  customer eligible?
//! ```
//!
//! All storage and event-backend access goes through the traits in
//! [`providers`]; [`mocks`] ships in-memory implementations so the whole
//! bridge runs at memory speed in tests.
//!
//! ## Example: generating registrations at checkout
//!
//! ```rust,ignore
//! use commerce_registration_core::RegistrationData;
//!
//! let service = RegistrationData::new(events, orders, catalog, registrations, registrants);
//!
//! // After checkout completes:
//! service.generate_order_registrations(&order).await?;
//!
//! // After a registrant is added or removed:
//! service.update_order_item_quantity(&mut order_item).await?;
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Public modules
pub mod availability;
pub mod error;
pub mod mocks;
pub mod providers;
pub mod registration;
pub mod report;
pub mod types;

// Re-export main types for convenience
pub use availability::EventAvailabilityChecker;
pub use error::{ConfigurationError, RegistrationError, Result};
pub use registration::RegistrationData;
pub use report::{RegistrantList, RegistrationRecord};

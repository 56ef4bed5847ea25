//! Collaborator contracts.
//!
//! This module defines traits for all external dependencies the
//! reconciliation service and availability gate depend on. These traits
//! enable dependency injection and make the bridge logic testable.
//!
//! Providers are **interfaces**, not implementations. The services depend
//! on these traits; the host application wires in concrete implementations
//! backed by its own storage, and [`crate::mocks`] ships in-memory versions
//! for tests.
//!
//! Lookup methods return `Ok(None)` for entities that simply do not exist;
//! `Err` is reserved for the storage collaborator itself failing. Within
//! one request the implementations are expected to provide read-your-writes
//! consistency; no cross-request locking is assumed (see `DESIGN.md` on the
//! registration-creation race).

pub mod catalog;
pub mod eligibility;
pub mod event_manager;
pub mod orders;
pub mod registrants;
pub mod registrations;

// Re-export provider traits
pub use catalog::CatalogRepository;
pub use eligibility::{AlwaysEligible, EligibilityPolicy};
pub use event_manager::EventManager;
pub use orders::OrderRepository;
pub use registrants::RegistrantRepository;
pub use registrations::RegistrationRepository;

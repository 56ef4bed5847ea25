//! Per-customer eligibility policy.

use crate::error::Result;
use crate::types::{AvailabilityContext, EventMeta, Product};

/// Decides whether the customer in the availability context may register
/// for an open event.
///
/// The availability gate consults this only after the structural checks
/// pass (event resolves, metadata present, registrations open, at least one
/// registration type). Host applications plug in their own policy to
/// restrict repeat purchases, membership-only events, and the like.
pub trait EligibilityPolicy: Send + Sync {
    /// Whether the customer may register for the event.
    ///
    /// # Errors
    ///
    /// Returns an error if a backend lookup the policy performs fails.
    async fn eligible(
        &self,
        context: &AvailabilityContext,
        event: &Product,
        meta: &EventMeta,
    ) -> Result<bool>;
}

/// The default policy: every customer may register for any open event.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysEligible;

impl EligibilityPolicy for AlwaysEligible {
    async fn eligible(
        &self,
        _context: &AvailabilityContext,
        _event: &Product,
        _meta: &EventMeta,
    ) -> Result<bool> {
        Ok(true)
    }
}

//! Error types for registration reconciliation and availability checking.

use crate::types::ProductId;
use thiserror::Error;

/// Result type alias for registration operations.
pub type Result<T> = std::result::Result<T, RegistrationError>;

/// An event product is configured in a way registration generation cannot
/// support.
///
/// Configuration errors are content mistakes, not transient conditions:
/// they are never retried, and checkout must surface them to an operator.
/// They are a separate type so callers can decide whether one misconfigured
/// item aborts the whole order or just that item.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The event has no registration types configured at all.
    #[error("event {event} has no registration types configured")]
    NoRegistrationTypes {
        /// The misconfigured event product.
        event: ProductId,
    },

    /// The event has more than one registration type configured; only
    /// single-type events are supported.
    #[error("event {event} has {count} registration types, only single-type events are supported")]
    MultipleRegistrationTypes {
        /// The misconfigured event product.
        event: ProductId,
        /// How many registration types the event carries.
        count: usize,
    },
}

/// Comprehensive error taxonomy for the commerce/registration bridge.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// An event product is misconfigured for registration generation.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// A reference field that must be populated was empty or pointed at a
    /// deleted entity.
    #[error("missing {entity} reference while {context}")]
    DanglingReference {
        /// The kind of entity the reference should have resolved to.
        entity: &'static str,
        /// What the caller was doing when resolution failed.
        context: String,
    },

    /// The storage collaborator failed.
    #[error("storage error: {message}")]
    Storage {
        /// Description of the underlying failure.
        message: String,
    },
}

impl RegistrationError {
    /// Creates a storage error from any displayable failure
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Creates a dangling-reference error
    #[must_use]
    pub fn dangling(entity: &'static str, context: impl Into<String>) -> Self {
        Self::DanglingReference {
            entity,
            context: context.into(),
        }
    }

    /// Whether this error is a content/configuration mistake an operator
    /// has to fix.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

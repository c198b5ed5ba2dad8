//! Public error types for the `condo_resources` module.
//!
//! These errors are safe to expose to presentation code.

use thiserror::Error;
use uuid::Uuid;

use crate::models::{ResourceKind, Status};

/// Errors that can be returned by the `CondoResourcesClientV1`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CondoResourcesError {
    /// No authenticated principal.
    #[error("Not signed in")]
    Unauthorized,

    /// The principal's role may not perform this action.
    #[error("Access denied: {action} on {kind}")]
    Forbidden {
        kind: ResourceKind,
        action: &'static str,
    },

    /// The action is reserved for admins.
    #[error("Access denied: {action} requires an admin")]
    AdminOnly { action: &'static str },

    /// The resource does not exist or is outside the caller's scope.
    #[error("{kind} not found: {id}")]
    NotFound { kind: ResourceKind, id: Uuid },

    /// Missing or malformed input.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The requested status change is not permitted.
    #[error("Transition {from} -> {to} is not allowed for {kind}")]
    InvalidTransition {
        kind: ResourceKind,
        from: Status,
        to: Status,
    },

    /// Another writer changed the resource first.
    #[error("{kind} {id} was modified concurrently")]
    Conflict { kind: ResourceKind, id: Uuid },

    /// The store timed out or was unreachable. Safe to retry.
    #[error("Store unavailable: {message}")]
    Transient { message: String },

    /// Programmer error such as an unregistered kind.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// An unexpected store failure.
    #[error("Internal error")]
    Internal,
}

impl CondoResourcesError {
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn transient(message: impl Into<String>) -> Self {
        Self::Transient {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Only [`Self::Transient`] is worth retrying.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transient { .. })
    }
}

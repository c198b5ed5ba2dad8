use condo_db::DbError;
use condo_resources_sdk::{CondoResourcesError, ResourceKind, Status};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("No authenticated principal")]
    Unauthorized,

    #[error("Role may not {action} {kind}")]
    Forbidden {
        kind: ResourceKind,
        action: &'static str,
    },

    #[error("Only admins may {0}")]
    AdminOnly(&'static str),

    #[error("{kind} not found: {id}")]
    NotFound { kind: ResourceKind, id: Uuid },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Transition {from} -> {to} not allowed for {kind}")]
    InvalidTransition {
        kind: ResourceKind,
        from: Status,
        to: Status,
    },

    #[error("{kind} {id} changed concurrently")]
    Conflict { kind: ResourceKind, id: Uuid },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Store unavailable: {0}")]
    Transient(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn not_found(kind: ResourceKind, id: Uuid) -> Self {
        Self::NotFound { kind, id }
    }

    #[must_use]
    pub fn conflict(kind: ResourceKind, id: Uuid) -> Self {
        Self::Conflict { kind, id }
    }

    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

impl From<DbError> for DomainError {
    fn from(e: DbError) -> Self {
        if e.is_transient() {
            tracing::warn!(error = %e, "transient store failure");
            Self::Transient(e.to_string())
        } else {
            tracing::error!(error = %e, "store failure");
            Self::Internal(e.to_string())
        }
    }
}

/// Convert domain errors to SDK errors for public API consumption.
impl From<DomainError> for CondoResourcesError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Unauthorized => Self::Unauthorized,
            DomainError::Forbidden { kind, action } => Self::Forbidden { kind, action },
            DomainError::AdminOnly(action) => Self::AdminOnly { action },
            DomainError::NotFound { kind, id } => Self::NotFound { kind, id },
            DomainError::Validation { field, message } => {
                Self::validation(format!("{field}: {message}"))
            }
            DomainError::InvalidTransition { kind, from, to } => {
                Self::InvalidTransition { kind, from, to }
            }
            DomainError::Conflict { kind, id } => Self::Conflict { kind, id },
            DomainError::Configuration(message) => Self::configuration(message),
            DomainError::Transient(message) => Self::transient(message),
            DomainError::Internal(_) => Self::Internal,
        }
    }
}

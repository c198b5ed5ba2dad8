use condo_resources_sdk::{ResourceKind, Status};
use time::OffsetDateTime;
use uuid::Uuid;

/// Emitted after every successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceEvent {
    Created {
        kind: ResourceKind,
        id: Uuid,
        at: OffsetDateTime,
    },
    StatusChanged {
        kind: ResourceKind,
        id: Uuid,
        from: Status,
        to: Status,
        at: OffsetDateTime,
    },
}

impl ResourceEvent {
    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Created { kind, .. } | Self::StatusChanged { kind, .. } => *kind,
        }
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        match self {
            Self::Created { id, .. } | Self::StatusChanged { id, .. } => *id,
        }
    }
}

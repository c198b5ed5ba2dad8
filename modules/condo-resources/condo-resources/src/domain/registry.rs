//! Static per-kind declarations: statuses, create roles, transition table.

use std::collections::{BTreeMap, BTreeSet};

use condo_resources_sdk::{ResourceKind, Status};
use condo_security::Role;

use super::error::DomainError;

/// How rows of a kind are tied to a resident.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// Through `unit_id`; a resident owns the rows of their units.
    Unit,
    /// Through `owner_id`; the creating principal owns the row.
    Principal,
}

/// `(role, from) -> to` entries of the transition table.
#[derive(Debug, Clone, Copy)]
pub struct TransitionRule {
    pub role: Role,
    pub from: Status,
    pub to: &'static [Status],
}

#[derive(Debug, Clone)]
pub struct ResourceSchema {
    pub kind: ResourceKind,
    pub statuses: &'static [Status],
    pub default_status: Status,
    pub create_roles: &'static [Role],
    pub required_fields: &'static [&'static str],
    pub ownership: Ownership,
    /// Whether providers can be assigned to (and then see) rows of this kind.
    pub provider_assignable: bool,
    pub transitions: &'static [TransitionRule],
}

impl ResourceSchema {
    #[must_use]
    pub fn has_status(&self, status: Status) -> bool {
        self.statuses.contains(&status)
    }

    #[must_use]
    pub fn can_create(&self, role: Role) -> bool {
        self.create_roles.contains(&role)
    }

    #[must_use]
    pub fn allowed_transitions(&self, role: Role, from: Status) -> BTreeSet<Status> {
        self.transitions
            .iter()
            .filter(|r| r.role == role && r.from == from)
            .flat_map(|r| r.to.iter().copied())
            .collect()
    }

    #[must_use]
    pub fn can_transition(&self, role: Role, from: Status, to: Status) -> bool {
        self.transitions
            .iter()
            .any(|r| r.role == role && r.from == from && r.to.contains(&to))
    }
}

pub const PAYMENT: ResourceSchema = ResourceSchema {
    kind: ResourceKind::Payment,
    statuses: &[Status::Pendiente, Status::Pagado, Status::Vencido],
    default_status: Status::Pendiente,
    create_roles: &[Role::Admin],
    required_fields: &["unit_id", "amount_cents", "due_date"],
    ownership: Ownership::Unit,
    provider_assignable: false,
    transitions: &[
        TransitionRule {
            role: Role::Admin,
            from: Status::Pendiente,
            to: &[Status::Pagado, Status::Vencido],
        },
        TransitionRule {
            role: Role::Admin,
            from: Status::Vencido,
            to: &[Status::Pagado],
        },
        TransitionRule {
            role: Role::Resident,
            from: Status::Pendiente,
            to: &[Status::Pagado],
        },
        TransitionRule {
            role: Role::Resident,
            from: Status::Vencido,
            to: &[Status::Pagado],
        },
    ],
};

pub const RESERVATION: ResourceSchema = ResourceSchema {
    kind: ResourceKind::Reservation,
    statuses: &[Status::Pendiente, Status::Aprobado, Status::Rechazado],
    default_status: Status::Pendiente,
    create_roles: &[Role::Resident],
    required_fields: &["area_id", "start_time", "end_time"],
    ownership: Ownership::Principal,
    provider_assignable: false,
    transitions: &[TransitionRule {
        role: Role::Admin,
        from: Status::Pendiente,
        to: &[Status::Aprobado, Status::Rechazado],
    }],
};

pub const INCIDENT: ResourceSchema = ResourceSchema {
    kind: ResourceKind::Incident,
    statuses: &[Status::Nuevo, Status::EnProgreso, Status::Resuelto],
    default_status: Status::Nuevo,
    create_roles: &[Role::Resident],
    required_fields: &["title", "description"],
    ownership: Ownership::Principal,
    provider_assignable: true,
    transitions: &[
        TransitionRule {
            role: Role::Admin,
            from: Status::Nuevo,
            to: &[Status::EnProgreso],
        },
        TransitionRule {
            role: Role::Admin,
            from: Status::EnProgreso,
            to: &[Status::Resuelto],
        },
        TransitionRule {
            role: Role::Provider,
            from: Status::EnProgreso,
            to: &[Status::Resuelto],
        },
    ],
};

/// Lookup table of registered resource schemas.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    schemas: BTreeMap<ResourceKind, ResourceSchema>,
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::with_schemas([PAYMENT, RESERVATION, INCIDENT])
    }
}

impl SchemaRegistry {
    #[must_use]
    pub fn with_schemas(schemas: impl IntoIterator<Item = ResourceSchema>) -> Self {
        Self {
            schemas: schemas.into_iter().map(|s| (s.kind, s)).collect(),
        }
    }

    /// # Errors
    /// `Configuration` if `kind` has no registered schema.
    pub fn schema(&self, kind: ResourceKind) -> Result<&ResourceSchema, DomainError> {
        self.schemas
            .get(&kind)
            .ok_or_else(|| DomainError::configuration(format!("unregistered resource kind: {kind}")))
    }

    /// Resolve a kind by name.
    ///
    /// # Errors
    /// `Configuration` if the name does not parse or is unregistered.
    pub fn parse_kind(&self, name: &str) -> Result<ResourceKind, DomainError> {
        let kind = name
            .parse::<ResourceKind>()
            .map_err(|e| DomainError::configuration(e.to_string()))?;
        self.schema(kind).map(|s| s.kind)
    }

    /// # Errors
    /// `Configuration` if `kind` is unregistered.
    pub fn allowed_transitions(
        &self,
        kind: ResourceKind,
        role: Role,
        from: Status,
    ) -> Result<BTreeSet<Status>, DomainError> {
        Ok(self.schema(kind)?.allowed_transitions(role, from))
    }

    /// # Errors
    /// `Configuration` if `kind` is unregistered.
    pub fn create_roles(&self, kind: ResourceKind) -> Result<&'static [Role], DomainError> {
        Ok(self.schema(kind)?.create_roles)
    }

    /// # Errors
    /// `Configuration` if `kind` is unregistered.
    pub fn statuses(&self, kind: ResourceKind) -> Result<&'static [Status], DomainError> {
        Ok(self.schema(kind)?.statuses)
    }

    /// # Errors
    /// `Configuration` if `kind` is unregistered.
    pub fn default_status(&self, kind: ResourceKind) -> Result<Status, DomainError> {
        Ok(self.schema(kind)?.default_status)
    }

    /// # Errors
    /// `Configuration` if `kind` is unregistered.
    pub fn required_fields(
        &self,
        kind: ResourceKind,
    ) -> Result<&'static [&'static str], DomainError> {
        Ok(self.schema(kind)?.required_fields)
    }
}

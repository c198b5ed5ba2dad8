use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// The resource types handled by the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Payment,
    Reservation,
    Incident,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [Self::Payment, Self::Reservation, Self::Incident];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Payment => "payment",
            Self::Reservation => "reservation",
            Self::Incident => "incident",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resource kind: '{0}'")]
pub struct ParseKindError(pub String);

impl FromStr for ResourceKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "payment" | "payments" | "pagos" => Ok(Self::Payment),
            "reservation" | "reservations" | "reservas" => Ok(Self::Reservation),
            "incident" | "incidents" | "incidencias" => Ok(Self::Incident),
            _ => Err(ParseKindError(s.to_owned())),
        }
    }
}

/// Lifecycle status of a resource. Wire values match the hosted store.
///
/// Which statuses belong to which [`ResourceKind`] is declared by the
/// module's schema registry, not by this type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Pendiente,
    Pagado,
    Vencido,
    Aprobado,
    Rechazado,
    Nuevo,
    EnProgreso,
    Resuelto,
}

impl Status {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pendiente => "pendiente",
            Self::Pagado => "pagado",
            Self::Vencido => "vencido",
            Self::Aprobado => "aprobado",
            Self::Rechazado => "rechazado",
            Self::Nuevo => "nuevo",
            Self::EnProgreso => "en_progreso",
            Self::Resuelto => "resuelto",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status: '{0}'")]
pub struct ParseStatusError(pub String);

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "pendiente" => Self::Pendiente,
            "pagado" => Self::Pagado,
            "vencido" => Self::Vencido,
            "aprobado" => Self::Aprobado,
            "rechazado" => Self::Rechazado,
            "nuevo" => Self::Nuevo,
            "en_progreso" => Self::EnProgreso,
            "resuelto" => Self::Resuelto,
            other => return Err(ParseStatusError(other.to_owned())),
        })
    }
}

/// What a resource belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum OwnerRef {
    /// Owned through a unit; resolves to the unit's resident.
    Unit(Uuid),
    /// Owned directly by a principal.
    Principal(Uuid),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub unit_id: Uuid,
    pub amount_cents: i64,
    pub due_date: Date,
    pub receipt_url: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub paid_at: Option<OffsetDateTime>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationDetails {
    pub area_id: Uuid,
    pub user_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_time: OffsetDateTime,
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentDetails {
    pub unit_id: Option<Uuid>,
    pub reporter_id: Uuid,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub assigned_provider_id: Option<Uuid>,
    pub resolution_notes: Option<String>,
}

/// Type-specific fields of a [`Resource`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ResourceDetails {
    Payment(PaymentDetails),
    Reservation(ReservationDetails),
    Incident(IncidentDetails),
}

impl ResourceDetails {
    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Payment(_) => ResourceKind::Payment,
            Self::Reservation(_) => ResourceKind::Reservation,
            Self::Incident(_) => ResourceKind::Incident,
        }
    }

    /// The owner implied by the details: payments belong to their unit,
    /// reservations to the requester, incidents to the reporter.
    #[must_use]
    pub fn owner(&self) -> OwnerRef {
        match self {
            Self::Payment(p) => OwnerRef::Unit(p.unit_id),
            Self::Reservation(r) => OwnerRef::Principal(r.user_id),
            Self::Incident(i) => OwnerRef::Principal(i.reporter_id),
        }
    }

    #[must_use]
    pub fn unit_id(&self) -> Option<Uuid> {
        match self {
            Self::Payment(p) => Some(p.unit_id),
            Self::Reservation(_) => None,
            Self::Incident(i) => i.unit_id,
        }
    }

    #[must_use]
    pub fn assigned_provider_id(&self) -> Option<Uuid> {
        match self {
            Self::Incident(i) => i.assigned_provider_id,
            Self::Payment(_) | Self::Reservation(_) => None,
        }
    }
}

/// A payment, reservation or incident.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: Uuid,
    pub kind: ResourceKind,
    pub owner: OwnerRef,
    pub status: Status,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    pub details: ResourceDetails,
}

impl Resource {
    /// Principal that directly owns the resource, if any.
    #[must_use]
    pub fn owner_id(&self) -> Option<Uuid> {
        match self.owner {
            OwnerRef::Principal(id) => Some(id),
            OwnerRef::Unit(_) => None,
        }
    }

    #[must_use]
    pub fn unit_id(&self) -> Option<Uuid> {
        self.details.unit_id()
    }

    #[must_use]
    pub fn assigned_provider_id(&self) -> Option<Uuid> {
        self.details.assigned_provider_id()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPayment {
    pub unit_id: Uuid,
    pub amount_cents: i64,
    pub due_date: Date,
    pub receipt_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReservation {
    pub area_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_time: OffsetDateTime,
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIncident {
    pub unit_id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
}

/// Create payload. The variant must match the kind passed to `create`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NewResource {
    Payment(NewPayment),
    Reservation(NewReservation),
    Incident(NewIncident),
}

impl NewResource {
    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Payment(_) => ResourceKind::Payment,
            Self::Reservation(_) => ResourceKind::Reservation,
            Self::Incident(_) => ResourceKind::Incident,
        }
    }
}

/// Requested status change plus optional side-effect fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRequest {
    pub to: Status,
    /// Provider assigned when an incident moves to `en_progreso`.
    pub assigned_provider_id: Option<Uuid>,
    /// Notes recorded when an incident moves to `resuelto`.
    pub resolution_notes: Option<String>,
}

impl TransitionRequest {
    #[must_use]
    pub fn to(status: Status) -> Self {
        Self {
            to: status,
            assigned_provider_id: None,
            resolution_notes: None,
        }
    }

    #[must_use]
    pub fn assign_provider(mut self, provider_id: Uuid) -> Self {
        self.assigned_provider_id = Some(provider_id);
        self
    }

    #[must_use]
    pub fn resolution_notes(mut self, notes: impl Into<String>) -> Self {
        self.resolution_notes = Some(notes.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: Uuid,
    pub name: String,
    pub resident_id: Option<Uuid>,
    pub monthly_fee_cents: i64,
}

/// Result of a last-request-wins call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Latest<T> {
    /// This call is still the newest for its key.
    Current(T),
    /// A newer call for the same key started; this result was discarded.
    Superseded,
}

impl<T> Latest<T> {
    #[must_use]
    pub fn into_current(self) -> Option<T> {
        match self {
            Self::Current(v) => Some(v),
            Self::Superseded => None,
        }
    }

    #[must_use]
    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded)
    }
}

/// Visual tone for a status badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTone {
    Success,
    Warning,
    Error,
}

/// Incident urgency derived from its age.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Role-gated areas of the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Dashboard,
    Payments,
    Reservations,
    Incidents,
    Providers,
    Votes,
    Admin,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Self::Dashboard,
        Self::Payments,
        Self::Reservations,
        Self::Incidents,
        Self::Providers,
        Self::Votes,
        Self::Admin,
    ];
}

/// Counters shown on the dashboard, computed within the caller's scope.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Only reported to admins.
    pub total_units: Option<u64>,
    pub pending_payments: u64,
    pub active_reservations: u64,
    pub open_incidents: u64,
}

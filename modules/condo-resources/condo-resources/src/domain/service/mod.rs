//! Resource controller: scoped `list`, `create` and `transition`.
//!
//! The controller is generic over the repository so the same rules run
//! against the in-memory store and the SQL store.

use std::sync::Arc;
use std::time::Duration;

use condo_db::with_timeout;
use condo_resources_sdk::{
    IncidentDetails, Latest, NewIncident, NewPayment, NewReservation, NewResource,
    PaymentDetails, ReservationDetails, Resource, ResourceDetails, ResourceKind, Status,
    TransitionRequest, Unit,
};
use condo_security::{AccessScope, Role, SecurityContext};
use time::OffsetDateTime;
use tracing::instrument;
use uuid::Uuid;

use crate::config::CondoResourcesConfig;
use crate::domain::error::DomainError;
use crate::domain::events::ResourceEvent;
use crate::domain::list_coordinator::ListCoordinator;
use crate::domain::ports::EventPublisher;
use crate::domain::registry::SchemaRegistry;
use crate::domain::repo::{ResourceRepository, StatusUpdate, UnitDirectory};
use crate::domain::scope::ScopeResolver;
use crate::domain::single_flight::SingleFlight;

mod dashboard;

pub use dashboard::DashboardService;

#[cfg(test)]
mod tests_concurrency;
#[cfg(test)]
mod tests_scoping;

/// Identity and role of an authenticated context.
///
/// # Errors
/// `Unauthorized` for anonymous contexts.
pub fn require_principal(ctx: &SecurityContext) -> Result<(Uuid, Role), DomainError> {
    ctx.role()
        .map(|role| (ctx.subject_id(), role))
        .ok_or(DomainError::Unauthorized)
}

/// Generic scoped controller for payments, reservations and incidents.
///
/// Every operation resolves the caller's scope first and hands it to the
/// repository, so rows outside the scope are never read or written.
pub struct ResourceController<R: ResourceRepository> {
    repo: Arc<R>,
    units: Arc<dyn UnitDirectory>,
    registry: Arc<SchemaRegistry>,
    scopes: ScopeResolver,
    events: Arc<dyn EventPublisher<ResourceEvent>>,
    in_flight: SingleFlight,
    lists: ListCoordinator,
    store_timeout: Duration,
}

impl<R: ResourceRepository> ResourceController<R> {
    #[must_use]
    pub fn new(
        repo: Arc<R>,
        units: Arc<dyn UnitDirectory>,
        registry: Arc<SchemaRegistry>,
        events: Arc<dyn EventPublisher<ResourceEvent>>,
        config: &CondoResourcesConfig,
    ) -> Self {
        let store_timeout = config.store_timeout();
        Self {
            scopes: ScopeResolver::new(Arc::clone(&registry), Arc::clone(&units), store_timeout),
            repo,
            units,
            registry,
            events,
            in_flight: SingleFlight::new(),
            lists: ListCoordinator::new(),
            store_timeout,
        }
    }

    /// Share the in-flight set with other controllers over the same store.
    #[must_use]
    pub fn with_single_flight(mut self, in_flight: SingleFlight) -> Self {
        self.in_flight = in_flight;
        self
    }

    #[must_use]
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    #[must_use]
    pub fn units(&self) -> &Arc<dyn UnitDirectory> {
        &self.units
    }

    #[must_use]
    pub fn store_timeout(&self) -> Duration {
        self.store_timeout
    }

    /// Resources of `kind` visible to the caller, newest first.
    ///
    /// # Errors
    /// `Unauthorized`, `Configuration`, `Transient` or `Internal`.
    #[instrument(skip(self, ctx), fields(kind = %kind))]
    pub async fn list(
        &self,
        ctx: &SecurityContext,
        kind: ResourceKind,
    ) -> Result<Vec<Resource>, DomainError> {
        let (subject, role) = require_principal(ctx)?;
        let scope = self.scopes.scope_for(kind, subject, role).await?;
        if scope.is_deny_all() {
            tracing::debug!("scope denies all rows");
            return Ok(Vec::new());
        }

        let rows = with_timeout(self.store_timeout, self.repo.list(kind, &scope)).await?;
        tracing::debug!(count = rows.len(), "listed resources");
        Ok(rows)
    }

    /// [`list`](Self::list) whose result is dropped if a newer call for the
    /// same principal and kind started while it was running.
    ///
    /// # Errors
    /// Same as [`list`](Self::list).
    pub async fn list_latest(
        &self,
        ctx: &SecurityContext,
        kind: ResourceKind,
    ) -> Result<Latest<Vec<Resource>>, DomainError> {
        let (subject, _) = require_principal(ctx)?;
        let ticket = self.lists.begin(subject, kind);
        let rows = self.list(ctx, kind).await?;
        if ticket.is_current() {
            Ok(Latest::Current(rows))
        } else {
            tracing::debug!(%kind, "list superseded by a newer request");
            Ok(Latest::Superseded)
        }
    }

    /// Create a resource in its kind's default status.
    ///
    /// # Errors
    /// `Unauthorized`, `Forbidden` for roles outside the kind's create roles,
    /// `Validation` for bad payloads, or a store error.
    #[instrument(skip(self, ctx, fields), fields(kind = %kind))]
    pub async fn create(
        &self,
        ctx: &SecurityContext,
        kind: ResourceKind,
        fields: NewResource,
    ) -> Result<Resource, DomainError> {
        let (subject, role) = require_principal(ctx)?;
        let schema = self.registry.schema(kind)?;
        if !schema.can_create(role) {
            return Err(DomainError::Forbidden {
                kind,
                action: "create",
            });
        }
        if fields.kind() != kind {
            return Err(DomainError::validation(
                "kind",
                format!("payload is a {} but {kind} was requested", fields.kind()),
            ));
        }

        let details = self.build_details(subject, role, fields).await?;
        let now = OffsetDateTime::now_utc();
        let resource = Resource {
            id: Uuid::now_v7(),
            kind,
            owner: details.owner(),
            status: schema.default_status,
            created_at: now,
            updated_at: now,
            details,
        };

        with_timeout(self.store_timeout, self.repo.insert(&resource)).await?;
        tracing::info!(id = %resource.id, status = %resource.status, "resource created");

        self.events.publish(&ResourceEvent::Created {
            kind,
            id: resource.id,
            at: now,
        });
        Ok(resource)
    }

    /// Insert or replace a unit, including its resident assignment.
    ///
    /// # Errors
    /// `Unauthorized` without a principal, `AdminOnly` for other roles,
    /// `Validation` for a blank name or negative fee.
    #[instrument(skip(self, ctx, unit), fields(unit_id = %unit.id))]
    pub async fn put_unit(&self, ctx: &SecurityContext, unit: &Unit) -> Result<(), DomainError> {
        let (_, role) = require_principal(ctx)?;
        if role != Role::Admin {
            tracing::debug!(%role, "unit write rejected");
            return Err(DomainError::AdminOnly("manage units"));
        }
        if unit.name.trim().is_empty() {
            return Err(DomainError::validation("name", "must not be empty"));
        }
        if unit.monthly_fee_cents < 0 {
            return Err(DomainError::validation(
                "monthly_fee_cents",
                "must not be negative",
            ));
        }
        with_timeout(self.store_timeout, self.units.put_unit(unit)).await?;
        tracing::info!("unit stored");
        Ok(())
    }

    /// Move a resource to `request.to`.
    ///
    /// # Errors
    /// `NotFound` if the id is absent or outside the caller's scope,
    /// `InvalidTransition` if the table does not allow the move, `Validation`
    /// for misplaced side-effect fields, `Conflict` if a concurrent writer won.
    #[instrument(skip(self, ctx, request), fields(kind = %kind, id = %id, to = %request.to))]
    pub async fn transition(
        &self,
        ctx: &SecurityContext,
        kind: ResourceKind,
        id: Uuid,
        request: TransitionRequest,
    ) -> Result<Resource, DomainError> {
        let (subject, role) = require_principal(ctx)?;
        let schema = self.registry.schema(kind)?;
        check_side_effect_fields(kind, &request)?;

        let scope = self.scopes.scope_for(kind, subject, role).await?;
        let current = self
            .get_scoped(kind, &scope, id)
            .await?
            .ok_or_else(|| DomainError::not_found(kind, id))?;

        // Claimed only once the row is known to be visible to the caller.
        let Some(_flight) = self.in_flight.try_acquire(id) else {
            tracing::debug!("transition already in flight");
            return Err(DomainError::conflict(kind, id));
        };

        if !schema.can_transition(role, current.status, request.to) {
            tracing::debug!(from = %current.status, %role, "transition rejected");
            return Err(DomainError::InvalidTransition {
                kind,
                from: current.status,
                to: request.to,
            });
        }

        let now = OffsetDateTime::now_utc();
        let details = apply_side_effects(&current.details, &request, now);
        let update = StatusUpdate {
            kind,
            id,
            expected: current.status,
            next: request.to,
            details: details.clone(),
            updated_at: now,
        };

        let applied =
            with_timeout(self.store_timeout, self.repo.update_status(&scope, &update)).await?;
        if !applied {
            tracing::info!(from = %current.status, "lost transition race");
            return Err(DomainError::conflict(kind, id));
        }

        tracing::info!(from = %current.status, "resource transitioned");
        self.events.publish(&ResourceEvent::StatusChanged {
            kind,
            id,
            from: current.status,
            to: request.to,
            at: now,
        });

        Ok(Resource {
            status: request.to,
            updated_at: now,
            details,
            ..current
        })
    }

    async fn get_scoped(
        &self,
        kind: ResourceKind,
        scope: &AccessScope,
        id: Uuid,
    ) -> Result<Option<Resource>, DomainError> {
        if scope.is_deny_all() {
            return Ok(None);
        }
        Ok(with_timeout(self.store_timeout, self.repo.get(kind, scope, id)).await?)
    }

    async fn build_details(
        &self,
        subject: Uuid,
        role: Role,
        fields: NewResource,
    ) -> Result<ResourceDetails, DomainError> {
        match fields {
            NewResource::Payment(p) => self.payment_details(p).await,
            NewResource::Reservation(r) => reservation_details(subject, r),
            NewResource::Incident(i) => self.incident_details(subject, role, i).await,
        }
    }

    async fn payment_details(&self, p: NewPayment) -> Result<ResourceDetails, DomainError> {
        if p.amount_cents <= 0 {
            return Err(DomainError::validation(
                "amount_cents",
                "must be greater than zero",
            ));
        }
        if with_timeout(self.store_timeout, self.units.get_unit(p.unit_id))
            .await?
            .is_none()
        {
            return Err(DomainError::validation(
                "unit_id",
                format!("unit {} does not exist", p.unit_id),
            ));
        }
        Ok(ResourceDetails::Payment(PaymentDetails {
            unit_id: p.unit_id,
            amount_cents: p.amount_cents,
            due_date: p.due_date,
            receipt_url: non_blank(p.receipt_url),
            paid_at: None,
        }))
    }

    async fn incident_details(
        &self,
        subject: Uuid,
        role: Role,
        i: NewIncident,
    ) -> Result<ResourceDetails, DomainError> {
        let title = i.title.trim();
        if title.is_empty() {
            return Err(DomainError::validation("title", "must not be empty"));
        }
        let description = i.description.trim();
        if description.is_empty() {
            return Err(DomainError::validation("description", "must not be empty"));
        }

        if let Some(unit_id) = i.unit_id {
            let unit = with_timeout(self.store_timeout, self.units.get_unit(unit_id)).await?;
            let usable = match (&unit, role) {
                (None, _) => false,
                (Some(u), Role::Resident) => u.resident_id == Some(subject),
                (Some(_), _) => true,
            };
            if !usable {
                return Err(DomainError::validation(
                    "unit_id",
                    format!("unit {unit_id} is not one of your units"),
                ));
            }
        }

        Ok(ResourceDetails::Incident(IncidentDetails {
            unit_id: i.unit_id,
            reporter_id: subject,
            title: title.to_owned(),
            description: description.to_owned(),
            image_url: non_blank(i.image_url),
            assigned_provider_id: None,
            resolution_notes: None,
        }))
    }
}

fn reservation_details(subject: Uuid, r: NewReservation) -> Result<ResourceDetails, DomainError> {
    if r.start_time >= r.end_time {
        return Err(DomainError::validation(
            "end_time",
            "must be after start_time",
        ));
    }
    Ok(ResourceDetails::Reservation(ReservationDetails {
        area_id: r.area_id,
        user_id: subject,
        start_time: r.start_time,
        end_time: r.end_time,
        notes: non_blank(r.notes),
    }))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Side-effect fields are only accepted where they mean something.
fn check_side_effect_fields(
    kind: ResourceKind,
    request: &TransitionRequest,
) -> Result<(), DomainError> {
    if request.assigned_provider_id.is_some()
        && !(kind == ResourceKind::Incident && request.to == Status::EnProgreso)
    {
        return Err(DomainError::validation(
            "assigned_provider_id",
            "only accepted when an incident moves to en_progreso",
        ));
    }
    if request.resolution_notes.is_some()
        && !(kind == ResourceKind::Incident && request.to == Status::Resuelto)
    {
        return Err(DomainError::validation(
            "resolution_notes",
            "only accepted when an incident moves to resuelto",
        ));
    }
    Ok(())
}

fn apply_side_effects(
    details: &ResourceDetails,
    request: &TransitionRequest,
    now: OffsetDateTime,
) -> ResourceDetails {
    let mut details = details.clone();
    match &mut details {
        ResourceDetails::Payment(p) if request.to == Status::Pagado => {
            p.paid_at = Some(now);
        }
        ResourceDetails::Incident(i) => {
            if let Some(provider) = request.assigned_provider_id {
                i.assigned_provider_id = Some(provider);
            }
            if let Some(notes) = &request.resolution_notes {
                i.resolution_notes = Some(notes.clone());
            }
        }
        ResourceDetails::Payment(_) | ResourceDetails::Reservation(_) => {}
    }
    details
}

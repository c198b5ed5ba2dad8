use std::sync::Arc;

use condo_db::with_timeout;
use condo_resources_sdk::{DashboardStats, Resource, ResourceKind, Status};
use condo_security::{Role, SecurityContext};
use tracing::instrument;

use crate::domain::error::DomainError;
use crate::domain::repo::ResourceRepository;

use super::{ResourceController, require_principal};

/// Dashboard counters, computed through the controller so that every count
/// is limited to what the caller could list.
pub struct DashboardService<R: ResourceRepository> {
    controller: Arc<ResourceController<R>>,
}

impl<R: ResourceRepository> DashboardService<R> {
    #[must_use]
    pub fn new(controller: Arc<ResourceController<R>>) -> Self {
        Self { controller }
    }

    /// # Errors
    /// `Unauthorized` without a principal, or any store error from `list`.
    #[instrument(skip(self, ctx))]
    pub async fn stats(&self, ctx: &SecurityContext) -> Result<DashboardStats, DomainError> {
        let (_, role) = require_principal(ctx)?;

        let payments = self.controller.list(ctx, ResourceKind::Payment).await?;
        let reservations = self.controller.list(ctx, ResourceKind::Reservation).await?;
        let incidents = self.controller.list(ctx, ResourceKind::Incident).await?;

        let total_units = if role == Role::Admin {
            let units = self.controller.units();
            Some(with_timeout(self.controller.store_timeout(), units.count_units()).await?)
        } else {
            None
        };

        let stats = DashboardStats {
            total_units,
            pending_payments: count(&payments, |s| s == Status::Pendiente),
            active_reservations: count(&reservations, |s| s == Status::Aprobado),
            open_incidents: count(&incidents, |s| s != Status::Resuelto),
        };
        tracing::debug!(?stats, "dashboard stats computed");
        Ok(stats)
    }
}

fn count(rows: &[Resource], pred: impl Fn(Status) -> bool) -> u64 {
    u64::try_from(rows.iter().filter(|r| pred(r.status)).count()).unwrap_or(u64::MAX)
}

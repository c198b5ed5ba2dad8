//! Derived presentation values: status tones, incident priority, status counts.

use std::collections::BTreeMap;

use condo_resources_sdk::{Priority, Resource, ResourceKind, Status, StatusTone};
use time::OffsetDateTime;

use crate::config::PriorityThresholds;

#[must_use]
pub fn status_tone(kind: ResourceKind, status: Status) -> StatusTone {
    match (kind, status) {
        (ResourceKind::Payment, Status::Pagado)
        | (ResourceKind::Reservation, Status::Aprobado)
        | (ResourceKind::Incident, Status::Resuelto) => StatusTone::Success,
        (ResourceKind::Payment, Status::Vencido)
        | (ResourceKind::Reservation, Status::Rechazado) => StatusTone::Error,
        (ResourceKind::Incident, Status::EnProgreso) => StatusTone::Warning,
        (ResourceKind::Incident, _) => StatusTone::Error,
        _ => StatusTone::Warning,
    }
}

/// Priority from whole days elapsed between `created_at` and `now`.
#[must_use]
pub fn incident_priority(
    created_at: OffsetDateTime,
    now: OffsetDateTime,
    thresholds: PriorityThresholds,
) -> Priority {
    let days = (now - created_at).whole_days();
    if days > thresholds.high_after_days {
        Priority::High
    } else if days > thresholds.medium_after_days {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// Number of resources per status, for the summary cards.
#[must_use]
pub fn status_counts(resources: &[Resource]) -> BTreeMap<Status, usize> {
    let mut counts = BTreeMap::new();
    for r in resources {
        *counts.entry(r.status).or_insert(0) += 1;
    }
    counts
}

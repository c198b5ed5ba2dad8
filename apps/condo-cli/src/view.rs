//! JSON shapes printed by the CLI.

use std::collections::BTreeMap;

use condo_resources::config::PriorityThresholds;
use condo_resources::domain::insights::{incident_priority, status_counts, status_tone};
use condo_resources::{Resource, ResourceKind, Status};
use condo_resources_sdk::{Priority, StatusTone};
use serde::Serialize;
use time::OffsetDateTime;

#[derive(Debug, Serialize)]
pub struct ResourceRow {
    #[serde(flatten)]
    pub resource: Resource,
    pub tone: StatusTone,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl ResourceRow {
    pub fn new(resource: Resource, now: OffsetDateTime, thresholds: PriorityThresholds) -> Self {
        let tone = status_tone(resource.kind, resource.status);
        let open_incident =
            resource.kind == ResourceKind::Incident && resource.status != Status::Resuelto;
        let priority =
            open_incident.then(|| incident_priority(resource.created_at, now, thresholds));
        Self {
            resource,
            tone,
            priority,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusSummary {
    pub total: usize,
    pub by_status: BTreeMap<Status, usize>,
}

impl StatusSummary {
    pub fn of(resources: &[Resource]) -> Self {
        Self {
            total: resources.len(),
            by_status: status_counts(resources),
        }
    }
}

//! Process-local store for tests and demos.

use async_trait::async_trait;
use condo_db::DbError;
use condo_resources_sdk::{Resource, ResourceKind, Unit};
use condo_security::AccessScope;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use sea_orm::DbErr;
use uuid::Uuid;

use crate::domain::repo::{ResourceRepository, StatusUpdate, UnitDirectory};
use crate::domain::scope::in_scope;

/// Both storage ports over concurrent maps. Scopes are evaluated with
/// [`in_scope`], the same predicate the SQL store compiles to `WHERE`.
#[derive(Default)]
pub struct InMemoryStore {
    resources: DashMap<Uuid, Resource>,
    units: DashMap<Uuid, Unit>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Unscoped read, for seeding tools and assertions.
    #[must_use]
    pub fn peek(&self, id: Uuid) -> Option<Resource> {
        self.resources.get(&id).map(|r| r.value().clone())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

#[async_trait]
impl ResourceRepository for InMemoryStore {
    async fn list(
        &self,
        kind: ResourceKind,
        scope: &AccessScope,
    ) -> Result<Vec<Resource>, DbError> {
        let mut rows: Vec<Resource> = self
            .resources
            .iter()
            .filter(|r| r.kind == kind && in_scope(scope, r.value()))
            .map(|r| r.value().clone())
            .collect();
        rows.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(rows)
    }

    async fn get(
        &self,
        kind: ResourceKind,
        scope: &AccessScope,
        id: Uuid,
    ) -> Result<Option<Resource>, DbError> {
        Ok(self
            .resources
            .get(&id)
            .filter(|r| r.kind == kind && in_scope(scope, r.value()))
            .map(|r| r.value().clone()))
    }

    async fn insert(&self, resource: &Resource) -> Result<(), DbError> {
        match self.resources.entry(resource.id) {
            Entry::Occupied(_) => Err(DbError::Sea(DbErr::RecordNotInserted)),
            Entry::Vacant(slot) => {
                slot.insert(resource.clone());
                Ok(())
            }
        }
    }

    async fn update_status(
        &self,
        scope: &AccessScope,
        update: &StatusUpdate,
    ) -> Result<bool, DbError> {
        let Some(mut row) = self.resources.get_mut(&update.id) else {
            return Ok(false);
        };
        if row.kind != update.kind || row.status != update.expected || !in_scope(scope, &row) {
            return Ok(false);
        }
        row.status = update.next;
        row.details = update.details.clone();
        row.updated_at = update.updated_at;
        Ok(true)
    }
}

#[async_trait]
impl UnitDirectory for InMemoryStore {
    async fn units_of_resident(&self, resident_id: Uuid) -> Result<Vec<Uuid>, DbError> {
        let mut ids: Vec<Uuid> = self
            .units
            .iter()
            .filter(|u| u.resident_id == Some(resident_id))
            .map(|u| u.id)
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    async fn get_unit(&self, id: Uuid) -> Result<Option<Unit>, DbError> {
        Ok(self.units.get(&id).map(|u| u.value().clone()))
    }

    async fn count_units(&self) -> Result<u64, DbError> {
        Ok(u64::try_from(self.units.len()).unwrap_or(u64::MAX))
    }

    async fn put_unit(&self, unit: &Unit) -> Result<(), DbError> {
        self.units.insert(unit.id, unit.clone());
        Ok(())
    }
}

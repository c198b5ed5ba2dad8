use async_trait::async_trait;
use condo_db::DbError;
use condo_resources_sdk::{Resource, ResourceDetails, ResourceKind, Status, Unit};
use condo_security::AccessScope;
use time::OffsetDateTime;
use uuid::Uuid;

/// Guarded status change: applied only if the row is still in `expected`
/// and still inside the scope it was read through.
#[derive(Debug, Clone)]
pub struct StatusUpdate {
    pub kind: ResourceKind,
    pub id: Uuid,
    pub expected: Status,
    pub next: Status,
    pub details: ResourceDetails,
    pub updated_at: OffsetDateTime,
}

/// Resource storage.
///
/// Every read and write takes the caller's [`AccessScope`]; implementations
/// must never return or touch rows outside it.
/// Rows outside the scope are reported as absent, never as an error.
#[async_trait]
pub trait ResourceRepository: Send + Sync {
    /// Rows of `kind` inside `scope`, newest `created_at` first, ties by id descending.
    ///
    /// # Errors
    /// [`DbError`] if the query fails.
    async fn list(&self, kind: ResourceKind, scope: &AccessScope)
    -> Result<Vec<Resource>, DbError>;

    /// # Errors
    /// [`DbError`] if the query fails.
    async fn get(
        &self,
        kind: ResourceKind,
        scope: &AccessScope,
        id: Uuid,
    ) -> Result<Option<Resource>, DbError>;

    /// # Errors
    /// [`DbError`] if the row cannot be written, including a duplicate id.
    async fn insert(&self, resource: &Resource) -> Result<(), DbError>;

    /// Conditional write. Returns `false` when the guard did not match.
    ///
    /// # Errors
    /// [`DbError`] if the statement fails.
    async fn update_status(
        &self,
        scope: &AccessScope,
        update: &StatusUpdate,
    ) -> Result<bool, DbError>;
}

/// Unit ownership lookups.
#[async_trait]
pub trait UnitDirectory: Send + Sync {
    /// # Errors
    /// [`DbError`] if the query fails.
    async fn units_of_resident(&self, resident_id: Uuid) -> Result<Vec<Uuid>, DbError>;

    /// # Errors
    /// [`DbError`] if the query fails.
    async fn get_unit(&self, id: Uuid) -> Result<Option<Unit>, DbError>;

    /// # Errors
    /// [`DbError`] if the query fails.
    async fn count_units(&self) -> Result<u64, DbError>;

    /// Insert or replace a unit.
    ///
    /// # Errors
    /// [`DbError`] if the row cannot be written.
    async fn put_unit(&self, unit: &Unit) -> Result<(), DbError>;
}

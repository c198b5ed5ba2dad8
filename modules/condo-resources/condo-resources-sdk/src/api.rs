//! Public API trait for condo resources.
//!
//! Implementations resolve the current principal themselves; callers never
//! pass identity explicitly.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::CondoResourcesError;
use crate::models::{
    DashboardStats, Latest, NewResource, Resource, ResourceKind, TransitionRequest,
};

/// Client used by presentation code for all resource access.
#[async_trait]
pub trait CondoResourcesClientV1: Send + Sync {
    /// Resources of `kind` visible to the current principal, newest first.
    ///
    /// # Errors
    /// `Unauthorized` without a principal; `Transient` when the store is
    /// unavailable after retries.
    async fn list(&self, kind: ResourceKind) -> Result<Vec<Resource>, CondoResourcesError>;

    /// Like [`list`](Self::list), but discards the result when a newer
    /// `list_latest` for the same principal and kind started meanwhile.
    ///
    /// # Errors
    /// Same as [`list`](Self::list).
    async fn list_latest(
        &self,
        kind: ResourceKind,
    ) -> Result<Latest<Vec<Resource>>, CondoResourcesError>;

    /// Create a resource in its default status.
    ///
    /// # Errors
    /// `Forbidden` if the role cannot create `kind`; `Validation` for bad input.
    async fn create(
        &self,
        kind: ResourceKind,
        fields: NewResource,
    ) -> Result<Resource, CondoResourcesError>;

    /// Move a resource to a new status.
    ///
    /// # Errors
    /// `NotFound`, `InvalidTransition`, `Validation` or `Conflict`.
    async fn transition(
        &self,
        kind: ResourceKind,
        id: Uuid,
        request: TransitionRequest,
    ) -> Result<Resource, CondoResourcesError>;

    /// Dashboard counters for the current principal.
    ///
    /// # Errors
    /// Same as [`list`](Self::list).
    async fn stats(&self) -> Result<DashboardStats, CondoResourcesError>;
}

//! Local (in-process) client for condo resources.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use condo_resources_sdk::{
    CondoResourcesClientV1, CondoResourcesError, DashboardStats, Latest, NewResource, Resource,
    ResourceKind, TransitionRequest,
};
use condo_security::{PrincipalSource, SecurityContext};
use uuid::Uuid;

use crate::config::RetryConfig;

use super::error::DomainError;
use super::repo::ResourceRepository;
use super::service::{DashboardService, ResourceController};

/// Client wrapping the controller. The principal is read from the session
/// on every call; no session means an anonymous context.
pub struct CondoResourcesLocalClient<R: ResourceRepository> {
    controller: Arc<ResourceController<R>>,
    dashboard: DashboardService<R>,
    principal: Arc<dyn PrincipalSource>,
    retry: RetryConfig,
}

impl<R: ResourceRepository> CondoResourcesLocalClient<R> {
    #[must_use]
    pub fn new(
        controller: Arc<ResourceController<R>>,
        principal: Arc<dyn PrincipalSource>,
        retry: RetryConfig,
    ) -> Self {
        Self {
            dashboard: DashboardService::new(Arc::clone(&controller)),
            controller,
            principal,
            retry,
        }
    }

    fn ctx(&self) -> SecurityContext {
        self.principal
            .current()
            .unwrap_or_else(SecurityContext::anonymous)
    }

    fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(self.retry.min_delay_ms))
            .with_max_delay(Duration::from_millis(self.retry.max_delay_ms))
            .with_max_times(self.retry.max_times)
            .with_jitter()
    }
}

fn log_and_convert(op: &str, e: DomainError) -> CondoResourcesError {
    tracing::error!(operation = op, error = ?e, "condo_resources call failed");
    e.into()
}

fn is_transient(e: &DomainError) -> bool {
    matches!(e, DomainError::Transient(_))
}

#[async_trait]
impl<R: ResourceRepository + 'static> CondoResourcesClientV1 for CondoResourcesLocalClient<R> {
    async fn list(&self, kind: ResourceKind) -> Result<Vec<Resource>, CondoResourcesError> {
        let ctx = self.ctx();
        (|| async { self.controller.list(&ctx, kind).await })
            .retry(self.backoff())
            .when(is_transient)
            .notify(|e, dur| {
                tracing::warn!(%kind, error = %e, delay = ?dur, "list failed, retrying");
            })
            .await
            .map_err(|e| log_and_convert("list", e))
    }

    async fn list_latest(
        &self,
        kind: ResourceKind,
    ) -> Result<Latest<Vec<Resource>>, CondoResourcesError> {
        let ctx = self.ctx();
        (|| async { self.controller.list_latest(&ctx, kind).await })
            .retry(self.backoff())
            .when(is_transient)
            .notify(|e, dur| {
                tracing::warn!(%kind, error = %e, delay = ?dur, "list failed, retrying");
            })
            .await
            .map_err(|e| log_and_convert("list_latest", e))
    }

    async fn create(
        &self,
        kind: ResourceKind,
        fields: NewResource,
    ) -> Result<Resource, CondoResourcesError> {
        self.controller
            .create(&self.ctx(), kind, fields)
            .await
            .map_err(|e| log_and_convert("create", e))
    }

    async fn transition(
        &self,
        kind: ResourceKind,
        id: Uuid,
        request: TransitionRequest,
    ) -> Result<Resource, CondoResourcesError> {
        self.controller
            .transition(&self.ctx(), kind, id, request)
            .await
            .map_err(|e| log_and_convert("transition", e))
    }

    async fn stats(&self) -> Result<DashboardStats, CondoResourcesError> {
        self.dashboard
            .stats(&self.ctx())
            .await
            .map_err(|e| log_and_convert("stats", e))
    }
}

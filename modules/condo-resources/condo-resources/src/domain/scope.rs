//! Role-based scope resolution.
//!
//! | role | unit-owned kinds | principal-owned kinds |
//! |------|------------------|-----------------------|
//! | admin | allow all | allow all |
//! | resident | `unit_id IN (their units)` | `owner_id = self` |
//! | provider | `assigned_provider_id = self` where assignable, else deny | same |

use std::sync::Arc;
use std::time::Duration;

use condo_db::with_timeout;
use condo_resources_sdk::{Resource, ResourceKind};
use condo_security::{AccessScope, Role, ScopeValue, pep_properties};
use uuid::Uuid;

use super::error::DomainError;
use super::registry::{Ownership, SchemaRegistry};
use super::repo::UnitDirectory;

pub struct ScopeResolver {
    registry: Arc<SchemaRegistry>,
    units: Arc<dyn UnitDirectory>,
    store_timeout: Duration,
}

impl ScopeResolver {
    #[must_use]
    pub fn new(
        registry: Arc<SchemaRegistry>,
        units: Arc<dyn UnitDirectory>,
        store_timeout: Duration,
    ) -> Self {
        Self {
            registry,
            units,
            store_timeout,
        }
    }

    /// Predicate restricting the rows of `kind` that `subject` may read or write.
    ///
    /// # Errors
    /// `Configuration` for an unregistered kind; `Transient`/`Internal` if the
    /// unit lookup fails.
    pub async fn scope_for(
        &self,
        kind: ResourceKind,
        subject: Uuid,
        role: Role,
    ) -> Result<AccessScope, DomainError> {
        let schema = self.registry.schema(kind)?;
        let scope = match role {
            Role::Admin => AccessScope::allow_all(),
            Role::Resident => match schema.ownership {
                Ownership::Principal => AccessScope::for_owner(subject),
                Ownership::Unit => {
                    let units = with_timeout(
                        self.store_timeout,
                        self.units.units_of_resident(subject),
                    )
                    .await?;
                    AccessScope::for_units(units)
                }
            },
            Role::Provider if schema.provider_assignable => {
                AccessScope::for_assigned_provider(subject)
            }
            Role::Provider => AccessScope::deny_all(),
        };
        tracing::debug!(%kind, %role, deny_all = scope.is_deny_all(), "scope resolved");
        Ok(scope)
    }
}

/// Property lookup used to evaluate a scope against an in-memory row.
#[must_use]
pub fn resource_property(resource: &Resource, property: &str) -> Option<ScopeValue> {
    match property {
        pep_properties::RESOURCE_ID => Some(resource.id.into()),
        pep_properties::OWNER_ID => resource.owner_id().map(Into::into),
        pep_properties::UNIT_ID => resource.unit_id().map(Into::into),
        pep_properties::ASSIGNED_PROVIDER_ID => resource.assigned_provider_id().map(Into::into),
        pep_properties::STATUS => Some(resource.status.as_str().into()),
        _ => None,
    }
}

/// Whether `resource` is visible through `scope`.
#[must_use]
pub fn in_scope(scope: &AccessScope, resource: &Resource) -> bool {
    scope.matches(|p| resource_property(resource, p))
}

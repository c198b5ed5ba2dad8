//! Condo Resources Module
//!
//! Role-scoped access to the three kinds of condominium resources:
//! payments, reservations and incidents.
//!
//! ## Architecture
//!
//! ### Contract Layer (`condo-resources-sdk`)
//! - `CondoResourcesClientV1` trait, the only entry point for presentation code
//! - Models: `Resource`, `ResourceDetails`, `NewResource`, `TransitionRequest`, `Unit`
//! - Error type: `CondoResourcesError`
//!
//! ### Domain Layer (`condo_resources::domain`)
//! - `registry` - per-kind statuses, create roles and the transition table
//! - `scope` - role to [`AccessScope`](condo_security::AccessScope) resolution
//! - `service` - the generic controller (`list`, `create`, `transition`) and dashboard
//! - `resync` - broadcast of mutation events to views that re-run `list`
//! - `insights`, `navigation` - status tones, incident priority, section gating
//! - **Rule:** talks to storage only through the `repo` traits
//!
//! ### Infrastructure Layer (`condo_resources::infra`)
//! - `storage::InMemoryStore` - concurrent maps, for tests and demos
//! - `storage::SeaOrmStore` - `SeaORM` entities, migrations and scoped queries
//!
//! ## Wiring
//!
//! [`CondoResources`] assembles a store, a principal source and the
//! configuration into a ready client:
//!
//! ```rust,ignore
//! let session = Arc::new(SessionPrincipal::new());
//! let module = CondoResources::connect("sqlite::memory:", session.clone(), config).await?;
//! session.sign_in(SecurityContext::principal(admin_id, Role::Admin));
//! let payments = module.client().list(ResourceKind::Payment).await?;
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// === PUBLIC API (from SDK) ===
pub use condo_resources_sdk::{
    CondoResourcesClientV1, CondoResourcesError, DashboardStats, Latest, NewIncident, NewPayment,
    NewReservation, NewResource, Resource, ResourceDetails, ResourceKind, Status,
    TransitionRequest, Unit,
};

pub mod config;
pub use config::CondoResourcesConfig;

pub mod module;
pub use module::CondoResources;

// === INTERNAL MODULES ===
// Exposed for integration tests and the CLI; prefer the SDK types.
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;

#[cfg(test)]
mod test_support;

//! Principals, roles and row-level access scopes shared by condo crates.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
pub mod access_scope;
pub mod context;
pub mod role;
pub mod session;

pub use access_scope::{AccessScope, ScopeConstraint, ScopeFilter, ScopeValue, pep_properties};
pub use context::SecurityContext;
pub use role::{ParseRoleError, Role};
pub use session::{PrincipalSource, SessionPrincipal};

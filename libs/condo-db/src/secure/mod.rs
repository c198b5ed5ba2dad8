//! Secure ORM layer for scoped database access.
//!
//! Queries are wrapped in typestate builders: a `SecureSelect<E, Unscoped>`
//! cannot be executed until `.scope_with(&scope)` compiles the
//! [`AccessScope`] into a `WHERE` clause.
//!
//! ```rust,ignore
//! use condo_db::secure::SecureEntityExt;
//!
//! let rows = resource::Entity::find()
//!     .secure()
//!     .scope_with(&scope)
//!     .all(db.conn())
//!     .await?;
//! ```
//!
//! # Policy
//!
//! | Scope | Behavior |
//! |-------|----------|
//! | deny-all (default) | `WHERE false` |
//! | unconstrained | no filtering |
//! | constraints | OR of AND-ed filters |
//! | unknown property | that constraint is dropped (fail-closed) |

mod cond;
mod entity_traits;
mod error;
mod select;
mod update;

pub use cond::build_scope_condition;
pub use entity_traits::ScopableEntity;
pub use error::ScopeError;
pub use select::{Scoped, SecureEntityExt, SecureSelect, Unscoped};
pub use update::{SecureUpdateExt, SecureUpdateMany};

pub use condo_security::{AccessScope, ScopeConstraint, ScopeFilter, ScopeValue, pep_properties};

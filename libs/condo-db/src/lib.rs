//! Database access for condo resources.
//!
//! - [`connect_db`] opens a pooled `SeaORM` connection wrapped in [`Db`].
//! - [`secure`] adds typestate wrappers so queries cannot run before an
//!   [`AccessScope`](condo_security::AccessScope) has been applied.
//! - [`migration_runner`] applies `sea-orm-migration` migrations.
//! - [`with_timeout`] bounds a store call and maps expiry to [`DbError::Timeout`].
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod connect;
mod error;
pub mod migration_runner;
pub mod secure;
mod timeout;

pub use connect::{ConnectOpts, Db, connect_db};
pub use error::DbError;
pub use timeout::with_timeout;

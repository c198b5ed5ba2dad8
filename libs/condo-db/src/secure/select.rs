use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

use super::cond::build_scope_condition;
use super::{AccessScope, ScopableEntity, ScopeError};

/// Typestate marker: query has not yet been scoped and cannot execute.
#[derive(Debug, Clone, Copy)]
pub struct Unscoped;

/// Typestate marker: access scope applied; the query may execute.
#[derive(Debug, Clone, Copy)]
pub struct Scoped;

/// A `SeaORM` `Select` that must be scoped before execution.
#[must_use]
#[derive(Clone, Debug)]
pub struct SecureSelect<E: EntityTrait, S> {
    inner: sea_orm::Select<E>,
    _state: S,
}

/// Extension trait turning a plain `Select` into a [`SecureSelect`].
pub trait SecureEntityExt<E: EntityTrait>: Sized {
    /// You must call `.scope_with()` before executing the query.
    fn secure(self) -> SecureSelect<E, Unscoped>;
}

impl<E> SecureEntityExt<E> for sea_orm::Select<E>
where
    E: EntityTrait,
{
    fn secure(self) -> SecureSelect<E, Unscoped> {
        SecureSelect {
            inner: self,
            _state: Unscoped,
        }
    }
}

impl<E> SecureSelect<E, Unscoped>
where
    E: ScopableEntity + EntityTrait,
    E::Column: ColumnTrait + Copy,
{
    /// Apply the access scope, transitioning to the `Scoped` state.
    pub fn scope_with(self, scope: &AccessScope) -> SecureSelect<E, Scoped> {
        SecureSelect {
            inner: self.inner.filter(build_scope_condition::<E>(scope)),
            _state: Scoped,
        }
    }
}

impl<E> SecureSelect<E, Scoped>
where
    E: EntityTrait,
{
    /// # Errors
    /// Returns `ScopeError::Db` if the database query fails.
    pub async fn all<C: ConnectionTrait>(self, conn: &C) -> Result<Vec<E::Model>, ScopeError> {
        Ok(self.inner.all(conn).await?)
    }

    /// # Errors
    /// Returns `ScopeError::Db` if the database query fails.
    pub async fn one<C: ConnectionTrait>(self, conn: &C) -> Result<Option<E::Model>, ScopeError> {
        Ok(self.inner.one(conn).await?)
    }

    /// # Errors
    /// Returns `ScopeError::Db` if the database query fails.
    pub async fn count<C: ConnectionTrait>(self, conn: &C) -> Result<u64, ScopeError>
    where
        E::Model: sea_orm::FromQueryResult + Send + Sync,
    {
        Ok(self.inner.count(conn).await?)
    }

    /// Narrow the scoped query to a single resource id.
    ///
    /// # Errors
    /// Returns `ScopeError::Invalid` if the entity has no resource column.
    pub fn and_id(self, id: uuid::Uuid) -> Result<Self, ScopeError>
    where
        E: ScopableEntity,
        E::Column: ColumnTrait + Copy,
    {
        let col = E::resource_col().ok_or(ScopeError::Invalid(
            "entity must have a resource_col to use and_id()",
        ))?;
        Ok(self.filter(sea_orm::Condition::all().add(col.eq(id))))
    }

    /// Add a filter. Scope conditions remain in place.
    pub fn filter(mut self, filter: sea_orm::Condition) -> Self {
        self.inner = QueryFilter::filter(self.inner, filter);
        self
    }

    pub fn order_by<C>(mut self, col: C, order: sea_orm::Order) -> Self
    where
        C: sea_orm::IntoSimpleExpr,
    {
        self.inner = QueryOrder::order_by(self.inner, col, order);
        self
    }
}

use std::marker::PhantomData;

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

use super::cond::build_scope_condition;
use super::{AccessScope, ScopableEntity, ScopeError, Scoped, Unscoped};

/// A `SeaORM` `UpdateMany` that must be scoped before execution.
///
/// ```rust,ignore
/// let res = resource::Entity::update_many()
///     .col_expr(Column::Status, Expr::value("pagado"))
///     .secure()
///     .scope_with(&scope)
///     .filter(Condition::all().add(Column::Status.eq("pendiente")))
///     .exec(db.conn())
///     .await?;
/// ```
#[must_use]
#[derive(Clone, Debug)]
pub struct SecureUpdateMany<E: EntityTrait, S> {
    inner: sea_orm::UpdateMany<E>,
    _state: PhantomData<S>,
}

impl<E, S> SecureUpdateMany<E, S>
where
    E: ScopableEntity + EntityTrait,
    E::Column: ColumnTrait + Copy,
{
    pub fn col_expr(mut self, col: E::Column, expr: sea_orm::sea_query::SimpleExpr) -> Self {
        self.inner = self.inner.col_expr(col, expr);
        self
    }

    /// Add a filter. Scope conditions remain in place once applied.
    pub fn filter(mut self, filter: sea_orm::Condition) -> Self {
        self.inner = QueryFilter::filter(self.inner, filter);
        self
    }
}

pub trait SecureUpdateExt<E: EntityTrait>: Sized {
    /// You must call `.scope_with()` before executing.
    fn secure(self) -> SecureUpdateMany<E, Unscoped>;
}

impl<E> SecureUpdateExt<E> for sea_orm::UpdateMany<E>
where
    E: EntityTrait,
{
    fn secure(self) -> SecureUpdateMany<E, Unscoped> {
        SecureUpdateMany {
            inner: self,
            _state: PhantomData,
        }
    }
}

impl<E> SecureUpdateMany<E, Unscoped>
where
    E: ScopableEntity + EntityTrait,
    E::Column: ColumnTrait + Copy,
{
    /// Rows outside `scope` are never touched; a deny-all scope updates nothing.
    pub fn scope_with(self, scope: &AccessScope) -> SecureUpdateMany<E, Scoped> {
        SecureUpdateMany {
            inner: self.inner.filter(build_scope_condition::<E>(scope)),
            _state: PhantomData,
        }
    }
}

impl<E> SecureUpdateMany<E, Scoped>
where
    E: EntityTrait,
{
    /// # Errors
    /// Returns `ScopeError::Db` if the database operation fails.
    pub async fn exec<C: ConnectionTrait>(
        self,
        conn: &C,
    ) -> Result<sea_orm::UpdateResult, ScopeError> {
        Ok(self.inner.exec(conn).await?)
    }
}

use async_trait::async_trait;
use condo_db::secure::{SecureEntityExt, SecureUpdateExt};
use condo_db::{Db, DbError};
use condo_resources_sdk::{Resource, ResourceKind, Unit};
use condo_security::AccessScope;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, Condition, EntityTrait, Order, PaginatorTrait, QueryFilter};
use uuid::Uuid;

use crate::domain::repo::{ResourceRepository, StatusUpdate, UnitDirectory};

use super::entity::resource::{Column as ResourceColumn, Entity as ResourceEntity};
use super::entity::unit::{Column as UnitColumn, Entity as UnitEntity};
use super::mapper::{details_json, to_active, unit_active};

/// `SeaORM` implementation of both storage ports. Every resource query goes
/// through `secure().scope_with(..)`, so the scope becomes part of the SQL.
#[derive(Clone)]
pub struct SeaOrmStore {
    db: Db,
}

impl SeaOrmStore {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    #[must_use]
    pub fn db(&self) -> &Db {
        &self.db
    }
}

fn kind_is(kind: ResourceKind) -> Condition {
    Condition::all().add(ResourceColumn::Kind.eq(kind.as_str()))
}

#[async_trait]
impl ResourceRepository for SeaOrmStore {
    async fn list(
        &self,
        kind: ResourceKind,
        scope: &AccessScope,
    ) -> Result<Vec<Resource>, DbError> {
        let rows = ResourceEntity::find()
            .secure()
            .scope_with(scope)
            .filter(kind_is(kind))
            .order_by(ResourceColumn::CreatedAt, Order::Desc)
            .order_by(ResourceColumn::Id, Order::Desc)
            .all(self.db.conn())
            .await?;

        rows.into_iter()
            .map(|m| Resource::try_from(m).map_err(DbError::from))
            .collect()
    }

    async fn get(
        &self,
        kind: ResourceKind,
        scope: &AccessScope,
        id: Uuid,
    ) -> Result<Option<Resource>, DbError> {
        let found = ResourceEntity::find()
            .secure()
            .scope_with(scope)
            .and_id(id)?
            .filter(kind_is(kind))
            .one(self.db.conn())
            .await?;

        found
            .map(|m| Resource::try_from(m).map_err(DbError::from))
            .transpose()
    }

    async fn insert(&self, resource: &Resource) -> Result<(), DbError> {
        ResourceEntity::insert(to_active(resource)?)
            .exec_without_returning(self.db.conn())
            .await?;
        Ok(())
    }

    async fn update_status(
        &self,
        scope: &AccessScope,
        update: &StatusUpdate,
    ) -> Result<bool, DbError> {
        let result = ResourceEntity::update_many()
            .secure()
            .col_expr(ResourceColumn::Status, Expr::value(update.next.as_str()))
            .col_expr(ResourceColumn::Details, Expr::value(details_json(&update.details)?))
            .col_expr(
                ResourceColumn::AssignedProviderId,
                Expr::value(update.details.assigned_provider_id()),
            )
            .col_expr(ResourceColumn::UpdatedAt, Expr::value(update.updated_at))
            .scope_with(scope)
            .filter(
                kind_is(update.kind)
                    .add(ResourceColumn::Id.eq(update.id))
                    .add(ResourceColumn::Status.eq(update.expected.as_str())),
            )
            .exec(self.db.conn())
            .await?;

        tracing::debug!(id = %update.id, rows = result.rows_affected, "conditional status update");
        Ok(result.rows_affected == 1)
    }
}

#[async_trait]
impl UnitDirectory for SeaOrmStore {
    async fn units_of_resident(&self, resident_id: Uuid) -> Result<Vec<Uuid>, DbError> {
        let units = UnitEntity::find()
            .filter(UnitColumn::ResidentId.eq(resident_id))
            .all(self.db.conn())
            .await?;
        Ok(units.into_iter().map(|u| u.id).collect())
    }

    async fn get_unit(&self, id: Uuid) -> Result<Option<Unit>, DbError> {
        Ok(UnitEntity::find_by_id(id)
            .one(self.db.conn())
            .await?
            .map(Into::into))
    }

    async fn count_units(&self) -> Result<u64, DbError> {
        Ok(UnitEntity::find().count(self.db.conn()).await?)
    }

    async fn put_unit(&self, unit: &Unit) -> Result<(), DbError> {
        UnitEntity::insert(unit_active(unit))
            .on_conflict(
                OnConflict::column(UnitColumn::Id)
                    .update_columns([
                        UnitColumn::Name,
                        UnitColumn::ResidentId,
                        UnitColumn::MonthlyFeeCents,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(self.db.conn())
            .await?;
        Ok(())
    }
}

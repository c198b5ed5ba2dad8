use condo_db::secure::{ScopableEntity, pep_properties};
use sea_orm::entity::prelude::*;
use time::OffsetDateTime;
use uuid::Uuid;

/// One row per payment, reservation or incident. Scope-relevant attributes
/// are real columns; the rest of the kind-specific payload lives in `details`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "resources")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub kind: String,
    pub status: String,
    pub unit_id: Option<Uuid>,
    pub owner_id: Option<Uuid>,
    pub assigned_provider_id: Option<Uuid>,
    pub details: Json,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::unit::Entity",
        from = "Column::UnitId",
        to = "super::unit::Column::Id"
    )]
    Unit,
}

impl Related<super::unit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Unit.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ScopableEntity for Entity {
    fn resource_col() -> Option<Column> {
        Some(Column::Id)
    }

    fn resolve_property(property: &str) -> Option<Column> {
        match property {
            pep_properties::RESOURCE_ID => Some(Column::Id),
            pep_properties::OWNER_ID => Some(Column::OwnerId),
            pep_properties::UNIT_ID => Some(Column::UnitId),
            pep_properties::ASSIGNED_PROVIDER_ID => Some(Column::AssignedProviderId),
            pep_properties::STATUS => Some(Column::Status),
            _ => None,
        }
    }
}

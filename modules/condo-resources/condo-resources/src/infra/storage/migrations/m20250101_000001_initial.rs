//! Units and the shared resources table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Units {
    Table,
    Id,
    Name,
    ResidentId,
    MonthlyFeeCents,
}

#[derive(DeriveIden)]
enum Resources {
    Table,
    Id,
    Kind,
    Status,
    UnitId,
    OwnerId,
    AssignedProviderId,
    Details,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Units::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Units::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Units::Name).string().not_null())
                    .col(ColumnDef::new(Units::ResidentId).uuid().null())
                    .col(
                        ColumnDef::new(Units::MonthlyFeeCents)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_units_resident_id")
                    .table(Units::Table)
                    .col(Units::ResidentId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Resources::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Resources::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Resources::Kind).string().not_null())
                    .col(ColumnDef::new(Resources::Status).string().not_null())
                    .col(ColumnDef::new(Resources::UnitId).uuid().null())
                    .col(ColumnDef::new(Resources::OwnerId).uuid().null())
                    .col(ColumnDef::new(Resources::AssignedProviderId).uuid().null())
                    .col(ColumnDef::new(Resources::Details).json().not_null())
                    .col(
                        ColumnDef::new(Resources::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Resources::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_resources_unit_id")
                            .from(Resources::Table, Resources::UnitId)
                            .to(Units::Table, Units::Id),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, col) in [
            ("idx_resources_unit_id", Resources::UnitId),
            ("idx_resources_owner_id", Resources::OwnerId),
            ("idx_resources_assigned_provider_id", Resources::AssignedProviderId),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Resources::Table)
                        .col(col)
                        .if_not_exists()
                        .to_owned(),
                )
                .await?;
        }

        manager
            .create_index(
                Index::create()
                    .name("idx_resources_kind_created_at")
                    .table(Resources::Table)
                    .col(Resources::Kind)
                    .col(Resources::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Resources::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Units::Table).if_exists().to_owned())
            .await
    }
}

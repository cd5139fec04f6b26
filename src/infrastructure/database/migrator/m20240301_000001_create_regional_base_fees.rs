//! Create regional_base_fees table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RegionalBaseFees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RegionalBaseFees::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RegionalBaseFees::City)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RegionalBaseFees::VehicleType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RegionalBaseFees::Fee)
                            .decimal()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RegionalBaseFees::ValidFrom)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RegionalBaseFees::ValidTo).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(RegionalBaseFees::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RegionalBaseFees::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_regional_base_fees_lookup")
                    .table(RegionalBaseFees::Table)
                    .col(RegionalBaseFees::City)
                    .col(RegionalBaseFees::VehicleType)
                    .col(RegionalBaseFees::ValidFrom)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RegionalBaseFees::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum RegionalBaseFees {
    Table,
    Id,
    City,
    VehicleType,
    Fee,
    ValidFrom,
    ValidTo,
    CreatedAt,
    UpdatedAt,
}

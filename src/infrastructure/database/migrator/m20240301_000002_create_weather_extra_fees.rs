//! Create weather_extra_fees table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WeatherExtraFees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WeatherExtraFees::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WeatherExtraFees::FeeKind)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WeatherExtraFees::VehicleType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(WeatherExtraFees::MinValue).double())
                    .col(ColumnDef::new(WeatherExtraFees::MaxValue).double())
                    .col(ColumnDef::new(WeatherExtraFees::PhenomenonCategory).string())
                    .col(
                        ColumnDef::new(WeatherExtraFees::Fee)
                            .decimal()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WeatherExtraFees::ValidFrom)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(WeatherExtraFees::ValidTo).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(WeatherExtraFees::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WeatherExtraFees::UpdatedAt)
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
                    .name("idx_weather_extra_fees_lookup")
                    .table(WeatherExtraFees::Table)
                    .col(WeatherExtraFees::FeeKind)
                    .col(WeatherExtraFees::VehicleType)
                    .col(WeatherExtraFees::ValidFrom)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WeatherExtraFees::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum WeatherExtraFees {
    Table,
    Id,
    FeeKind,
    VehicleType,
    MinValue,
    MaxValue,
    PhenomenonCategory,
    Fee,
    ValidFrom,
    ValidTo,
    CreatedAt,
    UpdatedAt,
}

//! Create weather_observations table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WeatherObservations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WeatherObservations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WeatherObservations::StationName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WeatherObservations::StationId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(WeatherObservations::AirTemperature).double())
                    .col(ColumnDef::new(WeatherObservations::WindSpeed).double())
                    .col(ColumnDef::new(WeatherObservations::Phenomenon).string())
                    .col(
                        ColumnDef::new(WeatherObservations::ObservedAt)
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
                    .name("idx_weather_observations_station_time")
                    .table(WeatherObservations::Table)
                    .col(WeatherObservations::StationId)
                    .col(WeatherObservations::ObservedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WeatherObservations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum WeatherObservations {
    Table,
    Id,
    StationName,
    StationId,
    AirTemperature,
    WindSpeed,
    Phenomenon,
    ObservedAt,
}

//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_regional_base_fees;
mod m20240301_000002_create_weather_extra_fees;
mod m20240301_000003_create_weather_observations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_regional_base_fees::Migration),
            Box::new(m20240301_000002_create_weather_extra_fees::Migration),
            Box::new(m20240301_000003_create_weather_observations::Migration),
        ]
    }
}

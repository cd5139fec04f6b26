//! SeaORM repository implementations

pub mod base_fee_repository;
pub mod extra_fee_repository;
pub mod repository_provider;
pub mod weather_repository;

pub use base_fee_repository::SeaOrmBaseFeeRepository;
pub use extra_fee_repository::SeaOrmExtraFeeRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use weather_repository::SeaOrmWeatherRepository;

use crate::domain::DomainError;

/// Map a database error into the domain error space.
pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Validation(format!("Database error: {}", e))
}

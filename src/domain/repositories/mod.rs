//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider` — unified access to all per-aggregate repositories
//! - `DomainResult` — standard result type for domain operations

use super::base_fee::BaseFeeRuleRepository;
use super::extra_fee::ExtraFeeRuleRepository;
use super::weather::WeatherObservationRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let rule = repos.base_fees().find_active(city, vehicle, at).await?;
///     let obs = repos.weather().latest(station.wmo_code()).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn base_fees(&self) -> &dyn BaseFeeRuleRepository;
    fn extra_fees(&self) -> &dyn ExtraFeeRuleRepository;
    fn weather(&self) -> &dyn WeatherObservationRepository;
}

//! Base fee rule repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::BaseFeeRule;
use crate::domain::quote::{City, VehicleType};
use crate::domain::DomainResult;

#[async_trait]
pub trait BaseFeeRuleRepository: Send + Sync {
    /// The effective rule for the given dimensions at `at`: among all rules
    /// whose validity interval contains `at`, the one with the greatest
    /// `valid_from`.
    async fn find_active(
        &self,
        city: City,
        vehicle_type: VehicleType,
        at: DateTime<Utc>,
    ) -> DomainResult<Option<BaseFeeRule>>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<BaseFeeRule>>;
    async fn find_all(&self) -> DomainResult<Vec<BaseFeeRule>>;
    async fn save(&self, rule: BaseFeeRule) -> DomainResult<BaseFeeRule>;
    async fn update(&self, rule: BaseFeeRule) -> DomainResult<()>;
    async fn delete(&self, id: i32) -> DomainResult<()>;
}

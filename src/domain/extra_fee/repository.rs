//! Extra fee rule repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::{ExtraFeeRule, FeeKind};
use crate::domain::phenomenon::PhenomenonCategory;
use crate::domain::quote::VehicleType;
use crate::domain::DomainResult;

#[async_trait]
pub trait ExtraFeeRuleRepository: Send + Sync {
    /// The effective numeric rule (AIR_TEMP or WIND_SPEED) whose `[min,max)`
    /// band contains `value` and whose validity interval contains `at`.
    /// Ties resolve to the greatest `valid_from`.
    async fn find_active_for_value(
        &self,
        kind: FeeKind,
        vehicle_type: VehicleType,
        value: f64,
        at: DateTime<Utc>,
    ) -> DomainResult<Option<ExtraFeeRule>>;

    /// The effective PHENOMENON rule for the given category. Ties resolve
    /// to the greatest `valid_from`.
    async fn find_active_for_category(
        &self,
        vehicle_type: VehicleType,
        category: PhenomenonCategory,
        at: DateTime<Utc>,
    ) -> DomainResult<Option<ExtraFeeRule>>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ExtraFeeRule>>;
    async fn find_all(&self) -> DomainResult<Vec<ExtraFeeRule>>;
    async fn save(&self, rule: ExtraFeeRule) -> DomainResult<ExtraFeeRule>;
    async fn update(&self, rule: ExtraFeeRule) -> DomainResult<()>;
    async fn delete(&self, id: i32) -> DomainResult<()>;
}

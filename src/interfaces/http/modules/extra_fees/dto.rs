//! Extra fee rule DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::ExtraFeeRule;

#[derive(Debug, Serialize, ToSchema)]
pub struct ExtraFeeRuleResponse {
    pub id: i32,
    pub fee_kind: String,
    pub vehicle_type: String,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub phenomenon_category: Option<String>,
    pub fee: Decimal,
    pub valid_from: DateTime<Utc>,
    pub valid_to: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ExtraFeeRule> for ExtraFeeRuleResponse {
    fn from(r: ExtraFeeRule) -> Self {
        Self {
            id: r.id,
            fee_kind: r.kind.to_string(),
            vehicle_type: r.vehicle_type.to_string(),
            min_value: r.min_value,
            max_value: r.max_value,
            phenomenon_category: r.phenomenon_category.map(|c| c.to_string()),
            fee: r.fee,
            valid_from: r.valid_from,
            valid_to: r.valid_to,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ExtraFeeRuleRequest {
    /// Fee kind: AIR_TEMP, WIND_SPEED or PHENOMENON
    #[validate(length(min = 1, message = "fee_kind is required"))]
    pub fee_kind: String,
    /// Vehicle type: CAR, SCOOTER or BIKE
    #[validate(length(min = 1, message = "vehicle_type is required"))]
    pub vehicle_type: String,
    /// Lower band bound (inclusive); numeric kinds only
    pub min_value: Option<f64>,
    /// Upper band bound (exclusive); numeric kinds only
    pub max_value: Option<f64>,
    /// Phenomenon category: RAIN, SNOW_SLEET or FORBIDDEN; PHENOMENON kind only
    pub phenomenon_category: Option<String>,
    pub fee: Decimal,
    pub valid_from: DateTime<Utc>,
    pub valid_to: Option<DateTime<Utc>>,
}

//! Base fee rule DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::BaseFeeRule;

#[derive(Debug, Serialize, ToSchema)]
pub struct BaseFeeRuleResponse {
    pub id: i32,
    pub city: String,
    pub vehicle_type: String,
    pub fee: Decimal,
    pub valid_from: DateTime<Utc>,
    pub valid_to: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BaseFeeRule> for BaseFeeRuleResponse {
    fn from(r: BaseFeeRule) -> Self {
        Self {
            id: r.id,
            city: r.city.to_string(),
            vehicle_type: r.vehicle_type.to_string(),
            fee: r.fee,
            valid_from: r.valid_from,
            valid_to: r.valid_to,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BaseFeeRuleRequest {
    /// City: TALLINN, TARTU or PARNU
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
    /// Vehicle type: CAR, SCOOTER or BIKE
    #[validate(length(min = 1, message = "vehicle_type is required"))]
    pub vehicle_type: String,
    pub fee: Decimal,
    pub valid_from: DateTime<Utc>,
    pub valid_to: Option<DateTime<Utc>>,
}

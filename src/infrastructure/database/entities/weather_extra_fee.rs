//! Weather extra fee entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Weather extra fee model - time-versioned surcharge per weather dimension
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "weather_extra_fees")]
pub struct Model {
    /// Unique rule ID
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Fee kind code (AIR_TEMP, WIND_SPEED, PHENOMENON)
    pub fee_kind: String,

    /// Vehicle type code (CAR, SCOOTER, BIKE)
    pub vehicle_type: String,

    /// Lower bound of the measurement band (inclusive); numeric kinds only
    pub min_value: Option<f64>,

    /// Upper bound of the measurement band (exclusive); numeric kinds only
    pub max_value: Option<f64>,

    /// Phenomenon category code; PHENOMENON kind only
    pub phenomenon_category: Option<String>,

    /// Surcharge amount
    pub fee: Decimal,

    /// Start of the validity interval (inclusive)
    pub valid_from: DateTime<Utc>,

    /// End of the validity interval (exclusive); open-ended when absent
    pub valid_to: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

//! Regional base fee entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Regional base fee model - time-versioned base fee per city and vehicle
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "regional_base_fees")]
pub struct Model {
    /// Unique rule ID
    #[sea_orm(primary_key)]
    pub id: i32,

    /// City code (TALLINN, TARTU, PARNU)
    pub city: String,

    /// Vehicle type code (CAR, SCOOTER, BIKE)
    pub vehicle_type: String,

    /// Base fee amount
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

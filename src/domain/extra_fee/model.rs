//! Weather extra fee rule entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::phenomenon::PhenomenonCategory;
use crate::domain::quote::VehicleType;

/// The weather dimension an extra fee rule prices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeeKind {
    AirTemp,
    WindSpeed,
    Phenomenon,
}

impl std::fmt::Display for FeeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AirTemp => write!(f, "AIR_TEMP"),
            Self::WindSpeed => write!(f, "WIND_SPEED"),
            Self::Phenomenon => write!(f, "PHENOMENON"),
        }
    }
}

impl std::str::FromStr for FeeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "AIR_TEMP" => Ok(Self::AirTemp),
            "WIND_SPEED" => Ok(Self::WindSpeed),
            "PHENOMENON" => Ok(Self::Phenomenon),
            other => Err(format!("Unknown fee kind: {}", other)),
        }
    }
}

/// Time-versioned extra fee for one weather dimension and vehicle type.
///
/// Numeric kinds (AIR_TEMP, WIND_SPEED) carry a half-open measurement band
/// `[min_value, max_value)`; PHENOMENON rules carry a category instead.
/// Validity interval semantics match [`crate::domain::BaseFeeRule`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExtraFeeRule {
    pub id: i32,
    pub kind: FeeKind,
    pub vehicle_type: VehicleType,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub phenomenon_category: Option<PhenomenonCategory>,
    pub fee: Decimal,
    pub valid_from: DateTime<Utc>,
    pub valid_to: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ExtraFeeRule {
    pub fn is_active_at(&self, at: DateTime<Utc>) -> bool {
        self.valid_from <= at && self.valid_to.map_or(true, |until| at < until)
    }

    /// Whether a measured value falls inside the rule's `[min, max)` band.
    /// Only meaningful for numeric kinds.
    pub fn band_contains(&self, value: f64) -> bool {
        let lower_ok = self.min_value.map_or(true, |min| value >= min);
        let upper_ok = self.max_value.map_or(true, |max| value < max);
        lower_ok && upper_ok
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.fee <= Decimal::ZERO {
            return Err("fee must be positive".to_string());
        }
        if let Some(valid_to) = self.valid_to {
            if valid_to <= self.valid_from {
                return Err("valid_to must be after valid_from".to_string());
            }
        }
        match self.kind {
            FeeKind::AirTemp | FeeKind::WindSpeed => {
                if self.min_value.is_none() && self.max_value.is_none() {
                    return Err(format!("{} rules require a measurement band", self.kind));
                }
                if let (Some(min), Some(max)) = (self.min_value, self.max_value) {
                    if max <= min {
                        return Err("max_value must be greater than min_value".to_string());
                    }
                }
            }
            FeeKind::Phenomenon => {
                if self.phenomenon_category.is_none() {
                    return Err("PHENOMENON rules require a phenomenon_category".to_string());
                }
            }
        }
        Ok(())
    }
}

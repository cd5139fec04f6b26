//! Delivery fee quote domain types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Supported delivery cities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum City {
    Tallinn,
    Tartu,
    Parnu,
}

impl City {
    pub const ALL: [City; 3] = [City::Tallinn, City::Tartu, City::Parnu];
}

impl std::fmt::Display for City {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tallinn => write!(f, "TALLINN"),
            Self::Tartu => write!(f, "TARTU"),
            Self::Parnu => write!(f, "PARNU"),
        }
    }
}

impl std::str::FromStr for City {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TALLINN" => Ok(Self::Tallinn),
            "TARTU" => Ok(Self::Tartu),
            "PARNU" => Ok(Self::Parnu),
            other => Err(format!("Unknown city: {}", other)),
        }
    }
}

/// Supported vehicle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VehicleType {
    Car,
    Scooter,
    Bike,
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Car => write!(f, "CAR"),
            Self::Scooter => write!(f, "SCOOTER"),
            Self::Bike => write!(f, "BIKE"),
        }
    }
}

impl std::str::FromStr for VehicleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CAR" => Ok(Self::Car),
            "SCOOTER" => Ok(Self::Scooter),
            "BIKE" => Ok(Self::Bike),
            other => Err(format!("Unknown vehicle type: {}", other)),
        }
    }
}

/// A single fee-quote request.
///
/// When `timestamp` is present the quote is evaluated against the
/// observation nearest that instant and the rule set active at it;
/// otherwise the latest stored observation anchors the evaluation.
#[derive(Debug, Clone)]
pub struct QuoteRequest {
    pub city: City,
    pub vehicle_type: VehicleType,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Per-dimension fee components of a quote.
///
/// The quoted total is always the exact decimal sum of the four parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeBreakdown {
    pub base: Decimal,
    pub temperature: Decimal,
    pub wind: Decimal,
    pub phenomenon: Decimal,
}

impl FeeBreakdown {
    pub fn total(&self) -> Decimal {
        self.base + self.temperature + self.wind + self.phenomenon
    }
}

/// Why a quote was refused instead of priced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefusalReason {
    /// No observation stored for the city's station
    WeatherUnavailable,
    /// The restriction rule vetoed the vehicle type
    VehicleForbidden,
}

impl std::fmt::Display for RefusalReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WeatherUnavailable => {
                write!(f, "Weather data not available for the specified city")
            }
            Self::VehicleForbidden => {
                write!(f, "Usage of selected vehicle type is forbidden")
            }
        }
    }
}

/// Outcome of a fee-quote request: priced or refused, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryFeeResult {
    Quoted {
        total: Decimal,
        breakdown: FeeBreakdown,
    },
    Refused(RefusalReason),
}

impl DeliveryFeeResult {
    pub fn quoted(breakdown: FeeBreakdown) -> Self {
        Self::Quoted {
            total: breakdown.total(),
            breakdown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn refusal_messages_are_fixed() {
        assert_eq!(
            RefusalReason::WeatherUnavailable.to_string(),
            "Weather data not available for the specified city"
        );
        assert_eq!(
            RefusalReason::VehicleForbidden.to_string(),
            "Usage of selected vehicle type is forbidden"
        );
    }

    #[test]
    fn total_is_the_exact_sum_of_parts() {
        let breakdown = FeeBreakdown {
            base: dec!(2.5),
            temperature: dec!(0.5),
            wind: dec!(0.5),
            phenomenon: dec!(1.0),
        };
        assert_eq!(breakdown.total(), dec!(4.5));

        match DeliveryFeeResult::quoted(breakdown.clone()) {
            DeliveryFeeResult::Quoted { total, breakdown: b } => {
                assert_eq!(total, breakdown.total());
                assert_eq!(b, breakdown);
            }
            other => panic!("expected quote, got {other:?}"),
        }
    }

    #[test]
    fn enum_codes_round_trip() {
        for city in City::ALL {
            assert_eq!(city.to_string().parse::<City>().unwrap(), city);
        }
        for vehicle in [VehicleType::Car, VehicleType::Scooter, VehicleType::Bike] {
            assert_eq!(vehicle.to_string().parse::<VehicleType>().unwrap(), vehicle);
        }
        assert!("SEGWAY".parse::<VehicleType>().is_err());
        assert!("NARVA".parse::<City>().is_err());
    }
}

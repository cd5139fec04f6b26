//! Delivery fee quote DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::FeeBreakdown;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct QuoteRequestBody {
    /// City: TALLINN, TARTU or PARNU
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
    /// Vehicle type: CAR, SCOOTER or BIKE
    #[validate(length(min = 1, message = "vehicle_type is required"))]
    pub vehicle_type: String,
    /// Optional evaluation instant; latest observation when absent
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FeeBreakdownResponse {
    pub base: Decimal,
    pub temperature: Decimal,
    pub wind: Decimal,
    pub phenomenon: Decimal,
}

impl From<FeeBreakdown> for FeeBreakdownResponse {
    fn from(b: FeeBreakdown) -> Self {
        Self {
            base: b.base,
            temperature: b.temperature,
            wind: b.wind,
            phenomenon: b.phenomenon,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuoteResponse {
    pub fee: Decimal,
    pub breakdown: FeeBreakdownResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn request_body_deserializes_with_optional_timestamp() {
        let body: QuoteRequestBody =
            serde_json::from_str(r#"{"city": "TALLINN", "vehicle_type": "BIKE"}"#).unwrap();
        assert_eq!(body.city, "TALLINN");
        assert_eq!(body.vehicle_type, "BIKE");
        assert!(body.timestamp.is_none());

        let body: QuoteRequestBody = serde_json::from_str(
            r#"{"city": "TARTU", "vehicle_type": "CAR", "timestamp": "2024-03-15T12:00:00Z"}"#,
        )
        .unwrap();
        assert!(body.timestamp.is_some());
    }

    #[test]
    fn quote_response_shape() {
        let response = QuoteResponse {
            fee: dec!(3.5),
            breakdown: FeeBreakdownResponse {
                base: dec!(3.0),
                temperature: dec!(0.5),
                wind: dec!(0.0),
                phenomenon: dec!(0.0),
            },
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["fee"], "3.5");
        assert_eq!(value["breakdown"]["base"], "3.0");
        assert_eq!(value["breakdown"]["temperature"], "0.5");
    }
}

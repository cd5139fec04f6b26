//! Regional base fee rule entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::quote::{City, VehicleType};

/// Time-versioned base fee for a city and vehicle type.
///
/// A rule is active at instant `t` when `valid_from <= t` and either
/// `valid_to` is absent or `t < valid_to` (half-open validity interval).
/// Overlapping intervals are permitted; resolution picks the rule with the
/// greatest `valid_from` among the active ones.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseFeeRule {
    pub id: i32,
    pub city: City,
    pub vehicle_type: VehicleType,
    pub fee: Decimal,
    pub valid_from: DateTime<Utc>,
    pub valid_to: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BaseFeeRule {
    /// Whether the validity interval contains `at`.
    pub fn is_active_at(&self, at: DateTime<Utc>) -> bool {
        self.valid_from <= at && self.valid_to.map_or(true, |until| at < until)
    }

    /// Model invariants: positive fee, and `valid_to` strictly after
    /// `valid_from` when present.
    pub fn validate(&self) -> Result<(), String> {
        if self.fee <= Decimal::ZERO {
            return Err("fee must be positive".to_string());
        }
        if let Some(valid_to) = self.valid_to {
            if valid_to <= self.valid_from {
                return Err("valid_to must be after valid_from".to_string());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn rule(valid_from: DateTime<Utc>, valid_to: Option<DateTime<Utc>>) -> BaseFeeRule {
        BaseFeeRule {
            id: 1,
            city: City::Tallinn,
            vehicle_type: VehicleType::Bike,
            fee: dec!(3.0),
            valid_from,
            valid_to,
            created_at: valid_from,
            updated_at: valid_from,
        }
    }

    #[test]
    fn open_ended_rule_is_active_after_start() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let r = rule(start, None);

        assert!(!r.is_active_at(start - chrono::Duration::seconds(1)));
        assert!(r.is_active_at(start));
        assert!(r.is_active_at(start + chrono::Duration::days(365)));
    }

    #[test]
    fn validity_interval_is_half_open() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
        let r = rule(start, Some(end));

        assert!(r.is_active_at(start));
        assert!(r.is_active_at(end - chrono::Duration::seconds(1)));
        assert!(!r.is_active_at(end));
    }

    #[test]
    fn validate_rejects_inverted_interval_and_non_positive_fee() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();

        let mut r = rule(start, Some(start));
        assert!(r.validate().is_err());

        r.valid_to = None;
        r.fee = Decimal::ZERO;
        assert!(r.validate().is_err());

        r.fee = dec!(2.5);
        assert!(r.validate().is_ok());
    }
}

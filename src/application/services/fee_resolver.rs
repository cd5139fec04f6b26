//! Fee resolution engine
//!
//! Resolves the effective base fee and each weather extra fee at a given
//! evaluation instant. Every dimension follows the same shape: consult the
//! rule store for the active rule (most-recently-started wins when validity
//! intervals overlap), fall back to the static default tables otherwise.
//! Vehicle gating is applied before any lookup, and the restriction rule
//! that can veto a vehicle entirely lives here as well.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::domain::{
    BaseFeeRuleRepository, City, DomainResult, ExtraFeeRuleRepository, FeeKind,
    PhenomenonCategory, PhenomenonClassifier, RepositoryProvider, VehicleType,
};

/// Process-wide memo of the default base-fee table.
///
/// Defaults are memoized per city; any rule write clears the whole memo via
/// [`invalidate`](DefaultBaseFeeCache::invalidate). A reader seeing a
/// cleared memo recomputes from the static table, never from the rule
/// store, so concurrent clears and reads need no ordering beyond the map's
/// own.
pub struct DefaultBaseFeeCache {
    per_city: DashMap<City, HashMap<VehicleType, Decimal>>,
}

impl DefaultBaseFeeCache {
    pub fn new() -> Self {
        Self {
            per_city: DashMap::new(),
        }
    }

    pub fn get(&self, city: City, vehicle_type: VehicleType) -> Decimal {
        if let Some(fees) = self.per_city.get(&city) {
            if let Some(fee) = fees.get(&vehicle_type) {
                return *fee;
            }
        }

        let table = default_base_fee_table(city);
        let fee = table[&vehicle_type];
        self.per_city.insert(city, table);
        fee
    }

    /// Drop every memoized entry. Called by the rule-write boundary.
    pub fn invalidate(&self) {
        self.per_city.clear();
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.per_city.is_empty()
    }
}

impl Default for DefaultBaseFeeCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Static default base fees by city and vehicle type.
fn default_base_fee_table(city: City) -> HashMap<VehicleType, Decimal> {
    let (car, scooter, bike) = match city {
        City::Tallinn => (dec!(4.0), dec!(3.5), dec!(3.0)),
        City::Tartu => (dec!(3.5), dec!(3.0), dec!(2.5)),
        City::Parnu => (dec!(3.0), dec!(2.5), dec!(2.0)),
    };

    HashMap::from([
        (VehicleType::Car, car),
        (VehicleType::Scooter, scooter),
        (VehicleType::Bike, bike),
    ])
}

/// Resolves fees from the time-versioned rule store with static defaults.
pub struct FeeResolver {
    repos: Arc<dyn RepositoryProvider>,
    classifier: PhenomenonClassifier,
    default_base_fees: DefaultBaseFeeCache,
}

impl FeeResolver {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self {
            repos,
            classifier: PhenomenonClassifier::new(),
            default_base_fees: DefaultBaseFeeCache::new(),
        }
    }

    /// Clear the default-fee memo. Must be called after every rule write.
    pub fn invalidate_defaults(&self) {
        self.default_base_fees.invalidate();
    }

    /// Effective base fee for a city and vehicle type at `at`.
    pub async fn resolve_base_fee(
        &self,
        city: City,
        vehicle_type: VehicleType,
        at: DateTime<Utc>,
    ) -> DomainResult<Decimal> {
        if let Some(rule) = self.repos.base_fees().find_active(city, vehicle_type, at).await? {
            debug!(rule_id = rule.id, %city, %vehicle_type, "Base fee from stored rule");
            return Ok(rule.fee);
        }

        Ok(self.default_base_fees.get(city, vehicle_type))
    }

    /// Air temperature extra fee. Never applied to cars; a missing
    /// measurement costs nothing.
    pub async fn resolve_air_temperature_fee(
        &self,
        vehicle_type: VehicleType,
        temperature: Option<f64>,
        at: DateTime<Utc>,
    ) -> DomainResult<Decimal> {
        if vehicle_type == VehicleType::Car {
            return Ok(Decimal::ZERO);
        }
        let Some(temperature) = temperature else {
            return Ok(Decimal::ZERO);
        };

        if let Some(rule) = self
            .repos
            .extra_fees()
            .find_active_for_value(FeeKind::AirTemp, vehicle_type, temperature, at)
            .await?
        {
            debug!(rule_id = rule.id, temperature, "Air temperature fee from stored rule");
            return Ok(rule.fee);
        }

        Ok(if temperature < -10.0 {
            dec!(1.0)
        } else if temperature < 0.0 {
            dec!(0.5)
        } else {
            Decimal::ZERO
        })
    }

    /// Wind speed extra fee. Applied only to bikes.
    ///
    /// The default band is inclusive on both ends ([10, 20]) while stored
    /// rules use half-open [min, max) bands; the mismatch is deliberate and
    /// pinned by tests.
    pub async fn resolve_wind_speed_fee(
        &self,
        vehicle_type: VehicleType,
        wind_speed: Option<f64>,
        at: DateTime<Utc>,
    ) -> DomainResult<Decimal> {
        if vehicle_type != VehicleType::Bike {
            return Ok(Decimal::ZERO);
        }
        let Some(wind_speed) = wind_speed else {
            return Ok(Decimal::ZERO);
        };

        if let Some(rule) = self
            .repos
            .extra_fees()
            .find_active_for_value(FeeKind::WindSpeed, vehicle_type, wind_speed, at)
            .await?
        {
            debug!(rule_id = rule.id, wind_speed, "Wind speed fee from stored rule");
            return Ok(rule.fee);
        }

        Ok(if (10.0..=20.0).contains(&wind_speed) {
            dec!(0.5)
        } else {
            Decimal::ZERO
        })
    }

    /// Phenomenon extra fee. Never applied to cars; absent or empty text
    /// skips classification entirely.
    pub async fn resolve_phenomenon_fee(
        &self,
        vehicle_type: VehicleType,
        phenomenon: Option<&str>,
        at: DateTime<Utc>,
    ) -> DomainResult<Decimal> {
        if vehicle_type == VehicleType::Car {
            return Ok(Decimal::ZERO);
        }
        let Some(text) = phenomenon.filter(|t| !t.is_empty()) else {
            return Ok(Decimal::ZERO);
        };

        let category = self.classifier.classify(text);
        if category == PhenomenonCategory::None {
            return Ok(Decimal::ZERO);
        }

        if let Some(rule) = self
            .repos
            .extra_fees()
            .find_active_for_category(vehicle_type, category, at)
            .await?
        {
            debug!(rule_id = rule.id, %category, "Phenomenon fee from stored rule");
            return Ok(rule.fee);
        }

        Ok(match category {
            PhenomenonCategory::SnowSleet => dec!(1.0),
            PhenomenonCategory::Rain => dec!(0.5),
            _ => Decimal::ZERO,
        })
    }

    /// The restriction rule: can this vehicle be used in this weather?
    ///
    /// - BIKE is forbidden above 20 m/s wind (strictly above; a missing
    ///   measurement never forbids)
    /// - BIKE and SCOOTER are forbidden under FORBIDDEN phenomena
    /// - CAR is never forbidden
    pub fn is_vehicle_forbidden(
        &self,
        vehicle_type: VehicleType,
        wind_speed: Option<f64>,
        phenomenon: Option<&str>,
    ) -> bool {
        if vehicle_type == VehicleType::Car {
            return false;
        }

        if vehicle_type == VehicleType::Bike && wind_speed.is_some_and(|w| w > 20.0) {
            return true;
        }

        phenomenon
            .filter(|t| !t.is_empty())
            .is_some_and(|text| self.classifier.classify(text) == PhenomenonCategory::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::domain::{BaseFeeRule, ExtraFeeRule};
    use crate::infrastructure::storage::memory::InMemoryRepositoryProvider;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    fn resolver_with(repos: Arc<InMemoryRepositoryProvider>) -> FeeResolver {
        FeeResolver::new(repos)
    }

    fn base_rule(
        id: i32,
        fee: Decimal,
        valid_from: DateTime<Utc>,
        valid_to: Option<DateTime<Utc>>,
    ) -> BaseFeeRule {
        BaseFeeRule {
            id,
            city: City::Tallinn,
            vehicle_type: VehicleType::Bike,
            fee,
            valid_from,
            valid_to,
            created_at: valid_from,
            updated_at: valid_from,
        }
    }

    #[tokio::test]
    async fn base_fee_defaults_match_the_table() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let resolver = resolver_with(repos);

        let expected = [
            (City::Tallinn, VehicleType::Car, dec!(4.0)),
            (City::Tallinn, VehicleType::Scooter, dec!(3.5)),
            (City::Tallinn, VehicleType::Bike, dec!(3.0)),
            (City::Tartu, VehicleType::Car, dec!(3.5)),
            (City::Tartu, VehicleType::Scooter, dec!(3.0)),
            (City::Tartu, VehicleType::Bike, dec!(2.5)),
            (City::Parnu, VehicleType::Car, dec!(3.0)),
            (City::Parnu, VehicleType::Scooter, dec!(2.5)),
            (City::Parnu, VehicleType::Bike, dec!(2.0)),
        ];

        for (city, vehicle, fee) in expected {
            assert_eq!(
                resolver.resolve_base_fee(city, vehicle, at()).await.unwrap(),
                fee,
                "{city}/{vehicle}"
            );
        }
    }

    #[tokio::test]
    async fn stored_rule_beats_default() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        repos
            .base_fees()
            .save(base_rule(0, dec!(5.5), start, None))
            .await
            .unwrap();
        let resolver = resolver_with(repos);

        let fee = resolver
            .resolve_base_fee(City::Tallinn, VehicleType::Bike, at())
            .await
            .unwrap();
        assert_eq!(fee, dec!(5.5));
    }

    #[tokio::test]
    async fn expired_and_future_rules_fall_back_to_default() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let jan = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let feb = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let june = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        // Expired in February, and one not starting until June
        repos
            .base_fees()
            .save(base_rule(0, dec!(9.0), jan, Some(feb)))
            .await
            .unwrap();
        repos
            .base_fees()
            .save(base_rule(0, dec!(8.0), june, None))
            .await
            .unwrap();
        let resolver = resolver_with(repos);

        let fee = resolver
            .resolve_base_fee(City::Tallinn, VehicleType::Bike, at())
            .await
            .unwrap();
        assert_eq!(fee, dec!(3.0));
    }

    #[tokio::test]
    async fn overlapping_rules_resolve_to_most_recently_started() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let jan = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mar = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();

        repos
            .base_fees()
            .save(base_rule(0, dec!(6.0), jan, None))
            .await
            .unwrap();
        repos
            .base_fees()
            .save(base_rule(0, dec!(7.0), mar, None))
            .await
            .unwrap();
        let resolver = resolver_with(repos);

        let fee = resolver
            .resolve_base_fee(City::Tallinn, VehicleType::Bike, at())
            .await
            .unwrap();
        assert_eq!(fee, dec!(7.0));
    }

    #[tokio::test]
    async fn air_temperature_default_bands() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let resolver = resolver_with(repos);

        let cases = [
            (Some(-15.0), dec!(1.0)),
            (Some(-10.1), dec!(1.0)),
            (Some(-10.0), dec!(0.5)),
            (Some(-0.1), dec!(0.5)),
            (Some(0.0), Decimal::ZERO),
            (Some(12.3), Decimal::ZERO),
            (None, Decimal::ZERO),
        ];

        for (temperature, expected) in cases {
            let fee = resolver
                .resolve_air_temperature_fee(VehicleType::Bike, temperature, at())
                .await
                .unwrap();
            assert_eq!(fee, expected, "temperature {temperature:?}");
        }
    }

    #[tokio::test]
    async fn car_never_pays_temperature_or_phenomenon_fees() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let resolver = resolver_with(repos);

        let fee = resolver
            .resolve_air_temperature_fee(VehicleType::Car, Some(-30.0), at())
            .await
            .unwrap();
        assert_eq!(fee, Decimal::ZERO);

        let fee = resolver
            .resolve_phenomenon_fee(VehicleType::Car, Some("Heavy snowfall"), at())
            .await
            .unwrap();
        assert_eq!(fee, Decimal::ZERO);
    }

    #[tokio::test]
    async fn wind_fee_applies_only_to_bikes_with_inclusive_default_band() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let resolver = resolver_with(repos);

        // Default band [10, 20] is inclusive on both ends
        for (wind, expected) in [
            (Some(9.9), Decimal::ZERO),
            (Some(10.0), dec!(0.5)),
            (Some(15.0), dec!(0.5)),
            (Some(20.0), dec!(0.5)),
            (Some(20.1), Decimal::ZERO),
            (None, Decimal::ZERO),
        ] {
            let fee = resolver
                .resolve_wind_speed_fee(VehicleType::Bike, wind, at())
                .await
                .unwrap();
            assert_eq!(fee, expected, "wind {wind:?}");
        }

        let fee = resolver
            .resolve_wind_speed_fee(VehicleType::Scooter, Some(15.0), at())
            .await
            .unwrap();
        assert_eq!(fee, Decimal::ZERO);
    }

    #[tokio::test]
    async fn stored_numeric_rule_band_is_half_open() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        repos
            .extra_fees()
            .save(ExtraFeeRule {
                id: 0,
                kind: FeeKind::WindSpeed,
                vehicle_type: VehicleType::Bike,
                min_value: Some(10.0),
                max_value: Some(20.0),
                phenomenon_category: None,
                fee: dec!(0.7),
                valid_from: start,
                valid_to: None,
                created_at: start,
                updated_at: start,
            })
            .await
            .unwrap();
        let resolver = resolver_with(repos);

        let inside = resolver
            .resolve_wind_speed_fee(VehicleType::Bike, Some(19.9), at())
            .await
            .unwrap();
        assert_eq!(inside, dec!(0.7));

        // 20.0 is outside the stored [10, 20) band, so the inclusive
        // default band answers instead.
        let at_upper = resolver
            .resolve_wind_speed_fee(VehicleType::Bike, Some(20.0), at())
            .await
            .unwrap();
        assert_eq!(at_upper, dec!(0.5));
    }

    #[tokio::test]
    async fn phenomenon_default_fees() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let resolver = resolver_with(repos);

        for (text, expected) in [
            (Some("Light snow shower"), dec!(1.0)),
            (Some("Moderate rain"), dec!(0.5)),
            (Some("Clear"), Decimal::ZERO),
            (Some(""), Decimal::ZERO),
            (None, Decimal::ZERO),
        ] {
            let fee = resolver
                .resolve_phenomenon_fee(VehicleType::Scooter, text, at())
                .await
                .unwrap();
            assert_eq!(fee, expected, "text {text:?}");
        }
    }

    #[tokio::test]
    async fn restriction_rule_matrix() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let resolver = resolver_with(repos);

        // Wind forbids bikes strictly above 20
        assert!(resolver.is_vehicle_forbidden(VehicleType::Bike, Some(20.1), None));
        assert!(!resolver.is_vehicle_forbidden(VehicleType::Bike, Some(20.0), None));
        assert!(!resolver.is_vehicle_forbidden(VehicleType::Bike, None, None));
        assert!(!resolver.is_vehicle_forbidden(VehicleType::Scooter, Some(25.0), None));

        // FORBIDDEN phenomena veto bikes and scooters, never cars
        assert!(resolver.is_vehicle_forbidden(VehicleType::Bike, Some(5.0), Some("Hail")));
        assert!(resolver.is_vehicle_forbidden(VehicleType::Scooter, Some(5.0), Some("Thunder")));
        assert!(!resolver.is_vehicle_forbidden(VehicleType::Car, Some(25.0), Some("Glaze")));
        assert!(!resolver.is_vehicle_forbidden(VehicleType::Scooter, Some(5.0), Some("Light rain")));
    }

    #[tokio::test]
    async fn invalidate_clears_the_memo() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let resolver = resolver_with(repos);

        let _ = resolver
            .resolve_base_fee(City::Tartu, VehicleType::Bike, at())
            .await
            .unwrap();
        assert!(!resolver.default_base_fees.is_empty());

        resolver.invalidate_defaults();
        assert!(resolver.default_base_fees.is_empty());

        // Recompute after the clear yields the same value
        let fee = resolver
            .resolve_base_fee(City::Tartu, VehicleType::Bike, at())
            .await
            .unwrap();
        assert_eq!(fee, dec!(2.5));
    }
}

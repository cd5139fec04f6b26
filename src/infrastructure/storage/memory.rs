//! In-memory repository implementations for development and testing

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::domain::{
    BaseFeeRule, BaseFeeRuleRepository, City, DomainError, DomainResult, ExtraFeeRule,
    ExtraFeeRuleRepository, FeeKind, PhenomenonCategory, RepositoryProvider, VehicleType,
    WeatherObservation, WeatherObservationRepository,
};

/// In-memory rule and observation stores.
///
/// Rules live in DashMaps keyed by id; observations keep insertion order in
/// a Vec so "store order" tie-breaks are deterministic.
pub struct InMemoryRepositoryProvider {
    base_fees: InMemoryBaseFeeRepository,
    extra_fees: InMemoryExtraFeeRepository,
    weather: InMemoryWeatherRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self {
            base_fees: InMemoryBaseFeeRepository::new(),
            extra_fees: InMemoryExtraFeeRepository::new(),
            weather: InMemoryWeatherRepository::new(),
        }
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn base_fees(&self) -> &dyn BaseFeeRuleRepository {
        &self.base_fees
    }

    fn extra_fees(&self) -> &dyn ExtraFeeRuleRepository {
        &self.extra_fees
    }

    fn weather(&self) -> &dyn WeatherObservationRepository {
        &self.weather
    }
}

// ── Base fee rules ──────────────────────────────────────────────

pub struct InMemoryBaseFeeRepository {
    rules: DashMap<i32, BaseFeeRule>,
    counter: AtomicI32,
}

impl InMemoryBaseFeeRepository {
    pub fn new() -> Self {
        Self {
            rules: DashMap::new(),
            counter: AtomicI32::new(1),
        }
    }
}

#[async_trait]
impl BaseFeeRuleRepository for InMemoryBaseFeeRepository {
    async fn find_active(
        &self,
        city: City,
        vehicle_type: VehicleType,
        at: DateTime<Utc>,
    ) -> DomainResult<Option<BaseFeeRule>> {
        let best = self
            .rules
            .iter()
            .filter(|r| r.city == city && r.vehicle_type == vehicle_type && r.is_active_at(at))
            .max_by_key(|r| r.valid_from)
            .map(|r| r.value().clone());
        Ok(best)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<BaseFeeRule>> {
        Ok(self.rules.get(&id).map(|r| r.value().clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<BaseFeeRule>> {
        let mut all: Vec<BaseFeeRule> = self.rules.iter().map(|r| r.value().clone()).collect();
        all.sort_by_key(|r| r.id);
        Ok(all)
    }

    async fn save(&self, mut rule: BaseFeeRule) -> DomainResult<BaseFeeRule> {
        rule.id = self.counter.fetch_add(1, Ordering::SeqCst);
        self.rules.insert(rule.id, rule.clone());
        Ok(rule)
    }

    async fn update(&self, rule: BaseFeeRule) -> DomainResult<()> {
        if !self.rules.contains_key(&rule.id) {
            return Err(DomainError::NotFound {
                entity: "BaseFeeRule",
                field: "id",
                value: rule.id.to_string(),
            });
        }
        self.rules.insert(rule.id, rule);
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        self.rules.remove(&id).ok_or(DomainError::NotFound {
            entity: "BaseFeeRule",
            field: "id",
            value: id.to_string(),
        })?;
        Ok(())
    }
}

// ── Extra fee rules ─────────────────────────────────────────────

pub struct InMemoryExtraFeeRepository {
    rules: DashMap<i32, ExtraFeeRule>,
    counter: AtomicI32,
}

impl InMemoryExtraFeeRepository {
    pub fn new() -> Self {
        Self {
            rules: DashMap::new(),
            counter: AtomicI32::new(1),
        }
    }
}

#[async_trait]
impl ExtraFeeRuleRepository for InMemoryExtraFeeRepository {
    async fn find_active_for_value(
        &self,
        kind: FeeKind,
        vehicle_type: VehicleType,
        value: f64,
        at: DateTime<Utc>,
    ) -> DomainResult<Option<ExtraFeeRule>> {
        let best = self
            .rules
            .iter()
            .filter(|r| {
                r.kind == kind
                    && r.vehicle_type == vehicle_type
                    && r.is_active_at(at)
                    && r.band_contains(value)
            })
            .max_by_key(|r| r.valid_from)
            .map(|r| r.value().clone());
        Ok(best)
    }

    async fn find_active_for_category(
        &self,
        vehicle_type: VehicleType,
        category: PhenomenonCategory,
        at: DateTime<Utc>,
    ) -> DomainResult<Option<ExtraFeeRule>> {
        let best = self
            .rules
            .iter()
            .filter(|r| {
                r.kind == FeeKind::Phenomenon
                    && r.vehicle_type == vehicle_type
                    && r.is_active_at(at)
                    && r.phenomenon_category == Some(category)
            })
            .max_by_key(|r| r.valid_from)
            .map(|r| r.value().clone());
        Ok(best)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ExtraFeeRule>> {
        Ok(self.rules.get(&id).map(|r| r.value().clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<ExtraFeeRule>> {
        let mut all: Vec<ExtraFeeRule> = self.rules.iter().map(|r| r.value().clone()).collect();
        all.sort_by_key(|r| r.id);
        Ok(all)
    }

    async fn save(&self, mut rule: ExtraFeeRule) -> DomainResult<ExtraFeeRule> {
        rule.id = self.counter.fetch_add(1, Ordering::SeqCst);
        self.rules.insert(rule.id, rule.clone());
        Ok(rule)
    }

    async fn update(&self, rule: ExtraFeeRule) -> DomainResult<()> {
        if !self.rules.contains_key(&rule.id) {
            return Err(DomainError::NotFound {
                entity: "ExtraFeeRule",
                field: "id",
                value: rule.id.to_string(),
            });
        }
        self.rules.insert(rule.id, rule);
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        self.rules.remove(&id).ok_or(DomainError::NotFound {
            entity: "ExtraFeeRule",
            field: "id",
            value: id.to_string(),
        })?;
        Ok(())
    }
}

// ── Weather observations ────────────────────────────────────────

pub struct InMemoryWeatherRepository {
    observations: RwLock<Vec<WeatherObservation>>,
    counter: AtomicI32,
}

impl InMemoryWeatherRepository {
    pub fn new() -> Self {
        Self {
            observations: RwLock::new(Vec::new()),
            counter: AtomicI32::new(1),
        }
    }

    fn read(&self) -> DomainResult<std::sync::RwLockReadGuard<'_, Vec<WeatherObservation>>> {
        self.observations
            .read()
            .map_err(|e| DomainError::Validation(format!("Store lock poisoned: {}", e)))
    }
}

#[async_trait]
impl WeatherObservationRepository for InMemoryWeatherRepository {
    async fn latest(&self, station_id: &str) -> DomainResult<Option<WeatherObservation>> {
        let observations = self.read()?;
        let mut latest: Option<&WeatherObservation> = None;
        for obs in observations.iter().filter(|o| o.station_id == station_id) {
            if latest.map_or(true, |best| obs.observed_at > best.observed_at) {
                latest = Some(obs);
            }
        }
        Ok(latest.cloned())
    }

    async fn nearest(
        &self,
        station_id: &str,
        at: DateTime<Utc>,
    ) -> DomainResult<Option<WeatherObservation>> {
        let observations = self.read()?;
        let mut nearest: Option<(&WeatherObservation, i64)> = None;
        for obs in observations.iter().filter(|o| o.station_id == station_id) {
            let distance = (obs.observed_at - at).num_milliseconds().abs();
            // Strict comparison keeps the first-stored of equidistant rows
            if nearest.map_or(true, |(_, best)| distance < best) {
                nearest = Some((obs, distance));
            }
        }
        Ok(nearest.map(|(obs, _)| obs.clone()))
    }

    async fn insert_all(&self, observations: Vec<WeatherObservation>) -> DomainResult<usize> {
        let mut store = self
            .observations
            .write()
            .map_err(|e| DomainError::Validation(format!("Store lock poisoned: {}", e)))?;
        let inserted = observations.len();
        for mut obs in observations {
            obs.id = self.counter.fetch_add(1, Ordering::SeqCst);
            store.push(obs);
        }
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn obs(station_id: &str, observed_at: DateTime<Utc>) -> WeatherObservation {
        WeatherObservation {
            id: 0,
            station_name: "Test".to_string(),
            station_id: station_id.to_string(),
            air_temperature: Some(1.0),
            wind_speed: Some(2.0),
            phenomenon: None,
            observed_at,
        }
    }

    #[tokio::test]
    async fn latest_picks_newest_for_station() {
        let repo = InMemoryWeatherRepository::new();
        let early = Utc.with_ymd_and_hms(2024, 3, 15, 6, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2024, 3, 15, 18, 0, 0).unwrap();

        repo.insert_all(vec![
            obs("26038", early),
            obs("26038", late),
            obs("41803", late + chrono::Duration::hours(1)),
        ])
        .await
        .unwrap();

        let latest = repo.latest("26038").await.unwrap().unwrap();
        assert_eq!(latest.observed_at, late);
        assert!(repo.latest("26242").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn nearest_prefers_smallest_distance_then_store_order() {
        let repo = InMemoryWeatherRepository::new();
        let t0 = Utc.with_ymd_and_hms(2024, 3, 15, 6, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2024, 3, 15, 8, 0, 0).unwrap();

        repo.insert_all(vec![obs("26038", t0), obs("26038", t1)])
            .await
            .unwrap();

        // 06:30 is closer to 06:00
        let near = repo
            .nearest("26038", Utc.with_ymd_and_hms(2024, 3, 15, 6, 30, 0).unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(near.observed_at, t0);

        // 07:00 is equidistant; the first stored row wins
        let tie = repo
            .nearest("26038", Utc.with_ymd_and_hms(2024, 3, 15, 7, 0, 0).unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(tie.observed_at, t0);
    }
}

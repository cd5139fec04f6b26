//! Weather observation repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::WeatherObservation;
use crate::domain::DomainResult;

#[async_trait]
pub trait WeatherObservationRepository: Send + Sync {
    /// Most recent observation for the station, by `observed_at`.
    async fn latest(&self, station_id: &str) -> DomainResult<Option<WeatherObservation>>;

    /// Observation whose `observed_at` is nearest `at` by absolute time
    /// distance. Equidistant candidates resolve in store order.
    async fn nearest(
        &self,
        station_id: &str,
        at: DateTime<Utc>,
    ) -> DomainResult<Option<WeatherObservation>>;

    /// Append a parsed batch. Ingestion-only; observations are never
    /// updated or deleted.
    async fn insert_all(&self, observations: Vec<WeatherObservation>) -> DomainResult<usize>;
}

//! SeaORM implementation of WeatherObservationRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::info;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, QueryOrder, Set,
};

use crate::domain::{DomainResult, WeatherObservation, WeatherObservationRepository};
use crate::infrastructure::database::entities::weather_observation;

use super::db_err;

fn entity_to_domain(model: weather_observation::Model) -> WeatherObservation {
    WeatherObservation {
        id: model.id,
        station_name: model.station_name,
        station_id: model.station_id,
        air_temperature: model.air_temperature,
        wind_speed: model.wind_speed,
        phenomenon: model.phenomenon,
        observed_at: model.observed_at,
    }
}

pub struct SeaOrmWeatherRepository {
    db: DatabaseConnection,
}

impl SeaOrmWeatherRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Newest observation at or before `at` for the station.
    async fn last_before(
        &self,
        station_id: &str,
        at: DateTime<Utc>,
    ) -> DomainResult<Option<weather_observation::Model>> {
        weather_observation::Entity::find()
            .filter(weather_observation::Column::StationId.eq(station_id))
            .filter(weather_observation::Column::ObservedAt.lte(at))
            .order_by_desc(weather_observation::Column::ObservedAt)
            .order_by_asc(weather_observation::Column::Id)
            .one(&self.db)
            .await
            .map_err(db_err)
    }

    /// Oldest observation strictly after `at` for the station.
    async fn first_after(
        &self,
        station_id: &str,
        at: DateTime<Utc>,
    ) -> DomainResult<Option<weather_observation::Model>> {
        weather_observation::Entity::find()
            .filter(weather_observation::Column::StationId.eq(station_id))
            .filter(weather_observation::Column::ObservedAt.gt(at))
            .order_by_asc(weather_observation::Column::ObservedAt)
            .order_by_asc(weather_observation::Column::Id)
            .one(&self.db)
            .await
            .map_err(db_err)
    }
}

#[async_trait]
impl WeatherObservationRepository for SeaOrmWeatherRepository {
    async fn latest(&self, station_id: &str) -> DomainResult<Option<WeatherObservation>> {
        let model = weather_observation::Entity::find()
            .filter(weather_observation::Column::StationId.eq(station_id))
            .order_by_desc(weather_observation::Column::ObservedAt)
            .order_by_asc(weather_observation::Column::Id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn nearest(
        &self,
        station_id: &str,
        at: DateTime<Utc>,
    ) -> DomainResult<Option<WeatherObservation>> {
        // Nearest by absolute distance: compare the closest candidate on
        // each side of `at`. An exact tie goes to the earlier row.
        let before = self.last_before(station_id, at).await?;
        let after = self.first_after(station_id, at).await?;

        let chosen = match (before, after) {
            (Some(b), Some(a)) => {
                let before_distance = (at - b.observed_at).num_milliseconds().abs();
                let after_distance = (a.observed_at - at).num_milliseconds().abs();
                if before_distance <= after_distance {
                    Some(b)
                } else {
                    Some(a)
                }
            }
            (Some(b), None) => Some(b),
            (None, Some(a)) => Some(a),
            (None, None) => None,
        };

        Ok(chosen.map(entity_to_domain))
    }

    async fn insert_all(&self, observations: Vec<WeatherObservation>) -> DomainResult<usize> {
        if observations.is_empty() {
            return Ok(0);
        }

        let count = observations.len();
        let models = observations.into_iter().map(|obs| {
            weather_observation::ActiveModel {
                id: NotSet,
                station_name: Set(obs.station_name),
                station_id: Set(obs.station_id),
                air_temperature: Set(obs.air_temperature),
                wind_speed: Set(obs.wind_speed),
                phenomenon: Set(obs.phenomenon),
                observed_at: Set(obs.observed_at),
            }
        });

        weather_observation::Entity::insert_many(models)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        info!("Inserted {} weather observations", count);
        Ok(count)
    }
}

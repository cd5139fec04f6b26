//! Delivery fee quote orchestration
//!
//! One quote runs a linear pipeline: look up the weather observation for
//! the city's station, apply the vehicle restriction rule, then resolve the
//! base fee and the three weather extras at one shared evaluation instant
//! and sum them. A vetoed vehicle or missing observation short-circuits to
//! a refusal; no fee is computed.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::fee_resolver::FeeResolver;
use crate::domain::{
    DeliveryFeeResult, DomainResult, FeeBreakdown, QuoteRequest, RefusalReason, RepositoryProvider,
    WeatherObservation, WeatherObservationRepository,
};

pub struct DeliveryFeeCalculator {
    repos: Arc<dyn RepositoryProvider>,
    resolver: Arc<FeeResolver>,
}

impl DeliveryFeeCalculator {
    pub fn new(repos: Arc<dyn RepositoryProvider>, resolver: Arc<FeeResolver>) -> Self {
        Self { repos, resolver }
    }

    pub async fn calculate(&self, request: &QuoteRequest) -> DomainResult<DeliveryFeeResult> {
        debug!(
            city = %request.city,
            vehicle_type = %request.vehicle_type,
            timestamp = ?request.timestamp,
            "Calculating delivery fee"
        );

        let Some(observation) = self.find_observation(request).await? else {
            warn!(city = %request.city, "No weather observation for city");
            return Ok(DeliveryFeeResult::Refused(RefusalReason::WeatherUnavailable));
        };

        if self.resolver.is_vehicle_forbidden(
            request.vehicle_type,
            observation.wind_speed,
            observation.phenomenon_text(),
        ) {
            info!(
                city = %request.city,
                vehicle_type = %request.vehicle_type,
                wind_speed = ?observation.wind_speed,
                phenomenon = ?observation.phenomenon,
                "Vehicle usage forbidden by weather"
            );
            return Ok(DeliveryFeeResult::Refused(RefusalReason::VehicleForbidden));
        }

        // One instant anchors all four resolutions so a single quote never
        // straddles two rule generations.
        let at = request.timestamp.unwrap_or(observation.observed_at);

        let base = self
            .resolver
            .resolve_base_fee(request.city, request.vehicle_type, at)
            .await?;
        let temperature = self
            .resolver
            .resolve_air_temperature_fee(request.vehicle_type, observation.air_temperature, at)
            .await?;
        let wind = self
            .resolver
            .resolve_wind_speed_fee(request.vehicle_type, observation.wind_speed, at)
            .await?;
        let phenomenon = self
            .resolver
            .resolve_phenomenon_fee(
                request.vehicle_type,
                observation.phenomenon_text(),
                at,
            )
            .await?;

        let breakdown = FeeBreakdown {
            base,
            temperature,
            wind,
            phenomenon,
        };
        info!(total = %breakdown.total(), "Delivery fee calculated");

        Ok(DeliveryFeeResult::quoted(breakdown))
    }

    async fn find_observation(
        &self,
        request: &QuoteRequest,
    ) -> DomainResult<Option<WeatherObservation>> {
        let station = request.city.station();
        match request.timestamp {
            Some(at) => self.repos.weather().nearest(station.wmo_code(), at).await,
            None => self.repos.weather().latest(station.wmo_code()).await,
        }
    }
}

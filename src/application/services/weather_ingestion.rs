//! Periodic weather ingestion
//!
//! Runs in a tokio::spawn loop: fetch the station feed, parse it, append
//! the batch to the observation store. A failed cycle is logged and the
//! loop keeps going; ingestion never blocks or is blocked by fee quoting —
//! the append-only observation store is the only thing they share.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::time::Duration;
use tracing::{info, warn};

use crate::application::parser::WeatherIngestionParser;
use crate::domain::{DomainResult, RepositoryProvider, WeatherObservationRepository};
use crate::shared::errors::InfraError;
use crate::shared::shutdown::ShutdownSignal;

/// Upstream source of raw station feed documents.
#[async_trait]
pub trait WeatherFeed: Send + Sync {
    async fn fetch_document(&self) -> Result<String, InfraError>;
}

/// Fetch → parse → append, one cycle at a time.
pub struct WeatherIngestionService {
    feed: Arc<dyn WeatherFeed>,
    repos: Arc<dyn RepositoryProvider>,
    parser: WeatherIngestionParser,
}

impl WeatherIngestionService {
    pub fn new(feed: Arc<dyn WeatherFeed>, repos: Arc<dyn RepositoryProvider>) -> Self {
        Self {
            feed,
            repos,
            parser: WeatherIngestionParser::new(),
        }
    }

    /// Run one ingestion cycle. Upstream and parse failures degrade to an
    /// empty batch; only store errors surface to the caller.
    pub async fn fetch_and_store(&self) -> DomainResult<usize> {
        let raw = match self.feed.fetch_document().await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Station feed fetch failed, skipping cycle");
                return Ok(0);
            }
        };

        let observations = self.parser.parse(&raw, Utc::now());
        if observations.is_empty() {
            warn!("No observations parsed from station feed");
            return Ok(0);
        }

        let inserted = self.repos.weather().insert_all(observations).await?;
        info!(inserted, "Stored weather observations");
        Ok(inserted)
    }
}

/// Start the weather ingestion background task.
///
/// Fetches every `fetch_interval_secs` until shutdown is triggered.
pub fn start_weather_ingestion_task(
    service: Arc<WeatherIngestionService>,
    shutdown: ShutdownSignal,
    fetch_interval_secs: u64,
) {
    tokio::spawn(async move {
        info!(
            fetch_interval = fetch_interval_secs,
            "Weather ingestion task started"
        );

        let mut interval = tokio::time::interval(Duration::from_secs(fetch_interval_secs));

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = service.fetch_and_store().await {
                        warn!(error = %e, "Weather ingestion cycle error");
                    }
                }
                _ = shutdown.notified().wait() => {
                    info!("Weather ingestion task shutting down");
                    break;
                }
            }
        }

        info!("Weather ingestion task stopped");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::WeatherObservationRepository;
    use crate::infrastructure::storage::memory::InMemoryRepositoryProvider;

    struct StaticFeed(Result<String, ()>);

    #[async_trait]
    impl WeatherFeed for StaticFeed {
        async fn fetch_document(&self) -> Result<String, InfraError> {
            self.0
                .clone()
                .map_err(|_| InfraError::Feed("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn stores_parsed_observations() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let doc = r#"{"timestamp": "1710504000", "stations": [
            {"name": "Tallinn-Harku", "wmocode": "26038",
             "airtemperature": "-2.1", "windspeed": "4.7", "phenomenon": ""}
        ]}"#;
        let service =
            WeatherIngestionService::new(Arc::new(StaticFeed(Ok(doc.to_string()))), repos.clone());

        let inserted = service.fetch_and_store().await.unwrap();
        assert_eq!(inserted, 1);

        let stored = repos.weather().latest("26038").await.unwrap().unwrap();
        assert_eq!(stored.air_temperature, Some(-2.1));
    }

    #[tokio::test]
    async fn fetch_failure_skips_cycle_without_error() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let service = WeatherIngestionService::new(Arc::new(StaticFeed(Err(()))), repos.clone());

        let inserted = service.fetch_and_store().await.unwrap();
        assert_eq!(inserted, 0);
        assert!(repos.weather().latest("26038").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn malformed_document_skips_cycle() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let service = WeatherIngestionService::new(
            Arc::new(StaticFeed(Ok("not a feed".to_string()))),
            repos.clone(),
        );

        let inserted = service.fetch_and_store().await.unwrap();
        assert_eq!(inserted, 0);
    }
}

//! HTTP client for the national station feed

use async_trait::async_trait;
use tracing::debug;

use crate::application::services::weather_ingestion::WeatherFeed;
use crate::shared::errors::InfraError;

/// Fetches the raw station feed document over HTTP.
pub struct HttpWeatherFeed {
    client: reqwest::Client,
    url: String,
}

impl HttpWeatherFeed {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl WeatherFeed for HttpWeatherFeed {
    async fn fetch_document(&self) -> Result<String, InfraError> {
        debug!(url = %self.url, "Fetching station feed");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| InfraError::Feed(e.to_string()))?
            .error_for_status()
            .map_err(|e| InfraError::Feed(e.to_string()))?;

        let body = response
            .text()
            .await
            .map_err(|e| InfraError::Feed(e.to_string()))?;

        debug!(bytes = body.len(), "Received station feed document");
        Ok(body)
    }
}

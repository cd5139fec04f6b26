//! Weather observation entity

use chrono::{DateTime, Utc};

/// One station reading from the national weather feed.
///
/// Observations are append-only: ingestion inserts them and nothing in the
/// core ever mutates or deletes a stored row. Measurement fields are
/// nullable because the feed frequently omits them.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherObservation {
    pub id: i32,
    pub station_name: String,
    /// WMO code identifying the station in the feed
    pub station_id: String,
    pub air_temperature: Option<f64>,
    pub wind_speed: Option<f64>,
    pub phenomenon: Option<String>,
    pub observed_at: DateTime<Utc>,
}

impl WeatherObservation {
    /// Phenomenon text, empty-normalized: `Some("")` is treated as absent.
    pub fn phenomenon_text(&self) -> Option<&str> {
        self.phenomenon.as_deref().filter(|p| !p.is_empty())
    }
}

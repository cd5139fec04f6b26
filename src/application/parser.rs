//! Station feed document parsing
//!
//! Turns one raw feed document into normalized observations. Parsing is
//! pure and total: a structurally malformed document yields an empty batch,
//! an unparsable numeric field yields a null measurement, and a broken
//! document timestamp falls back to the ingestion wall-clock. Only the
//! three monitored stations survive the allow-list filter; everything else
//! in the document is dropped silently.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use tracing::{debug, warn};

use crate::domain::{Station, WeatherObservation};

const DOCUMENT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Raw station feed document, as fetched.
///
/// Every field is kept as text: the feed serializes measurements as strings
/// and omits them freely, so typing happens in a second, lossy step.
#[derive(Debug, Deserialize)]
struct RawFeedDocument {
    #[serde(default, deserialize_with = "string_or_number")]
    timestamp: String,
    #[serde(default)]
    stations: Vec<RawStation>,
}

#[derive(Debug, Deserialize)]
struct RawStation {
    #[serde(default)]
    name: String,
    #[serde(default, deserialize_with = "string_or_number")]
    wmocode: String,
    #[serde(default, deserialize_with = "string_or_number")]
    airtemperature: String,
    #[serde(default, deserialize_with = "string_or_number")]
    windspeed: String,
    #[serde(default)]
    phenomenon: String,
}

/// Accepts either a JSON string or a bare number and yields its text.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(f) => f.to_string(),
    })
}

/// Parses raw station feed documents into observation batches.
pub struct WeatherIngestionParser;

impl WeatherIngestionParser {
    pub const fn new() -> Self {
        Self
    }

    /// Parse one document. `ingested_at` is used as the observation time
    /// only when the document timestamp is unusable.
    pub fn parse(&self, raw: &str, ingested_at: DateTime<Utc>) -> Vec<WeatherObservation> {
        let document: RawFeedDocument = match serde_json::from_str(raw) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(error = %e, "Malformed station feed document, skipping batch");
                return Vec::new();
            }
        };

        let observed_at = parse_document_timestamp(&document.timestamp, ingested_at);

        let mut observations = Vec::new();
        for station in &document.stations {
            if Station::from_wmo_code(&station.wmocode).is_none() {
                continue;
            }

            observations.push(WeatherObservation {
                id: 0,
                station_name: station.name.clone(),
                station_id: station.wmocode.clone(),
                air_temperature: parse_measurement(&station.airtemperature),
                wind_speed: parse_measurement(&station.windspeed),
                phenomenon: if station.phenomenon.is_empty() {
                    None
                } else {
                    Some(station.phenomenon.clone())
                },
                observed_at,
            });
        }

        debug!(
            stations = document.stations.len(),
            retained = observations.len(),
            "Parsed station feed document"
        );
        observations
    }
}

impl Default for WeatherIngestionParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Document timestamp: epoch seconds first, then the feed's formatted
/// variant, then the ingestion wall-clock as a lossy fallback.
fn parse_document_timestamp(raw: &str, fallback: DateTime<Utc>) -> DateTime<Utc> {
    if let Ok(epoch) = raw.trim().parse::<i64>() {
        if let Some(at) = DateTime::from_timestamp(epoch, 0) {
            return at;
        }
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw.trim(), DOCUMENT_TIMESTAMP_FORMAT) {
        return naive.and_utc();
    }

    warn!(timestamp = raw, "Unusable document timestamp, using ingestion time");
    fallback
}

/// Numeric field text to measurement; empty or garbage text is null.
fn parse_measurement(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(value = raw, "Could not parse measurement, storing null");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ingested_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 30, 0).unwrap()
    }

    fn feed(timestamp: &str, stations: &str) -> String {
        format!(r#"{{"timestamp": "{timestamp}", "stations": [{stations}]}}"#)
    }

    const TALLINN: &str = r#"{"name": "Tallinn-Harku", "wmocode": "26038",
        "airtemperature": "-2.1", "windspeed": "4.7", "phenomenon": "Light snow shower"}"#;

    #[test]
    fn parses_epoch_timestamp() {
        let parser = WeatherIngestionParser::new();
        let raw = feed("1710504000", TALLINN);

        let observations = parser.parse(&raw, ingested_at());
        assert_eq!(observations.len(), 1);
        assert_eq!(
            observations[0].observed_at,
            DateTime::from_timestamp(1710504000, 0).unwrap()
        );
    }

    #[test]
    fn parses_formatted_timestamp() {
        let parser = WeatherIngestionParser::new();
        let raw = feed("2024-03-15 11:45:00", TALLINN);

        let observations = parser.parse(&raw, ingested_at());
        assert_eq!(
            observations[0].observed_at,
            Utc.with_ymd_and_hms(2024, 3, 15, 11, 45, 0).unwrap()
        );
    }

    #[test]
    fn garbage_timestamp_falls_back_to_ingestion_time() {
        let parser = WeatherIngestionParser::new();
        let raw = feed("yesterdayish", TALLINN);

        let observations = parser.parse(&raw, ingested_at());
        assert_eq!(observations[0].observed_at, ingested_at());
    }

    #[test]
    fn bare_number_timestamp_is_accepted() {
        let parser = WeatherIngestionParser::new();
        let raw = format!(r#"{{"timestamp": 1710504000, "stations": [{TALLINN}]}}"#);

        let observations = parser.parse(&raw, ingested_at());
        assert_eq!(
            observations[0].observed_at,
            DateTime::from_timestamp(1710504000, 0).unwrap()
        );
    }

    #[test]
    fn station_fields_are_extracted() {
        let parser = WeatherIngestionParser::new();
        let raw = feed("1710504000", TALLINN);

        let obs = &parser.parse(&raw, ingested_at())[0];
        assert_eq!(obs.station_name, "Tallinn-Harku");
        assert_eq!(obs.station_id, "26038");
        assert_eq!(obs.air_temperature, Some(-2.1));
        assert_eq!(obs.wind_speed, Some(4.7));
        assert_eq!(obs.phenomenon.as_deref(), Some("Light snow shower"));
    }

    #[test]
    fn unknown_stations_are_dropped() {
        let parser = WeatherIngestionParser::new();
        let stations = format!(
            r#"{TALLINN},
            {{"name": "Narva", "wmocode": "26046", "airtemperature": "1.0",
              "windspeed": "2.0", "phenomenon": ""}}"#
        );
        let raw = feed("1710504000", &stations);

        let observations = parser.parse(&raw, ingested_at());
        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].station_id, "26038");
    }

    #[test]
    fn all_three_monitored_stations_are_retained() {
        let parser = WeatherIngestionParser::new();
        let stations = r#"
            {"name": "Tallinn-Harku", "wmocode": "26038", "airtemperature": "1.0", "windspeed": "2.0", "phenomenon": ""},
            {"name": "Tartu-Tõravere", "wmocode": "26242", "airtemperature": "0.5", "windspeed": "3.0", "phenomenon": ""},
            {"name": "Pärnu", "wmocode": "41803", "airtemperature": "2.0", "windspeed": "4.0", "phenomenon": ""}"#;
        let raw = feed("1710504000", stations);

        let observations = parser.parse(&raw, ingested_at());
        assert_eq!(observations.len(), 3);
    }

    #[test]
    fn empty_and_garbage_measurements_become_null() {
        let parser = WeatherIngestionParser::new();
        let station = r#"{"name": "Pärnu", "wmocode": "41803",
            "airtemperature": "", "windspeed": "breezy", "phenomenon": ""}"#;
        let raw = feed("1710504000", station);

        let obs = &parser.parse(&raw, ingested_at())[0];
        assert_eq!(obs.air_temperature, None);
        assert_eq!(obs.wind_speed, None);
        assert_eq!(obs.phenomenon, None);
        assert_eq!(obs.phenomenon_text(), None);
    }

    #[test]
    fn missing_fields_become_null() {
        let parser = WeatherIngestionParser::new();
        let station = r#"{"name": "Pärnu", "wmocode": "41803"}"#;
        let raw = feed("1710504000", station);

        let obs = &parser.parse(&raw, ingested_at())[0];
        assert_eq!(obs.air_temperature, None);
        assert_eq!(obs.wind_speed, None);
        assert_eq!(obs.phenomenon, None);
    }

    #[test]
    fn malformed_document_yields_empty_batch() {
        let parser = WeatherIngestionParser::new();

        assert!(parser.parse("<observations/>", ingested_at()).is_empty());
        assert!(parser.parse("{\"timestamp\": }", ingested_at()).is_empty());
        assert!(parser.parse("", ingested_at()).is_empty());
    }

    #[test]
    fn document_without_stations_yields_empty_batch() {
        let parser = WeatherIngestionParser::new();
        let raw = r#"{"timestamp": "1710504000"}"#;

        assert!(parser.parse(raw, ingested_at()).is_empty());
    }
}

//! Monitored weather stations
//!
//! Exactly three stations are ingested, one per supported city. The same
//! mapping drives both the quote path (which station's observations answer
//! a city's request) and the ingestion filter (which stations survive
//! parsing).

use crate::domain::quote::City;

/// A monitored station of the national weather network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Station {
    TallinnHarku,
    TartuToravere,
    Parnu,
}

impl Station {
    pub const ALL: [Station; 3] = [Station::TallinnHarku, Station::TartuToravere, Station::Parnu];

    /// WMO code used as the station identifier in the feed and the store.
    pub fn wmo_code(&self) -> &'static str {
        match self {
            Self::TallinnHarku => "26038",
            Self::TartuToravere => "26242",
            Self::Parnu => "41803",
        }
    }

    /// Station name as it appears in the feed.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TallinnHarku => "Tallinn-Harku",
            Self::TartuToravere => "Tartu-Tõravere",
            Self::Parnu => "Pärnu",
        }
    }

    pub fn from_wmo_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.wmo_code() == code)
    }
}

impl City {
    /// The station whose observations answer this city's quotes.
    pub fn station(&self) -> Station {
        match self {
            City::Tallinn => Station::TallinnHarku,
            City::Tartu => Station::TartuToravere,
            City::Parnu => Station::Parnu,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_city_maps_to_a_distinct_station() {
        let stations: Vec<Station> = City::ALL.iter().map(|c| c.station()).collect();
        assert_eq!(stations.len(), 3);
        assert!(stations.contains(&Station::TallinnHarku));
        assert!(stations.contains(&Station::TartuToravere));
        assert!(stations.contains(&Station::Parnu));
    }

    #[test]
    fn wmo_codes_round_trip() {
        for station in Station::ALL {
            assert_eq!(Station::from_wmo_code(station.wmo_code()), Some(station));
        }
        assert_eq!(Station::from_wmo_code("00000"), None);
    }
}

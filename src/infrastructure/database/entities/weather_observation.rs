//! Weather observation entity

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Weather observation model - one station reading, append-only
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "weather_observations")]
pub struct Model {
    /// Unique observation ID
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Station name as published in the feed
    pub station_name: String,

    /// WMO code of the station
    pub station_id: String,

    /// Air temperature in °C; absent when the station omitted it
    pub air_temperature: Option<f64>,

    /// Wind speed in m/s; absent when the station omitted it
    pub wind_speed: Option<f64>,

    /// Free-text phenomenon description
    pub phenomenon: Option<String>,

    /// When the reading was taken
    pub observed_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

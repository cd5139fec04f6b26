//! SeaORM entity models

pub mod regional_base_fee;
pub mod weather_extra_fee;
pub mod weather_observation;

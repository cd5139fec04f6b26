//! Application services

pub mod fee_calculator;
pub mod fee_resolver;
pub mod weather_ingestion;

pub use fee_calculator::DeliveryFeeCalculator;
pub use fee_resolver::{DefaultBaseFeeCache, FeeResolver};
pub use weather_ingestion::{
    start_weather_ingestion_task, WeatherFeed, WeatherIngestionService,
};

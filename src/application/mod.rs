//! Business logic: fee resolution, quote orchestration, weather ingestion

pub mod parser;
pub mod services;

pub use parser::WeatherIngestionParser;
pub use services::{
    start_weather_ingestion_task, DeliveryFeeCalculator, FeeResolver, WeatherFeed,
    WeatherIngestionService,
};

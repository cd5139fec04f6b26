//! External concerns: database, alternative storage, upstream feed client

pub mod database;
pub mod storage;
pub mod weather_feed;

pub use database::repositories::SeaOrmRepositoryProvider;
pub use database::{init_database, DatabaseConfig};
pub use storage::InMemoryRepositoryProvider;
pub use weather_feed::HttpWeatherFeed;

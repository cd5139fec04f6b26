//! Weather observation aggregate

pub mod model;
pub mod repository;
pub mod station;

pub use model::WeatherObservation;
pub use repository::WeatherObservationRepository;
pub use station::Station;

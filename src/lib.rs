//! # Delivery Fee Service
//!
//! Calculates courier delivery fees from city, vehicle type and ambient
//! weather, applying time-versioned business rules with fallback defaults
//! and vehicle-usage restrictions.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, types and repository traits
//! - **application**: Fee resolution, quote orchestration, weather ingestion
//! - **infrastructure**: External concerns (database, in-memory storage,
//!   upstream feed client)
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: Errors and shutdown coordination

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::http::create_api_router;

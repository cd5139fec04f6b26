//! Core business entities, types and traits

pub mod base_fee;
pub mod extra_fee;
pub mod phenomenon;
pub mod quote;
pub mod repositories;
pub mod weather;

// Re-export commonly used types
pub use base_fee::{BaseFeeRule, BaseFeeRuleRepository};
pub use extra_fee::{ExtraFeeRule, ExtraFeeRuleRepository, FeeKind};
pub use phenomenon::{PhenomenonCategory, PhenomenonClassifier};
pub use quote::{City, DeliveryFeeResult, FeeBreakdown, QuoteRequest, RefusalReason, VehicleType};
pub use repositories::{DomainResult, RepositoryProvider};
pub use weather::{Station, WeatherObservation, WeatherObservationRepository};

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::DomainError;

//! Fee quote aggregate

pub mod model;

pub use model::{City, DeliveryFeeResult, FeeBreakdown, QuoteRequest, RefusalReason, VehicleType};

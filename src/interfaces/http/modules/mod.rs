//! REST API modules, one per resource

pub mod base_fees;
pub mod delivery_fees;
pub mod extra_fees;
pub mod health;

use std::sync::Arc;

use crate::application::services::{DeliveryFeeCalculator, FeeResolver};
use crate::domain::RepositoryProvider;

/// Shared state for all API handlers.
#[derive(Clone)]
pub struct AppState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub resolver: Arc<FeeResolver>,
    pub calculator: Arc<DeliveryFeeCalculator>,
}

//! REST API surface

pub mod common;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDoc};

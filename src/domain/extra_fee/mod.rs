//! Weather extra fee aggregate

pub mod model;
pub mod repository;

pub use model::{ExtraFeeRule, FeeKind};
pub use repository::ExtraFeeRuleRepository;

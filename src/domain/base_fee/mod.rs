//! Regional base fee aggregate

pub mod model;
pub mod repository;

pub use model::BaseFeeRule;
pub use repository::BaseFeeRuleRepository;

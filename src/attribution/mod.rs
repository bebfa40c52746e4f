pub mod config;
pub mod engine;
pub mod types;
pub mod validation;

pub use config::*;
pub use engine::{compute_impacts, rank, rank_with};
pub use types::{ImpactRecord, Impacts, RankedAttribution};
pub use validation::validate_attribution;

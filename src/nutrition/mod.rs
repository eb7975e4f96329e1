//! Nutrition calculation module
//!
//! Nutrient code mapping, aggregation across foods and daily target evaluation.

pub mod aggregate;
pub mod codes;
pub mod targets;

pub use aggregate::{aggregate, Aggregate};
pub use codes::{nutrient_for_code, NUTRIENT_CODES};
pub use targets::{daily_target, evaluate, TargetProgress};

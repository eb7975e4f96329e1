//! Prenatal Diet Analyzer (PDA) Library
//!
//! Nutrient lookup against USDA FoodData Central, aggregation and
//! comparison with daily prenatal targets.

pub mod build_info;
pub mod config;
pub mod fdc;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod tools;

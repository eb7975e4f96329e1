//! Data models
//!
//! Session and nutrient types shared across the crate.

mod age_group;
mod food_list;
mod nutrition;

pub use age_group::AgeGroup;
pub use food_list::{FoodList, FoodListError};
pub use nutrition::{Nutrient, NutrientRecord, Nutrition};

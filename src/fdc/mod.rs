//! USDA FoodData Central integration
//!
//! HTTP client for the FDC API and the two-step food lookup built on it.

pub mod client;
pub mod lookup;

#[cfg(test)]
pub mod mock;

pub use client::{
    FdcClient, FdcClientConfig, FetchError, FoodDataSource, FoodDetails, FoodNutrientEntry,
    FoodSearchHit, REQUEST_TIMEOUT,
};
pub use lookup::{build_record, lookup_food, LookupOutcome, SEARCH_PAGE_SIZE};

//! In-memory `FoodDataSource` for tests

use std::cell::RefCell;
use std::collections::HashMap;

use super::client::{FetchError, FoodDataSource, FoodDetails, FoodNutrientEntry, FoodSearchHit};

/// Canned search and detail responses keyed by query and FDC id
///
/// Queries without a canned response search to zero candidates.
#[derive(Default)]
pub struct MockFoodSource {
    searches: HashMap<String, Result<Vec<FoodSearchHit>, FetchError>>,
    details: HashMap<u64, Result<FoodDetails, FetchError>>,
    calls: RefCell<Vec<String>>,
}

impl MockFoodSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_food(mut self, query: &str, fdc_id: u64, description: &str, nutrients: &[(u32, f64)]) -> Self {
        self.searches.insert(query.to_string(), Ok(vec![hit(fdc_id, description)]));
        self.details.insert(
            fdc_id,
            Ok(FoodDetails {
                description: description.to_string(),
                food_nutrients: Some(
                    nutrients
                        .iter()
                        .map(|(id, amount)| FoodNutrientEntry::new(*id, *amount))
                        .collect(),
                ),
            }),
        );
        self
    }

    pub fn with_search_error(mut self, query: &str, err: FetchError) -> Self {
        self.searches.insert(query.to_string(), Err(err));
        self
    }

    pub fn with_detail_error(mut self, query: &str, fdc_id: u64, description: &str, err: FetchError) -> Self {
        self.searches.insert(query.to_string(), Ok(vec![hit(fdc_id, description)]));
        self.details.insert(fdc_id, Err(err));
        self
    }

    /// Requests made so far, as `search:<query>:<page_size>` or `food:<id>`
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

fn hit(fdc_id: u64, description: &str) -> FoodSearchHit {
    FoodSearchHit {
        fdc_id,
        description: description.to_string(),
    }
}

impl FoodDataSource for MockFoodSource {
    fn search_foods(&self, query: &str, page_size: u32) -> Result<Vec<FoodSearchHit>, FetchError> {
        self.calls.borrow_mut().push(format!("search:{}:{}", query, page_size));
        let hits = self.searches.get(query).cloned().unwrap_or_else(|| Ok(Vec::new()))?;
        Ok(hits.into_iter().take(page_size as usize).collect())
    }

    fn get_food(&self, fdc_id: u64) -> Result<FoodDetails, FetchError> {
        self.calls.borrow_mut().push(format!("food:{}", fdc_id));
        self.details
            .get(&fdc_id)
            .cloned()
            .unwrap_or(Err(FetchError::Status(404)))
    }
}

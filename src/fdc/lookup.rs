//! Food lookup
//!
//! Turns a food name into a normalized nutrient record: search for the name,
//! take the first candidate, fetch its full record and map the nutrient codes
//! we track. Nutrients the database does not report stay at zero.

use crate::models::NutrientRecord;
use crate::nutrition::nutrient_for_code;

use super::client::{FetchError, FoodDataSource, FoodDetails};

/// Only the best search candidate is ever used
pub const SEARCH_PAGE_SIZE: u32 = 1;

/// Result of looking up one food name
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found(NutrientRecord),
    /// The search matched no food
    NotFound,
    /// A request exceeded the timeout
    TimedOut,
    /// Any other transport, status or decoding failure
    TransportError { reason: String },
}

impl LookupOutcome {
    fn from_fetch_error(err: FetchError) -> Self {
        match err {
            FetchError::Timeout => LookupOutcome::TimedOut,
            other => LookupOutcome::TransportError {
                reason: other.to_string(),
            },
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, LookupOutcome::Found(_))
    }
}

/// Look up one food against any data source
///
/// Never fails outright: every failure is folded into the outcome so a batch
/// can carry on with the next food.
pub fn lookup_food<S>(source: &S, food_name: &str) -> LookupOutcome
where
    S: FoodDataSource + ?Sized,
{
    tracing::info!("Looking up '{}'", food_name);

    let hits = match source.search_foods(food_name, SEARCH_PAGE_SIZE) {
        Ok(hits) => hits,
        Err(e) => {
            tracing::warn!("Search for '{}' failed: {}", food_name, e);
            return LookupOutcome::from_fetch_error(e);
        }
    };

    let Some(best) = hits.into_iter().next() else {
        tracing::info!("No match for '{}'", food_name);
        return LookupOutcome::NotFound;
    };

    let details = match source.get_food(best.fdc_id) {
        Ok(details) => details,
        Err(e) => {
            tracing::warn!(
                "Fetching FDC {} for '{}' failed: {}",
                best.fdc_id,
                food_name,
                e
            );
            return LookupOutcome::from_fetch_error(e);
        }
    };

    tracing::debug!("'{}' matched FDC {} ({})", food_name, best.fdc_id, best.description);
    let name = if best.description.trim().is_empty() {
        food_name.to_string()
    } else {
        best.description
    };
    LookupOutcome::Found(build_record(name, &details))
}

/// Normalize a food record into the tracked nutrient fields
///
/// Amounts are copied exactly as reported. Entries without a nutrient id or
/// with an id we do not track are dropped.
pub fn build_record(name: impl Into<String>, details: &FoodDetails) -> NutrientRecord {
    let mut record = NutrientRecord::new(name);

    for entry in details.nutrients() {
        let Some(code) = entry.nutrient.as_ref().and_then(|n| n.id) else {
            continue;
        };
        match nutrient_for_code(code) {
            Some(nutrient) => record.nutrition.set(nutrient, entry.amount.unwrap_or(0.0)),
            None => tracing::trace!("Ignoring unmapped nutrient code {}", code),
        }
    }

    record
}

//! Aggregation across looked-up foods
//!
//! Joins the per-food records into one table and sums each nutrient.

use serde::Serialize;

use crate::models::{NutrientRecord, Nutrition};

/// Table of looked-up foods plus their per-nutrient totals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregate {
    /// Records in input order
    pub table: Vec<NutrientRecord>,
    pub totals: Nutrition,
}

/// Sum every nutrient across `records`
///
/// The name column takes no part in the totals. Callers short-circuit before
/// reaching here when no food was found.
pub fn aggregate(records: Vec<NutrientRecord>) -> Aggregate {
    let totals = records.iter().map(|r| &r.nutrition).sum();
    Aggregate {
        table: records,
        totals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Nutrient;

    fn record(name: &str, values: &[(Nutrient, f64)]) -> NutrientRecord {
        let mut r = NutrientRecord::new(name);
        for (n, v) in values {
            r.nutrition.set(*n, *v);
        }
        r
    }

    fn sample() -> Vec<NutrientRecord> {
        vec![
            record("Bananas, raw", &[(Nutrient::Energy, 89.0), (Nutrient::Protein, 1.09)]),
            record("Spinach, raw", &[(Nutrient::Iron, 2.71), (Nutrient::Calcium, 99.0)]),
            record(
                "Milk, whole",
                &[(Nutrient::Calcium, 123.0), (Nutrient::VitaminB12, 0.54), (Nutrient::Energy, 61.0)],
            ),
        ]
    }

    #[test]
    fn test_totals_sum_each_field() {
        let agg = aggregate(sample());
        assert!((agg.totals.energy_kcal - 150.0).abs() < 1e-9);
        assert!((agg.totals.calcium_mg - 222.0).abs() < 1e-9);
        assert!((agg.totals.iron_mg - 2.71).abs() < 1e-9);
        assert!((agg.totals.vitamin_b12_mcg - 0.54).abs() < 1e-9);
        assert_eq!(agg.totals.magnesium_mg, 0.0);
    }

    #[test]
    fn test_table_keeps_input_order() {
        let agg = aggregate(sample());
        let names: Vec<&str> = agg.table.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Bananas, raw", "Spinach, raw", "Milk, whole"]);
    }

    #[test]
    fn test_totals_independent_of_order() {
        let forward = aggregate(sample());
        let mut reversed_input = sample();
        reversed_input.reverse();
        let reversed = aggregate(reversed_input);
        for n in Nutrient::ALL {
            assert!((forward.totals.get(n) - reversed.totals.get(n)).abs() < 1e-9);
        }
        assert_eq!(reversed.table[0].name, "Milk, whole");
    }

    #[test]
    fn test_single_record_totals_equal_record() {
        let only = record("Bananas, raw", &[(Nutrient::Energy, 89.0), (Nutrient::Protein, 1.1)]);
        let agg = aggregate(vec![only.clone()]);
        assert_eq!(agg.totals, only.nutrition);
    }
}

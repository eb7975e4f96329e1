//! FoodData Central nutrient codes
//!
//! Maps the integer nutrient identifiers used by FoodData Central onto the
//! nutrients tracked by the analyzer. Codes outside this set are ignored by
//! callers: the database adds new codes over time and an unknown code is not
//! an error.

use crate::models::Nutrient;

/// Every mapped FDC nutrient code, in table column order
pub const NUTRIENT_CODES: [(u32, Nutrient); 10] = [
    (1008, Nutrient::Energy),
    (1003, Nutrient::Protein),
    (1004, Nutrient::TotalFat),
    (1079, Nutrient::Fiber),
    (2000, Nutrient::Sugars),
    (1087, Nutrient::Calcium),
    (1089, Nutrient::Iron),
    (1090, Nutrient::Magnesium),
    (1114, Nutrient::VitaminD),
    (1178, Nutrient::VitaminB12),
];

/// Look up the nutrient for an FDC nutrient code
pub fn nutrient_for_code(code: u32) -> Option<Nutrient> {
    NUTRIENT_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, nutrient)| *nutrient)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_and_lookup_agree() {
        for (code, nutrient) in NUTRIENT_CODES {
            assert_eq!(nutrient_for_code(code), Some(nutrient));
        }
    }

    #[test]
    fn test_every_nutrient_has_one_code() {
        for nutrient in Nutrient::ALL {
            let codes = NUTRIENT_CODES.iter().filter(|(_, n)| *n == nutrient).count();
            assert_eq!(codes, 1, "{} should have exactly one code", nutrient);
        }
    }

    #[test]
    fn test_known_codes() {
        assert_eq!(nutrient_for_code(1008), Some(Nutrient::Energy));
        assert_eq!(nutrient_for_code(1003), Some(Nutrient::Protein));
        assert_eq!(nutrient_for_code(1178), Some(Nutrient::VitaminB12));
    }

    #[test]
    fn test_unknown_codes_are_unmapped() {
        // Carbohydrate, by difference; not tracked
        assert_eq!(nutrient_for_code(1005), None);
        assert_eq!(nutrient_for_code(0), None);
        assert_eq!(nutrient_for_code(u32::MAX), None);
    }
}

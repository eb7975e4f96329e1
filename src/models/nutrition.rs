//! Shared nutrition data structures
//!
//! Used by lookups, aggregation, target evaluation and reports.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the ten nutrients tracked per food
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nutrient {
    Energy,
    Protein,
    TotalFat,
    Fiber,
    Sugars,
    Calcium,
    Iron,
    Magnesium,
    VitaminD,
    VitaminB12,
}

impl Nutrient {
    /// Every tracked nutrient, in table column order
    pub const ALL: [Nutrient; 10] = [
        Nutrient::Energy,
        Nutrient::Protein,
        Nutrient::TotalFat,
        Nutrient::Fiber,
        Nutrient::Sugars,
        Nutrient::Calcium,
        Nutrient::Iron,
        Nutrient::Magnesium,
        Nutrient::VitaminD,
        Nutrient::VitaminB12,
    ];

    /// Macronutrients, reported as raw totals
    pub const MACROS: [Nutrient; 5] = [
        Nutrient::Energy,
        Nutrient::Protein,
        Nutrient::TotalFat,
        Nutrient::Fiber,
        Nutrient::Sugars,
    ];

    /// Micronutrients, evaluated against daily targets
    pub const MICROS: [Nutrient; 5] = [
        Nutrient::Calcium,
        Nutrient::Iron,
        Nutrient::Magnesium,
        Nutrient::VitaminD,
        Nutrient::VitaminB12,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Nutrient::Energy => "Energy",
            Nutrient::Protein => "Protein",
            Nutrient::TotalFat => "Total Fat",
            Nutrient::Fiber => "Fiber",
            Nutrient::Sugars => "Sugars",
            Nutrient::Calcium => "Calcium",
            Nutrient::Iron => "Iron",
            Nutrient::Magnesium => "Magnesium",
            Nutrient::VitaminD => "Vitamin D",
            Nutrient::VitaminB12 => "Vitamin B12",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Nutrient::Energy => "kcal",
            Nutrient::Protein
            | Nutrient::TotalFat
            | Nutrient::Fiber
            | Nutrient::Sugars => "g",
            Nutrient::Calcium | Nutrient::Iron | Nutrient::Magnesium => "mg",
            Nutrient::VitaminD | Nutrient::VitaminB12 => "mcg",
        }
    }

    /// Display label with unit, e.g. "Energy (kcal)"
    pub fn label(&self) -> String {
        format!("{} ({})", self.name(), self.unit())
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.unit())
    }
}

/// Nutritional values, per 100 g for a single food or summed across foods
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub energy_kcal: f64,
    pub protein_g: f64,
    pub total_fat_g: f64,
    pub fiber_g: f64,
    pub sugars_g: f64,
    pub calcium_mg: f64,
    pub iron_mg: f64,
    pub magnesium_mg: f64,
    pub vitamin_d_mcg: f64,
    pub vitamin_b12_mcg: f64,
}

impl Nutrition {
    /// Create a new Nutrition with all zeros
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Energy => self.energy_kcal,
            Nutrient::Protein => self.protein_g,
            Nutrient::TotalFat => self.total_fat_g,
            Nutrient::Fiber => self.fiber_g,
            Nutrient::Sugars => self.sugars_g,
            Nutrient::Calcium => self.calcium_mg,
            Nutrient::Iron => self.iron_mg,
            Nutrient::Magnesium => self.magnesium_mg,
            Nutrient::VitaminD => self.vitamin_d_mcg,
            Nutrient::VitaminB12 => self.vitamin_b12_mcg,
        }
    }

    pub fn set(&mut self, nutrient: Nutrient, amount: f64) {
        let slot = match nutrient {
            Nutrient::Energy => &mut self.energy_kcal,
            Nutrient::Protein => &mut self.protein_g,
            Nutrient::TotalFat => &mut self.total_fat_g,
            Nutrient::Fiber => &mut self.fiber_g,
            Nutrient::Sugars => &mut self.sugars_g,
            Nutrient::Calcium => &mut self.calcium_mg,
            Nutrient::Iron => &mut self.iron_mg,
            Nutrient::Magnesium => &mut self.magnesium_mg,
            Nutrient::VitaminD => &mut self.vitamin_d_mcg,
            Nutrient::VitaminB12 => &mut self.vitamin_b12_mcg,
        };
        *slot = amount;
    }

    /// Add another nutrition to this one
    pub fn add(&self, other: &Nutrition) -> Self {
        let mut sum = *self;
        for nutrient in Nutrient::ALL {
            sum.set(nutrient, self.get(nutrient) + other.get(nutrient));
        }
        sum
    }
}

impl std::ops::Add for Nutrition {
    type Output = Nutrition;

    fn add(self, other: Nutrition) -> Nutrition {
        Nutrition::add(&self, &other)
    }
}

impl std::iter::Sum for Nutrition {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Nutrition::zero(), |acc, n| acc + n)
    }
}

impl<'a> std::iter::Sum<&'a Nutrition> for Nutrition {
    fn sum<I: Iterator<Item = &'a Nutrition>>(iter: I) -> Self {
        iter.fold(Nutrition::zero(), |acc, n| acc + *n)
    }
}

/// One food's nutritional profile as reported by FoodData Central
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientRecord {
    /// Description returned by the database, not the query string
    pub name: String,
    #[serde(flatten)]
    pub nutrition: Nutrition,
}

impl NutrientRecord {
    /// A record with every nutrient defaulted to zero
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nutrition: Nutrition::zero(),
        }
    }

    pub fn get(&self, nutrient: Nutrient) -> f64 {
        self.nutrition.get(nutrient)
    }
}

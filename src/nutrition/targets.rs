//! Prenatal daily targets
//!
//! Compares summed micronutrient intake against daily recommendations.

use serde::Serialize;

use crate::models::{AgeGroup, Nutrient, Nutrition};

pub const CALCIUM_TARGET_MG: f64 = 1000.0;
pub const IRON_TARGET_MG: f64 = 27.0;
pub const MAGNESIUM_TARGET_18_30_MG: f64 = 350.0;
pub const MAGNESIUM_TARGET_31_47_MG: f64 = 360.0;
pub const VITAMIN_D_TARGET_MCG: f64 = 15.0;
pub const VITAMIN_B12_TARGET_MCG: f64 = 2.6;

/// Daily recommended amount of a micronutrient, or None for macronutrients
pub fn daily_target(nutrient: Nutrient, age_group: AgeGroup) -> Option<f64> {
    match nutrient {
        Nutrient::Calcium => Some(CALCIUM_TARGET_MG),
        Nutrient::Iron => Some(IRON_TARGET_MG),
        Nutrient::Magnesium => Some(match age_group {
            AgeGroup::Age18To30 => MAGNESIUM_TARGET_18_30_MG,
            AgeGroup::Age31To47 => MAGNESIUM_TARGET_31_47_MG,
        }),
        Nutrient::VitaminD => Some(VITAMIN_D_TARGET_MCG),
        Nutrient::VitaminB12 => Some(VITAMIN_B12_TARGET_MCG),
        Nutrient::Energy
        | Nutrient::Protein
        | Nutrient::TotalFat
        | Nutrient::Fiber
        | Nutrient::Sugars => None,
    }
}

/// Intake of one micronutrient as a share of its daily target
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TargetProgress {
    pub nutrient: Nutrient,
    /// Not clamped: values over 100 mean the target was exceeded
    pub percent: f64,
    pub target: f64,
}

impl TargetProgress {
    pub fn is_met(&self) -> bool {
        self.percent >= 100.0
    }
}

/// Percent-of-target for each micronutrient
///
/// Rows always come back as Calcium, Iron, Magnesium, Vitamin D, Vitamin B12.
pub fn evaluate(totals: &Nutrition, age_group: AgeGroup) -> Vec<TargetProgress> {
    Nutrient::MICROS
        .iter()
        .filter_map(|&nutrient| {
            let target = daily_target(nutrient, age_group)?;
            let percent = totals.get(nutrient) / target * 100.0;
            if percent > 100.0 {
                tracing::debug!(
                    "{} at {:.1}% of daily target ({})",
                    nutrient,
                    percent,
                    target
                );
            }
            Some(TargetProgress {
                nutrient,
                percent,
                target,
            })
        })
        .collect()
}

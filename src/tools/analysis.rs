//! Diet analysis tools
//!
//! Runs the lookup pipeline over a food list and assembles the report.

use serde::Serialize;
use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::fdc::{lookup_food, FdcClient, FdcClientConfig, FoodDataSource, LookupOutcome};
use crate::models::{AgeGroup, FoodList, Nutrient, NutrientRecord, Nutrition};
use crate::nutrition::{aggregate, evaluate, TargetProgress};

// ============================================================================
// Report Types
// ============================================================================

/// Why a food was left out of the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupFailure {
    NotFound,
    TimedOut,
    TransportError,
}

/// Per-food notice for a failed lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupWarning {
    /// The name as entered, not as the database spells it
    pub food: String,
    pub failure: LookupFailure,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl LookupWarning {
    fn new(food: &str, failure: LookupFailure, detail: Option<String>) -> Self {
        let message = match failure {
            LookupFailure::NotFound => format!("Food not found: '{}' - Skipping.", food),
            LookupFailure::TimedOut => format!("Timeout: '{}' took too long - Skipping.", food),
            LookupFailure::TransportError => format!("Connection error for: '{}' - Skipping.", food),
        };
        Self {
            food: food.to_string(),
            failure,
            message,
            detail,
        }
    }
}

/// Table, totals and target progress for one analysis run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateReport {
    pub age_group: AgeGroup,
    /// One row per food found, in list order
    pub table: Vec<NutrientRecord>,
    pub totals: Nutrition,
    pub target_percentages: Vec<TargetProgress>,
}

impl AggregateReport {
    /// Aggregate found records and evaluate them against the daily targets
    pub fn build(records: Vec<NutrientRecord>, age_group: AgeGroup) -> Self {
        let aggregate = aggregate(records);
        let target_percentages = evaluate(&aggregate.totals, age_group);
        Self {
            age_group,
            table: aggregate.table,
            totals: aggregate.totals,
            target_percentages,
        }
    }

    /// Table rows numbered from 1
    pub fn rows(&self) -> impl Iterator<Item = (usize, &NutrientRecord)> {
        self.table.iter().enumerate().map(|(i, r)| (i + 1, r))
    }

    pub fn macro_totals(&self) -> Vec<(Nutrient, f64)> {
        Nutrient::MACROS
            .iter()
            .map(|n| (*n, self.totals.get(*n)))
            .collect()
    }
}

/// A completed analysis: the report plus any foods that were skipped
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRun {
    pub report: AggregateReport,
    pub warnings: Vec<LookupWarning>,
}

/// Conditions that stop an analysis run
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("Please add at least one food to the list.")]
    EmptyFoodList,

    #[error(transparent)]
    MissingCredential(#[from] ConfigError),

    #[error("Could not build HTTP client: {0}")]
    Client(String),

    #[error("Could not retrieve data. Please check spelling or internet connection.")]
    NoSuccessfulLookups { warnings: Vec<LookupWarning> },
}

impl AnalysisError {
    /// Per-food warnings gathered before the run stopped
    pub fn warnings(&self) -> &[LookupWarning] {
        match self {
            AnalysisError::NoSuccessfulLookups { warnings } => warnings,
            _ => &[],
        }
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Analyze the food list against FoodData Central
///
/// An empty list or a missing API key stops the run before any request is made.
pub fn analyze(foods: &FoodList, age_group: AgeGroup, config: &Config) -> Result<AnalysisRun, AnalysisError> {
    if foods.is_empty() {
        return Err(AnalysisError::EmptyFoodList);
    }

    let client_config = FdcClientConfig::from_config(config)?;
    let client = FdcClient::new(client_config).map_err(|e| AnalysisError::Client(e.to_string()))?;

    analyze_with(foods, age_group, &client)
}

/// Analyze the food list against any data source
///
/// Foods are looked up one at a time in list order. A failed lookup becomes a
/// warning and the food is skipped.
pub fn analyze_with<S>(foods: &FoodList, age_group: AgeGroup, source: &S) -> Result<AnalysisRun, AnalysisError>
where
    S: FoodDataSource + ?Sized,
{
    if foods.is_empty() {
        return Err(AnalysisError::EmptyFoodList);
    }

    let mut records = Vec::with_capacity(foods.len());
    let mut warnings = Vec::new();

    for food in foods.iter() {
        let warning = match lookup_food(source, food) {
            LookupOutcome::Found(record) => {
                records.push(record);
                continue;
            }
            LookupOutcome::NotFound => LookupWarning::new(food, LookupFailure::NotFound, None),
            LookupOutcome::TimedOut => LookupWarning::new(food, LookupFailure::TimedOut, None),
            LookupOutcome::TransportError { reason } => {
                LookupWarning::new(food, LookupFailure::TransportError, Some(reason))
            }
        };
        tracing::warn!("{}", warning.message);
        warnings.push(warning);
    }

    if records.is_empty() {
        tracing::warn!("No food in a list of {} could be looked up", foods.len());
        return Err(AnalysisError::NoSuccessfulLookups { warnings });
    }

    tracing::info!(
        "Analyzed {} of {} foods for age group {}",
        records.len(),
        foods.len(),
        age_group
    );

    Ok(AnalysisRun {
        report: AggregateReport::build(records, age_group),
        warnings,
    })
}

// ============================================================================
// Text Rendering
// ============================================================================

const NAME_WIDTH: usize = 60;

/// Shorten a food name to `max` characters, ending in "..." when cut
pub(crate) fn truncate_name(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        name.to_string()
    } else {
        let mut out: String = name.chars().take(max.saturating_sub(3)).collect();
        out.push_str("...");
        out
    }
}

/// Plain-text rendering of an analysis run
pub fn render_text(run: &AnalysisRun) -> String {
    let report = &run.report;
    let mut out = String::new();

    for warning in &run.warnings {
        out.push_str(&format!("WARNING: {}\n", warning.message));
    }
    if !run.warnings.is_empty() {
        out.push('\n');
    }

    out.push_str("Nutritional Values Table\n");
    out.push_str("All values are per 100g of the food product.\n");
    for (i, record) in report.rows() {
        out.push_str(&format!("{:>3}. {}\n", i, truncate_name(&record.name, NAME_WIDTH)));
        let values: Vec<String> = Nutrient::ALL
            .iter()
            .map(|n| format!("{} {}", n.label(), format_amount(record.get(*n))))
            .collect();
        out.push_str(&format!("     {}\n", values.join(", ")));
    }

    out.push_str("\n1. Macronutrients Analysis (Total Amount)\n");
    for (nutrient, total) in report.macro_totals() {
        out.push_str(&format!("  {:<18} {:>10.1}\n", nutrient.label(), total));
    }

    out.push_str(&format!(
        "\n2. Micronutrients vs. Daily Recommendation (age group {})\n",
        report.age_group
    ));
    for progress in &report.target_percentages {
        out.push_str(&format!(
            "  {:<18} {:>7.1}%  (Rec: {}){}\n",
            progress.nutrient.label(),
            progress.percent,
            format_amount(progress.target),
            if progress.is_met() { "  *" } else { "" }
        ));
    }

    out
}

/// Format without a trailing ".0" on whole numbers
pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        let s = format!("{:.3}", value);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

//! PDA Status Tool
//!
//! Runtime status and usage instructions for the PDA service.

use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Diet analysis instructions for AI assistants
pub const DIET_INSTRUCTIONS: &str = r#"
# PDA Diet Analysis Instructions

The Prenatal Diet Analyzer looks foods up in USDA FoodData Central and compares
the combined micronutrients against prenatal daily recommendations.

## Workflow

1. Ask for the mother's age group: `18-30` or `31-47` (default `18-30`).
2. Queue foods one at a time with `add_food` (English names, e.g. "banana",
   "greek yogurt", "spinach raw"). Duplicates are rejected case-insensitively.
3. Check the queue with `list_foods`; start over with `clear_foods`.
4. Call `analyze_diet` with the age group.
5. Optionally call `generate_diet_report` to write a PDF with both charts.

## Reading the Results

- Every value in the table is **per 100 g** of the food, as reported by USDA.
  The analyzer does not scale by portion size.
- Each food is matched to the **first** USDA search result. The table shows
  the USDA description so the user can check the match.
- Macronutrients (energy, protein, fat, fiber, sugars) are summed totals with
  no target.
- Micronutrients are shown as percent of the daily recommendation:

| Nutrient | Daily target |
|----------|--------------|
| Calcium | 1000 mg |
| Iron | 27 mg |
| Magnesium | 350 mg (18-30) / 360 mg (31-47) |
| Vitamin D | 15 mcg |
| Vitamin B12 | 2.6 mcg |

  Percentages are not capped; values above 100% mean the target is exceeded.

## Warnings and Errors

- `Food not found` - USDA has no match; suggest a different spelling.
- `Timeout` - the lookup took longer than 30 seconds; try again later.
- `Connection error` - network or API failure for that food.
- Foods with warnings are skipped; the rest of the list is still analyzed.
- If every food fails, no report is produced.
- If the API key is missing, nothing is looked up: the server operator must
  set `USDA_API_KEY`.
"#;

/// Runtime status of the PDA service
#[derive(Debug, Clone, Serialize)]
pub struct PdaStatus {
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Whether a FoodData Central API key is configured
    pub api_key_configured: bool,
    pub foods_queued: usize,

    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
}

impl StatusTracker {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    pub fn get_status(&self, api_key_configured: bool, foods_queued: usize) -> PdaStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        PdaStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            api_key_configured,
            foods_queued,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

impl Default for StatusTracker {
    fn default() -> Self {
        Self::new()
    }
}

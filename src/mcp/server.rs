//! PDA MCP Server Implementation
//!
//! Implements the MCP server with the food list, analysis and report tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::config::Config;
use crate::models::{AgeGroup, FoodList};
use crate::tools::analysis::{self, AnalysisError, AnalysisRun, LookupWarning};
use crate::tools::food_list;
use crate::tools::reports;
use crate::tools::status::StatusTracker;

/// PDA MCP Service
#[derive(Clone)]
pub struct PdaService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    config: Config,
    /// Foods queued for the next analysis
    food_list: Arc<std::sync::Mutex<FoodList>>,
    tool_router: ToolRouter<PdaService>,
}

impl PdaService {
    pub fn new(config: Config) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new())),
            config,
            food_list: Arc::new(std::sync::Mutex::new(FoodList::new())),
            tool_router: Self::tool_router(),
        }
    }

    fn with_food_list<T>(&self, f: impl FnOnce(&mut FoodList) -> T) -> Result<T, McpError> {
        let mut list = self
            .food_list
            .lock()
            .map_err(|_| McpError::internal_error("Food list lock poisoned", None))?;
        Ok(f(&mut list))
    }

    /// Snapshot the queued foods and run the analysis on a blocking thread
    async fn run_analysis(&self, age_group: AgeGroup) -> Result<Result<AnalysisRun, AnalysisError>, McpError> {
        let foods = self.with_food_list(|list| list.clone())?;
        let config = self.config.clone();

        tokio::task::spawn_blocking(move || analysis::analyze(&foods, age_group, &config))
            .await
            .map_err(|e| McpError::internal_error(format!("Analysis task failed: {}", e), None))
    }
}

// ============================================================================
// Response Structs
// ============================================================================

#[derive(Debug, Serialize)]
struct AnalyzeDietResponse {
    success: bool,
    summary: String,
    #[serde(flatten)]
    run: AnalysisRun,
}

#[derive(Debug, Serialize)]
struct AnalysisFailedResponse {
    success: bool,
    error: String,
    warnings: Vec<LookupWarning>,
}

impl From<AnalysisError> for AnalysisFailedResponse {
    fn from(e: AnalysisError) -> Self {
        Self {
            success: false,
            warnings: e.warnings().to_vec(),
            error: e.to_string(),
        }
    }
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddFoodParams {
    /// Food name as it would be typed into a search box (e.g., "Banana")
    pub name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AnalyzeDietParams {
    /// Age group: "18-30" or "31-47" (default: "18-30")
    pub age_group: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GenerateDietReportParams {
    /// Age group: "18-30" or "31-47" (default: "18-30")
    pub age_group: Option<String>,
    /// Output path for the PDF (default: timestamped file in the report directory)
    pub output_path: Option<String>,
}

fn parse_age_group(value: Option<&str>) -> Result<AgeGroup, McpError> {
    match value {
        None => Ok(AgeGroup::default()),
        Some(s) => AgeGroup::from_str(s).ok_or_else(|| {
            McpError::invalid_params(
                format!("Unknown age group '{}'. Use \"18-30\" or \"31-47\".", s),
                None,
            )
        }),
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn analysis_failed(e: AnalysisError) -> Result<CallToolResult, McpError> {
    let body = AnalysisFailedResponse::from(e);
    let json = serde_json::to_string_pretty(&body)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::error(vec![Content::text(json)]))
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl PdaService {
    // --- Status ---

    #[tool(description = "Get the current status of the PDA service including build info, API key presence, queued foods and process information")]
    async fn pda_status(&self) -> Result<CallToolResult, McpError> {
        let foods_queued = self.with_food_list(|list| list.len())?;
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status(self.config.api_key.is_some(), foods_queued);
        json_result(&status)
    }

    #[tool(description = "Get step-by-step instructions for analyzing a diet. Call this when starting a session or when unsure how to use the diet tools.")]
    fn diet_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::DIET_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(DIET_INSTRUCTIONS)]))
    }

    // --- Food List ---

    #[tool(description = "Add a food to the list for analysis. Blank names and duplicates (case-insensitive) are rejected.")]
    fn add_food(&self, Parameters(p): Parameters<AddFoodParams>) -> Result<CallToolResult, McpError> {
        let result = self.with_food_list(|list| food_list::add_food(list, &p.name))?;
        json_result(&result)
    }

    #[tool(description = "List the foods queued for analysis in the order they were added")]
    fn list_foods(&self) -> Result<CallToolResult, McpError> {
        let result = self.with_food_list(|list| food_list::list_foods(list))?;
        json_result(&result)
    }

    #[tool(description = "Remove every food from the list")]
    fn clear_foods(&self) -> Result<CallToolResult, McpError> {
        let result = self.with_food_list(food_list::clear_foods)?;
        json_result(&result)
    }

    // --- Analysis ---

    #[tool(description = "Look up every queued food in USDA FoodData Central (values per 100 g), total the nutrients and compare micronutrients against the daily recommendation for the age group. Foods that cannot be found are skipped with a warning.")]
    async fn analyze_diet(&self, Parameters(p): Parameters<AnalyzeDietParams>) -> Result<CallToolResult, McpError> {
        let age_group = parse_age_group(p.age_group.as_deref())?;

        match self.run_analysis(age_group).await? {
            Ok(run) => json_result(&AnalyzeDietResponse {
                success: true,
                summary: analysis::render_text(&run),
                run,
            }),
            Err(e) => analysis_failed(e),
        }
    }

    #[tool(description = "Analyze the queued foods and write a PDF report with the nutrient table, micronutrient progress and both charts")]
    async fn generate_diet_report(&self, Parameters(p): Parameters<GenerateDietReportParams>) -> Result<CallToolResult, McpError> {
        let age_group = parse_age_group(p.age_group.as_deref())?;

        let run = match self.run_analysis(age_group).await? {
            Ok(run) => run,
            Err(e) => return analysis_failed(e),
        };

        let output_path = p.output_path.map(PathBuf::from).unwrap_or_else(|| {
            reports::default_report_path(&self.config.report_dir, chrono::Local::now())
        });
        let output_path = output_path.display().to_string();

        let result = tokio::task::spawn_blocking(move || reports::generate_diet_report(&run, &output_path))
            .await
            .map_err(|e| McpError::internal_error(format!("Report task failed: {}", e), None))?
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for PdaService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "pda".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Prenatal Diet Analyzer".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Prenatal Diet Analyzer (PDA) - Nutrient totals for a list of foods from USDA FoodData Central. \
                 IMPORTANT: Call diet_instructions first. \
                 Food list: add_food/list_foods/clear_foods. \
                 Analysis: analyze_diet (age_group \"18-30\" or \"31-47\"), generate_diet_report for a PDF. \
                 All values are per 100 g. Requires USDA_API_KEY in the server environment."
                    .into(),
            ),
        }
    }
}

//! Prenatal Diet Analyzer (PDA)
//!
//! An MCP server for checking a list of foods against prenatal nutrient targets.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use pda::build_info;
use pda::config::{Config, API_KEY_VAR};
use pda::mcp::PdaService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("pda=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    // Print startup banner to stderr
    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let config = Config::from_env();
    eprintln!("FoodData Central: {}", config.base_url);
    eprintln!("Report directory: {}", config.report_dir.display());
    if config.api_key.is_none() {
        tracing::warn!("{} is not set; analysis tools will fail until it is", API_KEY_VAR);
    }

    // Create the PDA service
    let service = PdaService::new(config);

    // Create stdio transport
    let transport = (stdin(), stdout());

    // Start the MCP server
    let server = service.serve(transport).await?;

    // Wait for the server to complete
    server.waiting().await?;

    Ok(())
}

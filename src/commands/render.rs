//! Render command implementation.
//!
//! The render command:
//! 1. Loads the storm event CSV
//! 2. Derives fields and builds segments
//! 3. Aggregates the dashboard summary
//! 4. Renders the HTML page
//! 5. Writes output files

use super::models::RenderArgs;
use crate::aggregator::{build_summary, DashboardSummary};
use crate::dashboard::{generate_text_summary, render_dashboard, DashboardConfig};
use crate::output::{write_dashboard, write_summary};
use crate::parser::load_events;
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::Path;
use std::time::Instant;

/// Execute the render command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Missing or malformed input file
/// * File write errors
pub fn execute_render(args: RenderArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Rendering dashboard from: {}", args.input.display());

    // Steps 1-3: load, derive, aggregate
    let summary = load_summary(&args.input)?;

    // Step 4: render page
    info!("Step 4/5: Rendering {:?} layout...", args.dashboard_config.variant);
    let html = render_dashboard(&summary, &args.dashboard_config);

    // Step 5: write outputs
    info!("Step 5/5: Writing output files...");
    write_dashboard(&html, &args.output_html).context("Failed to write dashboard HTML")?;
    info!("✓ Dashboard written to: {}", args.output_html.display());

    if let Some(json_path) = &args.output_json {
        write_summary(&summary, json_path).context("Failed to write summary JSON")?;
        info!("✓ Summary written to: {}", json_path.display());
    }

    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("FLASH FLOOD SUMMARY");
        println!("{}", "=".repeat(80));
        println!("Source:    {}", summary.source);
        println!("{}", summary.summary());
        println!("\n{}", generate_text_summary(&summary, 10));
        println!("{}", "=".repeat(80));
    }

    let elapsed = start_time.elapsed();
    info!("Render completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Load the CSV and aggregate it into a summary
///
/// **Public** - shared by the render and serve commands
pub fn load_summary(input: &Path) -> Result<DashboardSummary> {
    info!("Step 1/5: Loading storm events...");
    let batch = load_events(input)
        .with_context(|| format!("Failed to load storm events from {}", input.display()))?;

    info!("Step 2/5: Derived fields for {} events", batch.len());

    info!("Step 3/5: Aggregating segments...");
    let source = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());
    let summary = build_summary(&batch, source);

    debug!("{}", summary.summary());

    Ok(summary)
}

/// Validate render arguments
///
/// **Public** - can be called before execute_render for early validation
pub fn validate_args(args: &RenderArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if args.output_html.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    if args.output_json.as_deref() == Some(args.output_html.as_path()) {
        anyhow::bail!("HTML and JSON outputs must be different files");
    }

    validate_dashboard_config(&args.dashboard_config)
}

/// Validate the titles and map link
///
/// **Public** - shared with the serve command
pub fn validate_dashboard_config(config: &DashboardConfig) -> Result<()> {
    if config.page_title.trim().is_empty() {
        anyhow::bail!("Page title cannot be empty");
    }

    if config.brand().trim().is_empty() {
        anyhow::bail!("Dashboard brand cannot be empty");
    }

    if !config.map_url.starts_with("http://") && !config.map_url.starts_with("https://") {
        anyhow::bail!("Map URL must start with http:// or https://");
    }

    Ok(())
}

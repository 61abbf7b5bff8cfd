//! Flash Flood Dashboard CLI
//!
//! Turns a storm event CSV export into an interactive flash-flood
//! dashboard, either written to disk or served over HTTP.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::net::IpAddr;
use std::path::PathBuf;

use flashflood_dashboard::commands::{
    display_columns, display_version, execute_render, execute_serve, validate_args,
    validate_summary_file, RenderArgs, ServeArgs,
};
use flashflood_dashboard::dashboard::{DashboardConfig, DashboardVariant};
use flashflood_dashboard::utils::config::{DEFAULT_INPUT_PATH, DEFAULT_PAGE_TITLE};

/// Flash Flood Dashboard - storm event analytics
#[derive(Parser, Debug)]
#[command(name = "flashflood")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Render the dashboard to an HTML file
    Render {
        /// Storm event CSV export
        #[arg(short, long, env = "FLASHFLOOD_INPUT", default_value = DEFAULT_INPUT_PATH)]
        input: PathBuf,

        /// Output path for the HTML dashboard
        #[arg(short, long, default_value = "dashboard.html")]
        output: PathBuf,

        /// Output path for the JSON summary (optional)
        #[arg(short, long)]
        json: Option<PathBuf>,

        /// Page layout
        #[arg(long, value_enum, default_value_t = DashboardVariant::Bootstrap)]
        variant: DashboardVariant,

        /// Browser tab title
        #[arg(long, default_value = DEFAULT_PAGE_TITLE)]
        page_title: String,

        /// Header text (defaults to the variant's heading)
        #[arg(long)]
        brand: Option<String>,

        /// Hosted map page embedded in the map tab
        #[arg(long)]
        map_url: Option<String>,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Serve the dashboard over HTTP
    Serve {
        /// Storm event CSV export
        #[arg(short, long, env = "FLASHFLOOD_INPUT", default_value = DEFAULT_INPUT_PATH)]
        input: PathBuf,

        /// Page layout; also picks the default bind address
        #[arg(long, value_enum, default_value_t = DashboardVariant::Bootstrap)]
        variant: DashboardVariant,

        /// Bind host (127.0.0.1 for classic, 0.0.0.0 for bootstrap)
        #[arg(long, env = "FLASHFLOOD_HOST")]
        host: Option<IpAddr>,

        /// Bind port (8050 for classic, 10000 for bootstrap)
        #[arg(short, long, env = "FLASHFLOOD_PORT")]
        port: Option<u16>,

        /// Browser tab title
        #[arg(long, default_value = DEFAULT_PAGE_TITLE)]
        page_title: String,

        /// Header text (defaults to the variant's heading)
        #[arg(long)]
        brand: Option<String>,

        /// Hosted map page embedded in the map tab
        #[arg(long)]
        map_url: Option<String>,
    },

    /// Validate a summary JSON file
    Validate {
        /// Path to summary JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display the expected CSV columns
    Columns {
        /// Show derived field details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Render {
            input,
            output,
            json,
            variant,
            page_title,
            brand,
            map_url,
            summary,
        } => {
            let args = RenderArgs {
                input,
                output_html: output,
                output_json: json,
                dashboard_config: dashboard_config(variant, page_title, brand, map_url),
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            execute_render(args)?;
        }

        Commands::Serve {
            input,
            variant,
            host,
            port,
            page_title,
            brand,
            map_url,
        } => {
            let args = ServeArgs {
                input,
                host,
                port,
                dashboard_config: dashboard_config(variant, page_title, brand, map_url),
            };

            execute_serve(args)?;
        }

        Commands::Validate { file } => {
            validate_summary_file(file)?;
        }

        Commands::Columns { show } => {
            display_columns(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Build the page config from optional CLI overrides
///
/// **Private** - shared by render and serve
fn dashboard_config(
    variant: DashboardVariant,
    page_title: String,
    brand: Option<String>,
    map_url: Option<String>,
) -> DashboardConfig {
    let mut config = DashboardConfig::new()
        .with_variant(variant)
        .with_page_title(page_title);

    if let Some(brand) = brand {
        config = config.with_brand(brand);
    }

    if let Some(map_url) = map_url {
        config = config.with_map_url(map_url);
    }

    config
}

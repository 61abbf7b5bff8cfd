use crate::dashboard::DashboardConfig;
use crate::utils::config::{DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH};
use std::net::IpAddr;
use std::path::PathBuf;

/// Arguments for the render command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct RenderArgs {
    /// Storm event CSV to load
    pub input: PathBuf,

    /// Output path for the HTML dashboard
    pub output_html: PathBuf,

    /// Output path for the JSON summary (optional)
    pub output_json: Option<PathBuf>,

    /// Page title, map link and layout
    pub dashboard_config: DashboardConfig,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for RenderArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_PATH),
            output_html: PathBuf::from(DEFAULT_OUTPUT_PATH),
            output_json: None,
            dashboard_config: DashboardConfig::default(),
            print_summary: false,
        }
    }
}

/// Arguments for the serve command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ServeArgs {
    /// Storm event CSV to load
    pub input: PathBuf,

    /// Bind host; the variant's default when absent
    pub host: Option<IpAddr>,

    /// Bind port; the variant's default when absent
    pub port: Option<u16>,

    /// Page title, map link and layout
    pub dashboard_config: DashboardConfig,
}

impl Default for ServeArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_PATH),
            host: None,
            port: None,
            dashboard_config: DashboardConfig::default(),
        }
    }
}

impl ServeArgs {
    /// Host and port to bind, falling back to the variant's defaults
    pub fn bind_address(&self) -> (IpAddr, u16) {
        let (default_host, default_port) = self.dashboard_config.variant.default_bind();
        (
            self.host.unwrap_or(default_host),
            self.port.unwrap_or(default_port),
        )
    }
}

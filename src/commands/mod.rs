//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod models;
pub mod render;
pub mod serve;
pub mod utils;

// Re-export main command functions
pub use models::{RenderArgs, ServeArgs};
pub use render::{execute_render, load_summary, validate_args, validate_dashboard_config};
pub use serve::execute_serve;
pub use utils::{display_columns, display_version, validate_summary_file};

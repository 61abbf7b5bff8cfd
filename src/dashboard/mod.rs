//! Dashboard presentation over the aggregated summary.
//!
//! This module turns a `DashboardSummary` into:
//! - Plotly figures, one per chart (with placeholders for empty series)
//! - Tab layouts for the classic and bootstrap variants
//! - A complete HTML page
//! - A plain-text terminal summary

pub mod charts;
pub mod layout;
pub mod render;
pub mod text;

// Re-export main types
pub use charts::{build_figure, ChartKind, Figure};
pub use layout::{DashboardVariant, Panel, Tab};
pub use render::{escape_html, render_dashboard, DashboardConfig};
pub use text::generate_text_summary;

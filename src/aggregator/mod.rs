//! Aggregation of the derived batch into chart-ready series.
//!
//! This module transforms the event batch and its segments into:
//! - Grouped counts and sums (by year, month, location, timestamp, hour)
//! - Point series and duration statistics
//! - The serializable dashboard summary

pub mod metrics;
pub mod series;
pub mod summary;

// Re-export main types and functions
pub use metrics::{
    casualties_per_year, cumulative_events, damage_per_year, events_per_month, events_per_year,
    hourly_histogram, top_locations_by_count, top_locations_by_damage,
};
pub use series::{damage_over_time, damage_vs_duration, duration_summary, log_damage};
pub use summary::{build_summary, DashboardSummary, SegmentCounts};

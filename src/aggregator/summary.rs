//! Serializable snapshot of every aggregation the dashboard draws.
//!
//! The summary is computed once from the immutable batch and is the only
//! input of the presentation layer. It is also written to disk as JSON.

use super::metrics::{
    add_damage, casualties_per_year, cumulative_events, damage_per_year, events_per_month,
    events_per_year, hourly_histogram, top_locations_by_count, top_locations_by_damage,
    CumulativePoint, HourBucket, LocationCount, LocationDamage, MonthCount, YearCasualties,
    YearCount, YearDamage,
};
use super::series::{
    damage_over_time, damage_vs_duration, duration_summary, DamageDurationPoint, DamagePoint,
    DurationStats,
};
use crate::parser::schema::EventBatch;
use crate::segment::Segments;
use crate::utils::config::{SCHEMA_VERSION, TOP_LOCATIONS};
use log::debug;
use serde::{Deserialize, Serialize};

/// Record counts of the full batch and each segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentCounts {
    pub total: usize,
    pub geocoded: usize,
    pub damaging: usize,
    pub impactful: usize,
}

/// Top-level summary structure written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Schema version for compatibility checking
    pub version: String,

    /// Input file the batch was loaded from
    pub source: String,

    /// Timestamp when the summary was generated
    pub generated_at: String,

    pub counts: SegmentCounts,

    pub events_per_year: Vec<YearCount>,
    pub events_per_month: Vec<MonthCount>,
    pub top_locations: Vec<LocationCount>,
    pub duration_stats: Option<DurationStats>,
    pub cumulative_events: Vec<CumulativePoint>,
    pub hourly_histogram: Vec<HourBucket>,

    // Damaging segment
    pub damage_over_time: Vec<DamagePoint>,
    pub damage_vs_duration: Vec<DamageDurationPoint>,
    pub top_damage_locations: Vec<LocationDamage>,
    pub damage_per_year: Vec<YearDamage>,

    // Impactful segment
    pub casualties_per_year: Vec<YearCasualties>,
}

/// Run every reduction over the batch and its segments
///
/// **Public** - main entry point for aggregation
pub fn build_summary(batch: &EventBatch, source: impl Into<String>) -> DashboardSummary {
    let segments = Segments::from_batch(batch);

    debug!(
        "Building summary: {} events, {} geocoded, {} damaging, {} impactful",
        batch.len(),
        segments.geocoded.len(),
        segments.damaging.len(),
        segments.impactful.len()
    );

    DashboardSummary {
        version: SCHEMA_VERSION.to_string(),
        source: source.into(),
        generated_at: chrono::Utc::now().to_rfc3339(),
        counts: SegmentCounts {
            total: batch.len(),
            geocoded: segments.geocoded.len(),
            damaging: segments.damaging.len(),
            impactful: segments.impactful.len(),
        },
        events_per_year: events_per_year(batch),
        events_per_month: events_per_month(batch),
        top_locations: top_locations_by_count(batch, TOP_LOCATIONS),
        duration_stats: duration_summary(batch),
        cumulative_events: cumulative_events(batch),
        hourly_histogram: hourly_histogram(batch),
        damage_over_time: damage_over_time(segments.damaging.iter()),
        damage_vs_duration: damage_vs_duration(segments.damaging.iter()),
        top_damage_locations: top_locations_by_damage(segments.damaging.iter(), TOP_LOCATIONS),
        damage_per_year: damage_per_year(segments.damaging.iter()),
        casualties_per_year: casualties_per_year(segments.impactful.iter()),
    }
}

impl DashboardSummary {
    /// Get human-readable summary
    ///
    /// **Public** - for logging and the `--summary` flag
    pub fn summary(&self) -> String {
        let years = match (self.events_per_year.first(), self.events_per_year.last()) {
            (Some(first), Some(last)) => format!("{}-{}", first.year, last.year),
            _ => "none".to_string(),
        };
        format!(
            "Events: {} | Years: {} | Geocoded: {} | Damaging: {} | Impactful: {}",
            self.counts.total,
            years,
            self.counts.geocoded,
            self.counts.damaging,
            self.counts.impactful
        )
    }

    /// Total property damage across the damaging segment
    pub fn total_damage(&self) -> f64 {
        self.damage_per_year.iter().fold(0.0, |mut total, y| {
            add_damage(&mut total, y.damage);
            total
        })
    }
}

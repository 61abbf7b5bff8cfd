//! Chart catalogue: one Plotly figure per dashboard chart.
//!
//! Figures are plain `data` + `layout` JSON handed to plotly.js by the
//! rendered page. A chart whose backing series is empty becomes a titled
//! placeholder with no traces.

use crate::aggregator::summary::DashboardSummary;
use crate::utils::config::BUBBLE_SIZE_MAX;
use serde::Serialize;
use serde_json::{json, Value};

/// Every chart the dashboard can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    AnnualEvents,
    MonthlyDistribution,
    DamageOverTime,
    TopLocations,
    DurationDistribution,
    DamageVsDuration,
    CumulativeEvents,
    HumanImpact,
    HourlyDistribution,
    DamageByLocation,
    YearlyDamage,
}

impl ChartKind {
    pub const ALL: [ChartKind; 11] = [
        Self::AnnualEvents,
        Self::MonthlyDistribution,
        Self::DamageOverTime,
        Self::TopLocations,
        Self::DurationDistribution,
        Self::DamageVsDuration,
        Self::CumulativeEvents,
        Self::HumanImpact,
        Self::HourlyDistribution,
        Self::DamageByLocation,
        Self::YearlyDamage,
    ];

    /// Stable identifier, used for element ids in the page
    pub fn slug(self) -> &'static str {
        match self {
            Self::AnnualEvents => "annual-events",
            Self::MonthlyDistribution => "monthly-distribution",
            Self::DamageOverTime => "damage-over-time",
            Self::TopLocations => "top-locations",
            Self::DurationDistribution => "duration-distribution",
            Self::DamageVsDuration => "damage-vs-duration",
            Self::CumulativeEvents => "cumulative-events",
            Self::HumanImpact => "human-impact",
            Self::HourlyDistribution => "hourly-distribution",
            Self::DamageByLocation => "damage-by-location",
            Self::YearlyDamage => "yearly-damage",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::AnnualEvents => "Annual Flash Flood Events",
            Self::MonthlyDistribution => "Seasonal Distribution of Flash Floods",
            Self::DamageOverTime => "Log Property Damage Over Time",
            Self::TopLocations => "Top 10 Most Affected Locations",
            Self::DurationDistribution => "Distribution of Event Durations",
            Self::DamageVsDuration => "Damage vs Duration (Log Scale)",
            Self::CumulativeEvents => "Cumulative Flash Flood Events Over Time",
            Self::HumanImpact => "Deaths and Injuries Over Time",
            Self::HourlyDistribution => "Hourly Distribution of Flash Floods",
            Self::DamageByLocation => "Top 10 Locations by Property Damage",
            Self::YearlyDamage => "Total Property Damage by Year (Log Scale)",
        }
    }

    /// Title shown instead of the chart when there is nothing to plot
    pub fn placeholder_title(self) -> &'static str {
        match self {
            Self::DamageOverTime | Self::DamageByLocation => "No Property Damage Data Available",
            Self::DamageVsDuration => "No Damage vs Duration Data Available",
            Self::HumanImpact => "No Human Impact Data Available",
            Self::YearlyDamage => "No Yearly Damage Data Available",
            Self::HourlyDistribution => "No Begin Time Data Available",
            Self::DurationDistribution => "No Duration Data Available",
            Self::AnnualEvents
            | Self::MonthlyDistribution
            | Self::TopLocations
            | Self::CumulativeEvents => "No Event Data Available",
        }
    }
}

/// A Plotly figure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Value>,
    pub layout: Value,
}

impl Figure {
    /// Figure with no traces, only a title
    pub fn placeholder(title: &str) -> Self {
        Self {
            data: Vec::new(),
            layout: json!({
                "title": { "text": title },
                "xaxis": { "visible": false },
                "yaxis": { "visible": false },
            }),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.data.is_empty()
    }
}

/// Build the figure for one chart from the summary
///
/// **Public** - main entry point for chart construction
pub fn build_figure(kind: ChartKind, summary: &DashboardSummary) -> Figure {
    if !has_data(kind, summary) {
        return Figure::placeholder(kind.placeholder_title());
    }

    let title = kind.title();
    match kind {
        ChartKind::AnnualEvents => {
            let x: Vec<i32> = summary.events_per_year.iter().map(|y| y.year).collect();
            let y: Vec<usize> = summary.events_per_year.iter().map(|y| y.count).collect();
            Figure {
                data: vec![json!({ "type": "bar", "x": x, "y": y })],
                layout: axes_layout(title, "Year", "Number of Events"),
            }
        }

        ChartKind::MonthlyDistribution => {
            let x: Vec<&str> = summary
                .events_per_month
                .iter()
                .map(|m| m.month.as_str())
                .collect();
            let y: Vec<usize> = summary.events_per_month.iter().map(|m| m.count).collect();
            Figure {
                data: vec![json!({ "type": "bar", "x": x, "y": y })],
                layout: axes_layout(title, "Month", "Number of Events"),
            }
        }

        ChartKind::DamageOverTime => {
            let points = &summary.damage_over_time;
            let x: Vec<String> = points.iter().map(|p| p.timestamp.to_string()).collect();
            let y: Vec<f64> = points.iter().map(|p| p.log_damage).collect();
            let damage: Vec<f64> = points.iter().map(|p| p.damage).collect();
            Figure {
                data: vec![json!({
                    "type": "scatter",
                    "mode": "markers",
                    "x": x,
                    "y": y,
                    "customdata": damage,
                    "hovertemplate": "%{x}<br>Damage: $%{customdata:,.0f}<extra></extra>",
                })],
                layout: axes_layout(title, "Date", "Log10(Damage in USD)"),
            }
        }

        ChartKind::TopLocations => {
            let x: Vec<usize> = summary.top_locations.iter().map(|l| l.count).collect();
            let y: Vec<&str> = summary
                .top_locations
                .iter()
                .map(|l| l.location.as_str())
                .collect();
            Figure {
                data: vec![json!({ "type": "bar", "orientation": "h", "x": x, "y": y })],
                layout: ranked_layout(title, "Number of Events"),
            }
        }

        ChartKind::DurationDistribution => {
            let mut data = Vec::new();
            if let Some(stats) = &summary.duration_stats {
                data.push(json!({
                    "type": "box",
                    "orientation": "h",
                    "name": "Duration",
                    "y": ["Duration"],
                    "lowerfence": [stats.lower_fence],
                    "q1": [stats.q1],
                    "median": [stats.median],
                    "q3": [stats.q3],
                    "upperfence": [stats.upper_fence],
                }));
                if !stats.outliers.is_empty() {
                    data.push(json!({
                        "type": "scatter",
                        "mode": "markers",
                        "name": "Outliers",
                        "showlegend": false,
                        "x": stats.outliers,
                        "y": vec!["Duration"; stats.outliers.len()],
                    }));
                }
            }
            Figure {
                data,
                layout: axes_layout(title, "Duration (Hours)", ""),
            }
        }

        ChartKind::DamageVsDuration => {
            let points = &summary.damage_vs_duration;
            let x: Vec<f64> = points.iter().map(|p| p.duration_hours).collect();
            let y: Vec<f64> = points.iter().map(|p| p.log_damage).collect();
            let size: Vec<f64> = points.iter().map(|p| p.damage).collect();
            let year: Vec<i32> = points.iter().map(|p| p.year).collect();
            Figure {
                data: vec![json!({
                    "type": "scatter",
                    "mode": "markers",
                    "x": x,
                    "y": y,
                    "marker": {
                        "size": size,
                        "sizemode": "area",
                        "sizeref": bubble_sizeref(&size),
                        "color": year,
                        "colorscale": "Viridis",
                        "showscale": true,
                        "colorbar": { "title": { "text": "Year" } },
                    },
                })],
                layout: axes_layout(title, "Duration (Hours)", "Log10(Damage)"),
            }
        }

        ChartKind::CumulativeEvents => {
            let x: Vec<String> = summary
                .cumulative_events
                .iter()
                .map(|p| p.timestamp.to_string())
                .collect();
            let y: Vec<usize> = summary.cumulative_events.iter().map(|p| p.total).collect();
            Figure {
                data: vec![json!({ "type": "scatter", "mode": "lines", "x": x, "y": y })],
                layout: axes_layout(title, "Date", "Cumulative Events"),
            }
        }

        ChartKind::HumanImpact => {
            let years: Vec<i32> = summary.casualties_per_year.iter().map(|c| c.year).collect();
            let deaths: Vec<u64> = summary.casualties_per_year.iter().map(|c| c.deaths).collect();
            let injuries: Vec<u64> = summary
                .casualties_per_year
                .iter()
                .map(|c| c.injuries)
                .collect();
            let mut layout = axes_layout(title, "Year", "");
            layout["barmode"] = json!("group");
            Figure {
                data: vec![
                    json!({
                        "type": "bar", "name": "Deaths", "x": years, "y": deaths,
                        "marker": { "color": "crimson" },
                    }),
                    json!({
                        "type": "bar", "name": "Injuries", "x": years, "y": injuries,
                        "marker": { "color": "orange" },
                    }),
                ],
                layout,
            }
        }

        ChartKind::HourlyDistribution => {
            let x: Vec<u8> = summary.hourly_histogram.iter().map(|b| b.hour).collect();
            let y: Vec<usize> = summary.hourly_histogram.iter().map(|b| b.count).collect();
            let mut layout = axes_layout(title, "Hour of Day", "Number of Events");
            layout["bargap"] = json!(0.05);
            Figure {
                data: vec![json!({ "type": "bar", "x": x, "y": y })],
                layout,
            }
        }

        ChartKind::DamageByLocation => {
            let x: Vec<f64> = summary.top_damage_locations.iter().map(|l| l.damage).collect();
            let y: Vec<&str> = summary
                .top_damage_locations
                .iter()
                .map(|l| l.location.as_str())
                .collect();
            Figure {
                data: vec![json!({ "type": "bar", "orientation": "h", "x": x, "y": y })],
                layout: ranked_layout(title, "Total Damage (USD)"),
            }
        }

        ChartKind::YearlyDamage => {
            let x: Vec<i32> = summary.damage_per_year.iter().map(|d| d.year).collect();
            let y: Vec<f64> = summary.damage_per_year.iter().map(|d| d.damage).collect();
            let mut layout = axes_layout(title, "Year", "Damage (USD)");
            layout["yaxis"]["type"] = json!("log");
            Figure {
                data: vec![json!({
                    "type": "scatter",
                    "mode": "lines",
                    "fill": "tozeroy",
                    "x": x,
                    "y": y,
                })],
                layout,
            }
        }
    }
}

/// Whether the series behind a chart has anything to plot
fn has_data(kind: ChartKind, summary: &DashboardSummary) -> bool {
    match kind {
        ChartKind::AnnualEvents => !summary.events_per_year.is_empty(),
        ChartKind::MonthlyDistribution => summary.counts.total > 0,
        ChartKind::DamageOverTime => !summary.damage_over_time.is_empty(),
        ChartKind::TopLocations => !summary.top_locations.is_empty(),
        ChartKind::DurationDistribution => summary.duration_stats.is_some(),
        ChartKind::DamageVsDuration => !summary.damage_vs_duration.is_empty(),
        ChartKind::CumulativeEvents => !summary.cumulative_events.is_empty(),
        ChartKind::HumanImpact => !summary.casualties_per_year.is_empty(),
        ChartKind::HourlyDistribution => !summary.hourly_histogram.is_empty(),
        ChartKind::DamageByLocation => !summary.top_damage_locations.is_empty(),
        ChartKind::YearlyDamage => !summary.damage_per_year.is_empty(),
    }
}

fn axes_layout(title: &str, x_title: &str, y_title: &str) -> Value {
    json!({
        "title": { "text": title },
        "xaxis": { "title": { "text": x_title } },
        "yaxis": { "title": { "text": y_title } },
    })
}

/// Horizontal ranking with the largest bar on top
fn ranked_layout(title: &str, x_title: &str) -> Value {
    let mut layout = axes_layout(title, x_title, "Location");
    layout["yaxis"]["autorange"] = json!("reversed");
    layout
}

/// Area scale that draws the largest damage at `BUBBLE_SIZE_MAX` pixels
fn bubble_sizeref(sizes: &[f64]) -> f64 {
    let largest = sizes.iter().copied().fold(0.0, f64::max);
    if largest > 0.0 {
        2.0 * largest / (BUBBLE_SIZE_MAX * BUBBLE_SIZE_MAX)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::summary::build_summary;
    use crate::parser::derive::derive_batch;
    use crate::parser::schema::StormRecord;
    use chrono::NaiveDate;

    fn summary(damage: Option<f64>, deaths: Option<u32>) -> DashboardSummary {
        let ts = NaiveDate::from_ymd_opt(2022, 5, 3)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let record = StormRecord {
            begin_timestamp: ts,
            end_timestamp: ts,
            begin_latitude: None,
            begin_longitude: None,
            begin_location: Some("FAIRDALE".to_string()),
            begin_time_raw: Some("930".to_string()),
            damage_property_amount: damage,
            deaths_direct: deaths,
            injuries_direct: None,
        };
        build_summary(&derive_batch(vec![record]), "test.csv")
    }

    #[test]
    fn test_every_chart_builds_with_data() {
        let summary = summary(Some(2500.0), Some(1));

        for kind in ChartKind::ALL {
            let figure = build_figure(kind, &summary);
            assert!(!figure.is_placeholder(), "{:?} should have traces", kind);
            assert_eq!(figure.layout["title"]["text"], kind.title());
        }
    }

    #[test]
    fn test_damage_charts_fall_back_to_placeholder() {
        let summary = summary(None, None);

        let figure = build_figure(ChartKind::DamageByLocation, &summary);
        assert!(figure.is_placeholder());
        assert_eq!(
            figure.layout["title"]["text"],
            "No Property Damage Data Available"
        );

        assert!(build_figure(ChartKind::YearlyDamage, &summary).is_placeholder());
        assert!(build_figure(ChartKind::HumanImpact, &summary).is_placeholder());
        assert!(!build_figure(ChartKind::AnnualEvents, &summary).is_placeholder());
    }

    #[test]
    fn test_yearly_damage_uses_log_axis() {
        let figure = build_figure(ChartKind::YearlyDamage, &summary(Some(10.0), None));
        assert_eq!(figure.layout["yaxis"]["type"], "log");
    }

    #[test]
    fn test_human_impact_has_two_traces() {
        let figure = build_figure(ChartKind::HumanImpact, &summary(None, Some(2)));
        assert_eq!(figure.data.len(), 2);
        assert_eq!(figure.data[0]["name"], "Deaths");
        assert_eq!(figure.data[1]["marker"]["color"], "orange");
    }

    #[test]
    fn test_bubbles_scale_with_raw_damage() {
        let figure = build_figure(ChartKind::DamageVsDuration, &summary(Some(800.0), None));
        let marker = &figure.data[0]["marker"];

        assert_eq!(marker["size"][0], 800.0);
        assert_eq!(marker["sizemode"], "area");
        assert_eq!(marker["sizeref"], 4.0);
    }

    #[test]
    fn test_duration_box_uses_fences_and_outliers() {
        let ts = NaiveDate::from_ymd_opt(2022, 5, 3)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let records = [1, 2, 3, 4, 100]
            .into_iter()
            .map(|hours| StormRecord {
                begin_timestamp: ts,
                end_timestamp: ts + chrono::Duration::hours(hours),
                begin_latitude: None,
                begin_longitude: None,
                begin_location: None,
                begin_time_raw: None,
                damage_property_amount: None,
                deaths_direct: None,
                injuries_direct: None,
            })
            .collect();
        let summary = build_summary(&derive_batch(records), "test.csv");

        let figure = build_figure(ChartKind::DurationDistribution, &summary);
        assert_eq!(figure.data.len(), 2);
        assert_eq!(figure.data[0]["upperfence"][0], 4.0);
        assert_eq!(figure.data[0]["lowerfence"][0], 1.0);
        assert_eq!(figure.data[1]["x"][0], 100.0);
    }

    #[test]
    fn test_slugs_are_unique() {
        let mut slugs: Vec<&str> = ChartKind::ALL.iter().map(|k| k.slug()).collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), ChartKind::ALL.len());
    }
}

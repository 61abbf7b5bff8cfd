//! Point series and distribution statistics for the scatter and box charts.

use crate::parser::schema::StormEvent;
use crate::utils::config::WHISKER_IQR_FACTOR;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One damaging event placed on the time axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamagePoint {
    pub timestamp: NaiveDateTime,
    pub damage: f64,
    /// log10(damage + 1)
    pub log_damage: f64,
}

/// One damaging event placed against its duration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageDurationPoint {
    pub duration_hours: f64,
    pub log_damage: f64,
    pub damage: f64,
    pub year: i32,
}

/// Box-plot statistics over event durations (hours)
///
/// Whiskers end at the most extreme durations within 1.5 IQR of the
/// quartiles; anything beyond them is listed in `outliers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationStats {
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub lower_fence: f64,
    pub upper_fence: f64,
    pub outliers: Vec<f64>,
}

/// Scale used by the log-damage charts
pub fn log_damage(damage: f64) -> f64 {
    (damage + 1.0).log10()
}

/// Damage over time, one point per event with a damage amount
pub fn damage_over_time<'a>(events: impl IntoIterator<Item = &'a StormEvent>) -> Vec<DamagePoint> {
    events
        .into_iter()
        .filter_map(|event| {
            event.record.damage_property_amount.map(|damage| DamagePoint {
                timestamp: event.record.begin_timestamp,
                damage,
                log_damage: log_damage(damage),
            })
        })
        .collect()
}

/// Damage against duration, one point per event with a damage amount
pub fn damage_vs_duration<'a>(
    events: impl IntoIterator<Item = &'a StormEvent>,
) -> Vec<DamageDurationPoint> {
    events
        .into_iter()
        .filter_map(|event| {
            event
                .record
                .damage_property_amount
                .map(|damage| DamageDurationPoint {
                    duration_hours: event.derived.duration_hours,
                    log_damage: log_damage(damage),
                    damage,
                    year: event.derived.year,
                })
        })
        .collect()
}

/// Box-plot summary of durations, `None` for an empty input
///
/// Quartiles use linear interpolation between closest ranks.
pub fn duration_summary<'a>(
    events: impl IntoIterator<Item = &'a StormEvent>,
) -> Option<DurationStats> {
    let mut durations: Vec<f64> = events
        .into_iter()
        .map(|event| event.derived.duration_hours)
        .filter(|hours| hours.is_finite())
        .collect();

    if durations.is_empty() {
        return None;
    }

    durations.sort_by(f64::total_cmp);

    let q1 = quantile(&durations, 0.25);
    let q3 = quantile(&durations, 0.75);
    let reach = (q3 - q1) * WHISKER_IQR_FACTOR;
    let (low, high) = (q1 - reach, q3 + reach);

    let lower_fence = durations.iter().copied().find(|d| *d >= low).unwrap_or(q1);
    let upper_fence = durations.iter().rev().copied().find(|d| *d <= high).unwrap_or(q3);

    let outliers = durations
        .iter()
        .copied()
        .filter(|d| *d < low || *d > high)
        .collect();

    Some(DurationStats {
        count: durations.len(),
        min: durations[0],
        q1,
        median: quantile(&durations, 0.5),
        q3,
        max: durations[durations.len() - 1],
        lower_fence,
        upper_fence,
        outliers,
    })
}

/// Linear-interpolated quantile of sorted, non-empty data
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::derive::derive_batch;
    use crate::parser::schema::StormRecord;
    use chrono::{Duration, NaiveDate};

    fn event(hours: i64, damage: Option<f64>) -> StormRecord {
        let begin = NaiveDate::from_ymd_opt(2018, 4, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        StormRecord {
            begin_timestamp: begin,
            end_timestamp: begin + Duration::hours(hours),
            begin_latitude: None,
            begin_longitude: None,
            begin_location: None,
            begin_time_raw: None,
            damage_property_amount: damage,
            deaths_direct: None,
            injuries_direct: None,
        }
    }

    #[test]
    fn test_log_damage() {
        assert_eq!(log_damage(0.0), 0.0);
        assert!((log_damage(99.0) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_damage_series_skip_absent_damage() {
        let batch = derive_batch(vec![event(2, Some(999.0)), event(3, None)]);

        let over_time = damage_over_time(&batch);
        assert_eq!(over_time.len(), 1);
        assert!((over_time[0].log_damage - 3.0).abs() < 1e-12);

        let vs_duration = damage_vs_duration(&batch);
        assert_eq!(vs_duration.len(), 1);
        assert_eq!(vs_duration[0].duration_hours, 2.0);
        assert_eq!(vs_duration[0].year, 2018);
    }

    #[test]
    fn test_duration_summary() {
        let batch = derive_batch(vec![
            event(4, None),
            event(1, None),
            event(3, None),
            event(2, None),
            event(-1, None),
        ]);

        let stats = duration_summary(&batch).unwrap();
        assert_eq!(stats.count, 5);
        assert_eq!(stats.min, -1.0);
        assert_eq!(stats.q1, 1.0);
        assert_eq!(stats.median, 2.0);
        assert_eq!(stats.q3, 3.0);
        assert_eq!(stats.max, 4.0);
        assert_eq!(stats.lower_fence, -1.0);
        assert_eq!(stats.upper_fence, 4.0);
        assert!(stats.outliers.is_empty());
    }

    #[test]
    fn test_duration_summary_separates_outliers() {
        let batch = derive_batch(vec![
            event(1, None),
            event(2, None),
            event(3, None),
            event(4, None),
            event(100, None),
        ]);

        let stats = duration_summary(&batch).unwrap();
        assert_eq!(stats.q1, 2.0);
        assert_eq!(stats.q3, 4.0);
        assert_eq!(stats.lower_fence, 1.0);
        assert_eq!(stats.upper_fence, 4.0);
        assert_eq!(stats.max, 100.0);
        assert_eq!(stats.outliers, vec![100.0]);
    }

    #[test]
    fn test_duration_summary_interpolates() {
        let batch = derive_batch(vec![event(1, None), event(2, None)]);
        let stats = duration_summary(&batch).unwrap();
        assert_eq!(stats.median, 1.5);
        assert_eq!(stats.q1, 1.25);
    }

    #[test]
    fn test_duration_summary_empty() {
        let none: Vec<&StormEvent> = Vec::new();
        assert!(duration_summary(none).is_none());
    }
}

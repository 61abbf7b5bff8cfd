//! Field derivation for storm event records.
//!
//! Every function here is total: malformed input degrades to an absent
//! value for that field and never to an error.

use super::schema::{DerivedFields, EventBatch, StormEvent, StormRecord};
use crate::utils::config::{MONTH_ABBREVIATIONS, SECONDS_PER_HOUR};
use chrono::Datelike;
use log::debug;

/// Compute the derived columns for one record
///
/// **Public** - main entry point for derivation
pub fn derive_fields(record: &StormRecord) -> DerivedFields {
    let duration = record.end_timestamp - record.begin_timestamp;
    let month = record.begin_timestamp.month();

    DerivedFields {
        duration_hours: duration.num_seconds() as f64 / SECONDS_PER_HOUR,
        year: record.begin_timestamp.year(),
        month,
        month_abbreviation: month_abbreviation(month).to_string(),
        begin_hour: record.begin_time_raw.as_deref().and_then(parse_begin_hour),
        clean_latitude: record.begin_latitude.as_deref().and_then(clean_coordinate),
        clean_longitude: record.begin_longitude.as_deref().and_then(clean_coordinate),
    }
}

/// Derive every record of a freshly loaded batch
///
/// **Public** - used by the loader
pub fn derive_batch(records: Vec<StormRecord>) -> EventBatch {
    debug!("Deriving fields for {} records", records.len());

    let events = records
        .into_iter()
        .map(|record| {
            let derived = derive_fields(&record);
            StormEvent { record, derived }
        })
        .collect();

    EventBatch::new(events)
}

/// Re-run derivation over an already derived batch
///
/// Derived values depend only on source fields, so this yields a batch
/// equal to its input.
pub fn rederive(batch: &EventBatch) -> EventBatch {
    derive_batch(batch.iter().map(|event| event.record.clone()).collect())
}

/// Numeric projection of a raw coordinate
///
/// Text containing a space is cut at the first space ("36.5 N" -> 36.5,
/// "N 36.5" -> absent). A NaN or infinite parse counts as absent.
pub fn clean_coordinate(raw: &str) -> Option<f64> {
    let candidate = match raw.split_once(' ') {
        Some((head, _)) => head,
        None => raw.trim(),
    };

    candidate
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Hour of day from an HMM / HHMM clock string
///
/// Non-digit characters are stripped first. Three digits give a single-digit
/// hour, four digits give the leading two; every other length is absent.
pub fn parse_begin_hour(raw: &str) -> Option<u8> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    match digits.len() {
        3 => digits[..1].parse().ok(),
        4 => digits[..2].parse().ok(),
        _ => None,
    }
}

/// Three-letter label for a calendar month (1-12)
pub fn month_abbreviation(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|index| MONTH_ABBREVIATIONS.get(index as usize))
        .copied()
        .unwrap_or("")
}

//! CSV loader for storm event exports.
//!
//! Reads the delimited-text file once, converts each row into a typed
//! `StormRecord` and hands the batch to the deriver. Structural problems
//! (missing file, missing column, unreadable timestamp) are fatal; numeric
//! fields that fail to parse simply become absent.

use super::derive::derive_batch;
use super::schema::{CsvRow, EventBatch, StormRecord};
use crate::utils::config::{
    COL_BEGIN_DATE, COL_END_DATE, DATETIME_FORMATS, DATE_FORMATS, REQUIRED_COLUMNS,
};
use crate::utils::error::LoadError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::{debug, info};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Load and derive the event batch from a CSV file
///
/// **Public** - main entry point for loading
///
/// # Errors
/// * `LoadError::Io` - file missing or unreadable
/// * `LoadError::MissingColumn` - header lacks a required column
/// * `LoadError::InvalidTimestamp` - BEGIN_DATE / END_DATE not a date-time
/// * `LoadError::Empty` - header present but no rows
pub fn load_events(path: impl AsRef<Path>) -> Result<EventBatch, LoadError> {
    let path = path.as_ref();

    info!("Loading storm events from: {}", path.display());

    let file = File::open(path)?;
    let batch = load_events_from_reader(file)?;

    info!("Loaded {} events", batch.len());

    Ok(batch)
}

/// Load and derive the event batch from any reader
///
/// **Public** - used by tests and by callers that already hold the data
pub fn load_events_from_reader(reader: impl Read) -> Result<EventBatch, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == *column) {
            return Err(LoadError::MissingColumn((*column).to_string()));
        }
    }

    let mut records = Vec::new();
    for (index, row) in csv_reader.deserialize::<CsvRow>().enumerate() {
        let row = row?;
        records.push(to_record(row, index + 1)?);
    }

    if records.is_empty() {
        return Err(LoadError::Empty);
    }

    debug!("Decoded {} CSV rows", records.len());

    Ok(derive_batch(records))
}

/// Convert one decoded row into a typed record
///
/// **Private** - `row_number` is 1-based over data rows, for error messages
fn to_record(row: CsvRow, row_number: usize) -> Result<StormRecord, LoadError> {
    let begin_timestamp = require_timestamp(row.begin_date, COL_BEGIN_DATE, row_number)?;
    let end_timestamp = require_timestamp(row.end_date, COL_END_DATE, row_number)?;

    Ok(StormRecord {
        begin_timestamp,
        end_timestamp,
        begin_latitude: row.begin_lat,
        begin_longitude: row.begin_lon,
        begin_location: row.begin_location.filter(|s| !s.trim().is_empty()),
        begin_time_raw: row.begin_time,
        damage_property_amount: row.damage_property.as_deref().and_then(parse_amount),
        deaths_direct: row.deaths_direct.as_deref().and_then(parse_count),
        injuries_direct: row.injuries_direct.as_deref().and_then(parse_count),
    })
}

fn require_timestamp(
    value: Option<String>,
    column: &'static str,
    row: usize,
) -> Result<NaiveDateTime, LoadError> {
    let text = value.unwrap_or_default();
    parse_timestamp(&text).ok_or(LoadError::InvalidTimestamp {
        row,
        column,
        value: text,
    })
}

/// Parse a BEGIN_DATE / END_DATE value
///
/// Accepts RFC 3339 and the layouts in `DATETIME_FORMATS`; date-only
/// values are taken at midnight.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Parse a monetary amount; unparseable, NaN or infinite text is absent
pub fn parse_amount(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Parse a non-negative casualty count
///
/// Integral floats ("2.0") are accepted.
pub fn parse_count(text: &str) -> Option<u32> {
    let text = text.trim();

    text.parse::<u32>().ok().or_else(|| {
        text.parse::<f64>()
            .ok()
            .filter(|v| v.fract() == 0.0 && *v >= 0.0 && *v <= f64::from(u32::MAX))
            .map(|v| v as u32)
    })
}

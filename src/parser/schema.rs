//! In-memory schema for storm event records.
//!
//! A `StormRecord` holds the source fields exactly as loaded. Derived
//! columns live beside it in `DerivedFields` so that derivation never
//! touches the source values.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Raw CSV row as decoded by serde
///
/// Every field is kept as text so that malformed values reach the
/// loader/deriver instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CsvRow {
    #[serde(rename = "BEGIN_DATE")]
    pub begin_date: Option<String>,

    #[serde(rename = "END_DATE")]
    pub end_date: Option<String>,

    #[serde(rename = "BEGIN_TIME")]
    pub begin_time: Option<String>,

    #[serde(rename = "BEGIN_LAT")]
    pub begin_lat: Option<String>,

    #[serde(rename = "BEGIN_LON")]
    pub begin_lon: Option<String>,

    #[serde(rename = "BEGIN_LOCATION")]
    pub begin_location: Option<String>,

    #[serde(rename = "DAMAGE_PROPERTY_NUM")]
    pub damage_property: Option<String>,

    #[serde(rename = "DEATHS_DIRECT")]
    pub deaths_direct: Option<String>,

    #[serde(rename = "INJURIES_DIRECT")]
    pub injuries_direct: Option<String>,
}

/// One flash-flood event with its source fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StormRecord {
    pub begin_timestamp: NaiveDateTime,
    pub end_timestamp: NaiveDateTime,

    /// Raw latitude text, possibly with a trailing direction token ("36.5 N")
    pub begin_latitude: Option<String>,

    /// Raw longitude text
    pub begin_longitude: Option<String>,

    pub begin_location: Option<String>,

    /// Clock time in HMM / HHMM shape, possibly with noise characters
    pub begin_time_raw: Option<String>,

    pub damage_property_amount: Option<f64>,
    pub deaths_direct: Option<u32>,
    pub injuries_direct: Option<u32>,
}

impl StormRecord {
    /// Direct deaths, absent counted as zero
    pub fn deaths(&self) -> u32 {
        self.deaths_direct.unwrap_or(0)
    }

    /// Direct injuries, absent counted as zero
    pub fn injuries(&self) -> u32 {
        self.injuries_direct.unwrap_or(0)
    }
}

/// Columns computed from a `StormRecord` at load time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedFields {
    /// End minus begin in hours; negative when the source has end < begin
    pub duration_hours: f64,
    pub year: i32,
    pub month: u32,
    pub month_abbreviation: String,
    pub begin_hour: Option<u8>,
    pub clean_latitude: Option<f64>,
    pub clean_longitude: Option<f64>,
}

/// A record together with its derived columns
#[derive(Debug, Clone, PartialEq)]
pub struct StormEvent {
    pub record: StormRecord,
    pub derived: DerivedFields,
}

impl StormEvent {
    /// Property damage when present and strictly positive
    pub fn positive_damage(&self) -> Option<f64> {
        self.record
            .damage_property_amount
            .filter(|amount| *amount > 0.0)
    }
}

/// The full derived batch, immutable once built
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventBatch {
    events: Vec<StormEvent>,
}

impl EventBatch {
    pub fn new(events: Vec<StormEvent>) -> Self {
        Self { events }
    }

    pub fn events(&self) -> &[StormEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StormEvent> {
        self.events.iter()
    }
}

impl<'a> IntoIterator for &'a EventBatch {
    type Item = &'a StormEvent;
    type IntoIter = std::slice::Iter<'a, StormEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

//! Loading and field derivation for storm event records.
//!
//! This module handles:
//! - Reading the CSV export into typed records
//! - Computing derived columns (duration, calendar parts, hour, coordinates)
//! - Defining the in-memory record schema

pub mod derive;
pub mod loader;
pub mod schema;

// Re-export main types
pub use derive::{clean_coordinate, derive_batch, derive_fields, parse_begin_hour, rederive};
pub use loader::{load_events, load_events_from_reader, parse_timestamp};
pub use schema::{DerivedFields, EventBatch, StormEvent, StormRecord};

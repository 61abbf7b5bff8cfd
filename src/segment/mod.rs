//! Named subsets of the derived event batch.
//!
//! Segments are borrowed views selected by fixed predicates:
//! - geocoded: both cleaned coordinates present
//! - damaging: positive property damage
//! - impactful: at least one direct death or injury

pub mod filter;

// Re-export main types and functions
pub use filter::{is_damaging, is_geocoded, is_impactful, Segment, SegmentKind, Segments};

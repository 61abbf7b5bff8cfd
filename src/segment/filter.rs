//! Segment predicates and the `Segments` view over a batch.

use crate::parser::schema::{EventBatch, StormEvent};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which fixed predicate selected a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Geocoded,
    Damaging,
    Impactful,
}

impl SegmentKind {
    pub const ALL: [SegmentKind; 3] = [Self::Geocoded, Self::Damaging, Self::Impactful];

    /// Membership predicate for this segment
    pub fn matches(self, event: &StormEvent) -> bool {
        match self {
            Self::Geocoded => is_geocoded(event),
            Self::Damaging => is_damaging(event),
            Self::Impactful => is_impactful(event),
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Geocoded => "geocoded",
            Self::Damaging => "damaging",
            Self::Impactful => "impactful",
        };
        f.write_str(name)
    }
}

pub fn is_geocoded(event: &StormEvent) -> bool {
    event.derived.clean_latitude.is_some() && event.derived.clean_longitude.is_some()
}

/// Damage present and strictly greater than zero
pub fn is_damaging(event: &StormEvent) -> bool {
    event.positive_damage().is_some()
}

pub fn is_impactful(event: &StormEvent) -> bool {
    event.record.deaths() > 0 || event.record.injuries() > 0
}

/// A read-only subset of the batch, in input order
#[derive(Debug, Clone)]
pub struct Segment<'a> {
    kind: SegmentKind,
    events: Vec<&'a StormEvent>,
}

impl<'a> Segment<'a> {
    /// Select every event of the batch matching `kind`
    pub fn select(batch: &'a EventBatch, kind: SegmentKind) -> Self {
        let events: Vec<&StormEvent> = batch.iter().filter(|e| kind.matches(e)).collect();
        debug!("Segment {}: {} of {} events", kind, events.len(), batch.len());
        Self { kind, events }
    }

    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[&'a StormEvent] {
        &self.events
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a StormEvent> + '_ {
        self.events.iter().copied()
    }
}

/// The three named segments of one batch
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    pub geocoded: Segment<'a>,
    pub damaging: Segment<'a>,
    pub impactful: Segment<'a>,
}

impl<'a> Segments<'a> {
    /// Evaluate every predicate over the full batch
    ///
    /// **Public** - main entry point for segmentation
    pub fn from_batch(batch: &'a EventBatch) -> Self {
        Self {
            geocoded: Segment::select(batch, SegmentKind::Geocoded),
            damaging: Segment::select(batch, SegmentKind::Damaging),
            impactful: Segment::select(batch, SegmentKind::Impactful),
        }
    }

    pub fn get(&self, kind: SegmentKind) -> &Segment<'a> {
        match kind {
            SegmentKind::Geocoded => &self.geocoded,
            SegmentKind::Damaging => &self.damaging,
            SegmentKind::Impactful => &self.impactful,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::derive::derive_batch;
    use crate::parser::schema::StormRecord;
    use chrono::NaiveDate;

    fn record(damage: Option<f64>, deaths: Option<u32>, injuries: Option<u32>) -> StormRecord {
        let ts = NaiveDate::from_ymd_opt(2020, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        StormRecord {
            begin_timestamp: ts,
            end_timestamp: ts,
            begin_latitude: None,
            begin_longitude: None,
            begin_location: None,
            begin_time_raw: None,
            damage_property_amount: damage,
            deaths_direct: deaths,
            injuries_direct: injuries,
        }
    }

    #[test]
    fn test_damaging_excludes_zero_absent_and_negative() {
        let batch = derive_batch(vec![
            record(Some(0.0), None, None),
            record(None, None, None),
            record(Some(-5.0), None, None),
            record(Some(1000.0), None, None),
        ]);

        let segments = Segments::from_batch(&batch);
        assert_eq!(segments.damaging.len(), 1);
        assert_eq!(
            segments.damaging.events()[0].record.damage_property_amount,
            Some(1000.0)
        );
    }

    #[test]
    fn test_impactful_deaths_or_injuries() {
        let batch = derive_batch(vec![
            record(None, Some(1), Some(0)),
            record(None, Some(0), Some(2)),
            record(None, Some(0), Some(0)),
            record(None, None, None),
        ]);

        let segments = Segments::from_batch(&batch);
        assert_eq!(segments.impactful.len(), 2);
        assert_eq!(segments.get(SegmentKind::Impactful).kind(), SegmentKind::Impactful);
    }

    #[test]
    fn test_geocoded_requires_both_coordinates() {
        let mut both = record(None, None, None);
        both.begin_latitude = Some("38.1 N".to_string());
        both.begin_longitude = Some("-85.7".to_string());
        let mut lat_only = record(None, None, None);
        lat_only.begin_latitude = Some("38.1".to_string());
        lat_only.begin_longitude = Some("W -85.7".to_string());

        let batch = derive_batch(vec![lat_only, both]);
        let segments = Segments::from_batch(&batch);

        assert_eq!(segments.geocoded.len(), 1);
        assert_eq!(segments.geocoded.events()[0].derived.clean_latitude, Some(38.1));
    }

    #[test]
    fn test_segments_preserve_input_order() {
        let batch = derive_batch(vec![
            record(Some(30.0), None, None),
            record(Some(10.0), None, None),
            record(Some(20.0), None, None),
        ]);

        let amounts: Vec<f64> = Segments::from_batch(&batch)
            .damaging
            .iter()
            .filter_map(|e| e.record.damage_property_amount)
            .collect();

        assert_eq!(amounts, vec![30.0, 10.0, 20.0]);
    }

    #[test]
    fn test_empty_batch_gives_empty_segments() {
        let batch = EventBatch::default();
        let segments = Segments::from_batch(&batch);

        for kind in SegmentKind::ALL {
            assert!(segments.get(kind).is_empty());
        }
    }
}

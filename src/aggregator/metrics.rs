//! Grouping reductions that feed the dashboard charts.
//!
//! Each reduction is pure and accepts any iterator of events, so it runs
//! the same over the full batch or over a segment. An empty input gives
//! an empty result (the month table is the one exception: it always has
//! twelve rows).

use crate::parser::schema::StormEvent;
use crate::utils::config::{HOURS_PER_DAY, MONTH_ABBREVIATIONS};
use chrono::NaiveDateTime;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthCount {
    pub month: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCount {
    pub location: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationDamage {
    pub location: String,
    pub damage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearDamage {
    pub year: i32,
    pub damage: f64,
}

/// Direct deaths and injuries summed for one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearCasualties {
    pub year: i32,
    pub deaths: u64,
    pub injuries: u64,
}

/// Running event total at one distinct begin timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativePoint {
    pub timestamp: NaiveDateTime,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourBucket {
    pub hour: u8,
    pub count: usize,
}

/// Number of events per year, ascending
pub fn events_per_year<'a>(events: impl IntoIterator<Item = &'a StormEvent>) -> Vec<YearCount> {
    let mut by_year: BTreeMap<i32, usize> = BTreeMap::new();
    for event in events {
        *by_year.entry(event.derived.year).or_insert(0) += 1;
    }

    by_year
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect()
}

/// Number of events per calendar month, Jan..Dec
///
/// Months without events are reported with a zero count.
pub fn events_per_month<'a>(events: impl IntoIterator<Item = &'a StormEvent>) -> Vec<MonthCount> {
    let mut counts = [0usize; 12];
    for event in events {
        if let Some(slot) = (event.derived.month as usize)
            .checked_sub(1)
            .and_then(|index| counts.get_mut(index))
        {
            *slot += 1;
        }
    }

    MONTH_ABBREVIATIONS
        .iter()
        .zip(counts)
        .map(|(month, count)| MonthCount {
            month: (*month).to_string(),
            count,
        })
        .collect()
}

/// Most frequent begin locations
///
/// Ties keep the order in which locations first appear. Events without a
/// location are skipped.
pub fn top_locations_by_count<'a>(
    events: impl IntoIterator<Item = &'a StormEvent>,
    top_n: usize,
) -> Vec<LocationCount> {
    let totals = group_by_location(events, |_| Some(1usize), |acc, n| *acc += n);

    let mut ranked: Vec<LocationCount> = totals
        .into_iter()
        .map(|(location, count)| LocationCount { location, count })
        .collect();

    // sort_by is stable, which keeps first-appearance order on ties
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(top_n);

    debug!("Top {} locations by event count: {}", top_n, ranked.len());
    ranked
}

/// Locations with the largest summed property damage
///
/// Meant for the damaging segment; events without damage contribute
/// nothing. Ties keep first-appearance order.
pub fn top_locations_by_damage<'a>(
    events: impl IntoIterator<Item = &'a StormEvent>,
    top_n: usize,
) -> Vec<LocationDamage> {
    let totals = group_by_location(
        events,
        |event| event.record.damage_property_amount,
        add_damage,
    );

    let mut ranked: Vec<LocationDamage> = totals
        .into_iter()
        .map(|(location, damage)| LocationDamage { location, damage })
        .collect();

    ranked.sort_by(|a, b| b.damage.total_cmp(&a.damage));
    ranked.truncate(top_n);
    ranked
}

/// Summed property damage per year, ascending
pub fn damage_per_year<'a>(events: impl IntoIterator<Item = &'a StormEvent>) -> Vec<YearDamage> {
    let mut by_year: BTreeMap<i32, f64> = BTreeMap::new();
    for event in events {
        if let Some(amount) = event.record.damage_property_amount {
            add_damage(by_year.entry(event.derived.year).or_insert(0.0), amount);
        }
    }

    by_year
        .into_iter()
        .map(|(year, damage)| YearDamage { year, damage })
        .collect()
}

/// Summed direct deaths and injuries per year, ascending
pub fn casualties_per_year<'a>(
    events: impl IntoIterator<Item = &'a StormEvent>,
) -> Vec<YearCasualties> {
    let mut by_year: BTreeMap<i32, (u64, u64)> = BTreeMap::new();
    for event in events {
        let entry = by_year.entry(event.derived.year).or_insert((0, 0));
        entry.0 += u64::from(event.record.deaths());
        entry.1 += u64::from(event.record.injuries());
    }

    by_year
        .into_iter()
        .map(|(year, (deaths, injuries))| YearCasualties {
            year,
            deaths,
            injuries,
        })
        .collect()
}

/// Running event count indexed by distinct begin timestamp
///
/// Events sharing a timestamp are counted together, so
/// `[d1, d1, d2]` yields `{d1: 2, d2: 3}`.
pub fn cumulative_events<'a>(
    events: impl IntoIterator<Item = &'a StormEvent>,
) -> Vec<CumulativePoint> {
    let mut per_timestamp: BTreeMap<NaiveDateTime, usize> = BTreeMap::new();
    for event in events {
        *per_timestamp.entry(event.record.begin_timestamp).or_insert(0) += 1;
    }

    let mut running = 0;
    per_timestamp
        .into_iter()
        .map(|(timestamp, count)| {
            running += count;
            CumulativePoint {
                timestamp,
                total: running,
            }
        })
        .collect()
}

/// Histogram of begin hours over buckets 0..=23
///
/// Absent hours are excluded, as are parsed hours of 24 or more (e.g. from
/// "9930"). Returns an empty vector when no event has a usable hour.
pub fn hourly_histogram<'a>(events: impl IntoIterator<Item = &'a StormEvent>) -> Vec<HourBucket> {
    let mut counts = [0usize; HOURS_PER_DAY];
    let mut out_of_range = 0usize;
    let mut counted = 0usize;

    for hour in events.into_iter().filter_map(|e| e.derived.begin_hour) {
        match counts.get_mut(hour as usize) {
            Some(slot) => {
                *slot += 1;
                counted += 1;
            }
            None => out_of_range += 1,
        }
    }

    if out_of_range > 0 {
        warn!("Dropped {} events with begin hour outside 0-23", out_of_range);
    }

    if counted == 0 {
        return Vec::new();
    }

    counts
        .iter()
        .enumerate()
        .map(|(hour, &count)| HourBucket {
            hour: hour as u8,
            count,
        })
        .collect()
}

/// Add a damage amount, saturating at `f64::MAX`
///
/// Totals stay finite so they serialize as JSON numbers.
pub(crate) fn add_damage(total: &mut f64, amount: f64) {
    let sum = *total + amount;
    *total = if sum.is_finite() { sum } else { f64::MAX };
}

/// Accumulate a per-location value in first-appearance order
///
/// **Private** - shared by the top-N location reductions
fn group_by_location<'a, T, V, A>(
    events: impl IntoIterator<Item = &'a StormEvent>,
    value: V,
    accumulate: A,
) -> Vec<(String, T)>
where
    T: Default,
    V: Fn(&StormEvent) -> Option<T>,
    A: Fn(&mut T, T),
{
    let mut order: Vec<(String, T)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for event in events {
        let (Some(location), Some(amount)) = (event.record.begin_location.as_ref(), value(event))
        else {
            continue;
        };

        let slot = *index.entry(location.clone()).or_insert_with(|| {
            order.push((location.clone(), T::default()));
            order.len() - 1
        });
        accumulate(&mut order[slot].1, amount);
    }

    order
}

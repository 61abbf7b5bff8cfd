use flashflood_dashboard::aggregator::{
    build_summary, cumulative_events, damage_per_year, events_per_month, top_locations_by_count,
};
use flashflood_dashboard::parser::{load_events, load_events_from_reader, rederive, EventBatch};
use flashflood_dashboard::segment::Segments;
use flashflood_dashboard::utils::error::LoadError;
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;

const HEADER: &str = "BEGIN_LOCATION,BEGIN_DATE,BEGIN_TIME,END_DATE,DEATHS_DIRECT,INJURIES_DIRECT,DAMAGE_PROPERTY_NUM,BEGIN_LAT,BEGIN_LON";

fn batch(rows: &[&str]) -> EventBatch {
    let mut csv = String::from(HEADER);
    for row in rows {
        csv.push('\n');
        csv.push_str(row);
    }
    load_events_from_reader(csv.as_bytes()).unwrap()
}

fn sample_batch() -> EventBatch {
    batch(&[
        "LOUISVILLE,2020-01-01 09:30,930,2020-01-01 11:30,0,0,5000,38.25 N,-85.76 W",
        "OKOLONA,2020-01-01 09:30,0930,2020-01-01 10:00,0,2,0,N 38.13,-85.69",
        "LOUISVILLE,2020-01-02 17:30,1730,2020-01-02 17:00,1,0,-5,,",
        "ST MATTHEWS,2021-03-04 00:00,93,2021-03-04 06:00,0,0,,38.25,-85.65",
        "OKOLONA,2021-08-15 23:10,12345,2021-08-16 01:10,0,0,250000,38.13,-85.69",
    ])
}

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", HEADER).unwrap();
    writeln!(
        file,
        "LOUISVILLE,2019-06-01 12:00,1200,2019-06-01 15:00,0,0,1000,38.2,-85.7"
    )
    .unwrap();

    let batch = load_events(file.path()).unwrap();
    assert_eq!(batch.len(), 1);
    assert_eq!(batch.events()[0].derived.duration_hours, 3.0);
}

#[test]
fn test_load_missing_file_is_error() {
    let result = load_events("/no/such/storm_data.csv");
    assert!(matches!(result, Err(LoadError::Io(_))));
}

#[test]
fn test_derived_coordinates_and_hours() {
    let batch = sample_batch();
    let derived: Vec<_> = batch.iter().map(|e| &e.derived).collect();

    assert_eq!(derived[0].clean_latitude, Some(38.25));
    assert_eq!(derived[1].clean_latitude, None);
    assert_eq!(derived[0].begin_hour, Some(9));
    assert_eq!(derived[1].begin_hour, Some(9));
    assert_eq!(derived[2].begin_hour, Some(17));
    assert_eq!(derived[3].begin_hour, None);
    assert_eq!(derived[4].begin_hour, None);
    assert_eq!(derived[2].duration_hours, -0.5);
}

#[test]
fn test_segments_partition_rules() {
    let batch = sample_batch();
    let segments = Segments::from_batch(&batch);

    let damaging: Vec<&str> = segments
        .damaging
        .iter()
        .filter_map(|e| e.record.begin_location.as_deref())
        .collect();
    assert_eq!(damaging, vec!["LOUISVILLE", "OKOLONA"]);

    assert_eq!(segments.geocoded.len(), 3);
    assert_eq!(segments.impactful.len(), 2);
}

#[test]
fn test_month_distribution_reports_zero_months() {
    let batch = sample_batch();
    let months = events_per_month(&batch);

    assert_eq!(months.len(), 12);
    assert_eq!(months[0].month, "Jan");
    assert_eq!(months[0].count, 3);
    assert_eq!(months[6].month, "Jul");
    assert_eq!(months[6].count, 0);
    assert_eq!(months.iter().map(|m| m.count).sum::<usize>(), batch.len());
}

#[test]
fn test_cumulative_counts_share_timestamps() {
    let batch = batch(&[
        "A,2020-01-01,,2020-01-01,,,,,",
        "B,2020-01-01,,2020-01-01,,,,,",
        "C,2020-01-02,,2020-01-02,,,,,",
    ]);

    let totals: Vec<usize> = cumulative_events(&batch).iter().map(|p| p.total).collect();
    assert_eq!(totals, vec![2, 3]);
}

#[test]
fn test_top_locations_tie_keeps_first_appearance() {
    let batch = batch(&[
        "BETA,2020-01-01,,2020-01-01,,,,,",
        "ALPHA,2020-01-02,,2020-01-02,,,,,",
        "GAMMA,2020-01-03,,2020-01-03,,,,,",
        "GAMMA,2020-01-04,,2020-01-04,,,,,",
    ]);

    let top: Vec<String> = top_locations_by_count(&batch, 2)
        .into_iter()
        .map(|l| l.location)
        .collect();
    assert_eq!(top, vec!["GAMMA".to_string(), "BETA".to_string()]);
}

#[test]
fn test_empty_damaging_segment_gives_empty_series() {
    let batch = batch(&["A,2020-01-01,,2020-01-01,0,0,0,,", "B,2020-02-01,,2020-02-01,0,0,,,"]);
    let segments = Segments::from_batch(&batch);

    assert!(segments.damaging.is_empty());
    assert!(damage_per_year(segments.damaging.iter()).is_empty());

    let summary = build_summary(&batch, "empty-damage.csv");
    assert!(summary.damage_over_time.is_empty());
    assert!(summary.top_damage_locations.is_empty());
}

#[test]
fn test_rederive_is_idempotent() {
    let batch = sample_batch();
    let again = rederive(&batch);

    for (before, after) in batch.iter().zip(again.iter()) {
        assert_eq!(before.derived, after.derived);
    }
}

#[test]
fn test_summary_counts_match_segments() {
    let batch = sample_batch();
    let summary = build_summary(&batch, "sample.csv");

    assert_eq!(summary.counts.total, 5);
    assert_eq!(summary.counts.damaging, 2);
    assert_eq!(summary.events_per_year.len(), 2);
    assert_eq!(summary.top_damage_locations[0].location, "OKOLONA");
    assert_eq!(summary.top_damage_locations[0].damage, 250000.0);
    assert_eq!(summary.casualties_per_year[0].injuries, 2);
    assert_eq!(summary.casualties_per_year[0].deaths, 1);
}

use crate::output::read_summary;
use crate::utils::config::{REQUIRED_COLUMNS, SCHEMA_VERSION};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Validate a summary JSON file
pub fn validate_summary_file(file_path: PathBuf) -> Result<()> {
    println!("Validating summary: {}", file_path.display());

    let summary = read_summary(&file_path)
        .with_context(|| format!("Invalid summary file {}", file_path.display()))?;

    if summary.version != SCHEMA_VERSION {
        anyhow::bail!(
            "Unsupported summary version {} (expected {})",
            summary.version,
            SCHEMA_VERSION
        );
    }

    if summary.events_per_month.len() != 12 {
        anyhow::bail!(
            "Monthly distribution has {} entries, expected 12",
            summary.events_per_month.len()
        );
    }

    println!("✓ Valid summary JSON");
    println!("  Version: {}", summary.version);
    println!("  Source: {}", summary.source);
    println!("  Events: {}", summary.counts.total);
    println!("  Geocoded: {}", summary.counts.geocoded);
    println!("  Damaging: {}", summary.counts.damaging);
    println!("  Impactful: {}", summary.counts.impactful);
    println!("  Years: {}", summary.events_per_year.len());

    Ok(())
}

/// Display the CSV columns the loader expects
pub fn display_columns(show_details: bool) {
    println!("Flash Flood Dashboard Input Columns");
    println!();

    for column in REQUIRED_COLUMNS {
        println!("  {}", column);
    }

    if show_details {
        println!();
        println!("Derived Fields:");
        println!("  duration_hours: number   - END_DATE minus BEGIN_DATE (may be negative)");
        println!("  year, month: number      - Calendar parts of BEGIN_DATE");
        println!("  month_abbreviation       - Jan..Dec");
        println!("  begin_hour: number?      - From BEGIN_TIME digits (HMM / HHMM)");
        println!("  clean_latitude: number?  - BEGIN_LAT up to the first space");
        println!("  clean_longitude: number? - BEGIN_LON up to the first space");
    } else {
        println!();
        println!("Use --show for derived field details");
    }
}

/// Display version information
pub fn display_version() {
    println!("Flash Flood Dashboard v{}", env!("CARGO_PKG_VERSION"));
    println!("Summary Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Storm event derivation, aggregation and dashboard rendering.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::build_summary;
    use crate::output::write_summary;
    use crate::parser::load_events_from_reader;
    use tempfile::NamedTempFile;

    const CSV: &str = "BEGIN_LOCATION,BEGIN_DATE,BEGIN_TIME,END_DATE,DEATHS_DIRECT,INJURIES_DIRECT,DAMAGE_PROPERTY_NUM,BEGIN_LAT,BEGIN_LON\n\
        VALLEY STATION,2014-06-10 15:00,1500,2014-06-10 18:00,0,0,0,,\n";

    #[test]
    fn test_validate_summary_file() {
        let batch = load_events_from_reader(CSV.as_bytes()).unwrap();
        let summary = build_summary(&batch, "test.csv");
        let temp_file = NamedTempFile::new().unwrap();
        write_summary(&summary, temp_file.path()).unwrap();

        assert!(validate_summary_file(temp_file.path().to_path_buf()).is_ok());
    }

    #[test]
    fn test_validate_summary_file_wrong_version() {
        let batch = load_events_from_reader(CSV.as_bytes()).unwrap();
        let mut summary = build_summary(&batch, "test.csv");
        summary.version = "0.0.1".to_string();
        let temp_file = NamedTempFile::new().unwrap();
        write_summary(&summary, temp_file.path()).unwrap();

        assert!(validate_summary_file(temp_file.path().to_path_buf()).is_err());
    }

    #[test]
    fn test_validate_summary_file_missing() {
        assert!(validate_summary_file(PathBuf::from("/no/such/summary.json")).is_err());
    }
}

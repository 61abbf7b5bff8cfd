//! HTML dashboard output writer.

use super::{ensure_parent_dir, validate_path};
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write a rendered dashboard page to a file
///
/// **Public** - main entry point for HTML output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path is empty, a directory, or its parent cannot be created
///
/// # Example
/// ```ignore
/// let html = render_dashboard(&summary, &config);
/// write_dashboard(&html, "dashboard.html")?;
/// ```
pub fn write_dashboard(html: &str, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing dashboard to: {}", output_path.display());

    validate_path(output_path)?;

    if let Some(ext) = output_path.extension() {
        if ext != "html" && ext != "htm" {
            debug!("Warning: File does not have .html extension: {}", output_path.display());
        }
    }

    ensure_parent_dir(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);

    writer
        .write_all(html.as_bytes())
        .map_err(OutputError::WriteFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    info!(
        "Dashboard written successfully ({} bytes, {:.2} KB)",
        html.len(),
        html.len() as f64 / 1024.0
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    const PAGE: &str = "<!DOCTYPE html>\n<html><body><h1>Floods</h1></body></html>\n";

    #[test]
    fn test_write_dashboard() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        write_dashboard(PAGE, path).unwrap();

        assert_eq!(std::fs::read_to_string(path).unwrap(), PAGE);
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/dashboard.html");

        write_dashboard(PAGE, &nested_path).unwrap();

        assert!(nested_path.exists());
    }

    #[test]
    fn test_write_to_directory_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = write_dashboard(PAGE, temp_dir.path());
        assert!(matches!(result, Err(OutputError::InvalidPath(_))));
    }
}

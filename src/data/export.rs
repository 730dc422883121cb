//! CSV export of a filtered table.

use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to create file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] PolarsError),
}

/// Write the table as UTF-8, comma-separated CSV with a header row. Derived
/// columns are included.
pub fn write_csv(df: &DataFrame, path: &Path) -> Result<(), ExportError> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df.clone())?;

    log::info!("exported {} rows to {}", df.height(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::testutil::sample_frame;

    #[test]
    fn writes_header_and_all_rows() {
        let df = sample_frame();
        let path = std::env::temp_dir().join("nyc_pickups_export_test.csv");

        write_csv(&df, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("date/time,lat,lon"));
        assert!(header.contains("day_of_week"));
        assert!(header.contains("hour"));
        assert_eq!(lines.count(), df.height());
    }
}

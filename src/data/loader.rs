//! Dataset Loader Module
//! Downloads the pickup CSV and derives the analysis columns using Polars.

use chrono::{Datelike, NaiveDateTime, Timelike};
use polars::prelude::*;
use std::io::Cursor;
use std::time::{Duration, Instant};
use thiserror::Error;

use super::aggregate::DAY_ORDER;

/// Timestamp column name after lowercasing.
pub const DATE_COLUMN: &str = "date/time";
pub const LAT_COLUMN: &str = "lat";
pub const LON_COLUMN: &str = "lon";

/// Derived columns.
pub const DAY_COLUMN: &str = "day_of_week";
pub const HOUR_COLUMN: &str = "hour";

/// Timestamp formats accepted by the loader. The September 2014 sample uses
/// the first one.
const DATE_FORMATS: [&str; 2] = ["%m/%d/%Y %H:%M:%S", "%Y-%m-%d %H:%M:%S"];

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to download dataset: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to read CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Dataset is missing required column '{0}'")]
    MissingColumn(String),
    #[error("No rows with a valid timestamp")]
    NoValidRows,
}

/// Download the dataset and prepare it for analysis.
///
/// Fatal on network, HTTP or CSV errors; no retries and no partial results.
pub fn fetch(url: &str, max_rows: usize) -> Result<DataFrame, LoaderError> {
    log::info!("downloading dataset from {url} (max {max_rows} rows)");
    let started = Instant::now();

    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()?;
    let bytes = client.get(url).send()?.error_for_status()?.bytes()?;

    let df = load_from_bytes(&bytes, max_rows)?;
    log::info!("loaded {} rows in {:.1?}", df.height(), started.elapsed());
    Ok(df)
}

/// Parse at most `max_rows` records from raw (possibly gzipped) CSV bytes,
/// lowercase the column names, parse the timestamp column and derive the
/// `day_of_week` and `hour` columns.
pub fn load_from_bytes(bytes: &[u8], max_rows: usize) -> Result<DataFrame, LoaderError> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_n_rows(Some(max_rows))
        .with_infer_schema_length(Some(10000))
        .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
        .finish()?;

    normalize(df)
}

fn normalize(mut df: DataFrame) -> Result<DataFrame, LoaderError> {
    let lowered: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_lowercase())
        .collect();
    df.set_column_names(lowered)?;

    for required in [DATE_COLUMN, LAT_COLUMN, LON_COLUMN] {
        if df.column(required).is_err() {
            return Err(LoaderError::MissingColumn(required.to_string()));
        }
    }

    derive_time_columns(df)
}

/// Replace the raw timestamp strings with a datetime column and append the
/// derived day/hour columns. Rows whose timestamp does not parse are dropped.
fn derive_time_columns(df: DataFrame) -> Result<DataFrame, LoaderError> {
    let total = df.height();
    let raw = df.column(DATE_COLUMN)?.str()?;

    let mut keep: Vec<bool> = Vec::with_capacity(total);
    let mut stamps_ms: Vec<i64> = Vec::with_capacity(total);
    let mut day_names: Vec<String> = Vec::with_capacity(total);
    let mut hours: Vec<i32> = Vec::with_capacity(total);

    for value in raw {
        match value.and_then(parse_timestamp) {
            Some(ts) => {
                keep.push(true);
                stamps_ms.push(ts.and_utc().timestamp_millis());
                day_names
                    .push(DAY_ORDER[ts.weekday().num_days_from_monday() as usize].to_string());
                hours.push(ts.hour() as i32);
            }
            None => keep.push(false),
        }
    }

    let dropped = total - stamps_ms.len();
    if dropped > 0 {
        log::warn!("dropped {dropped} of {total} rows with unparseable timestamps");
    }
    if stamps_ms.is_empty() {
        return Err(LoaderError::NoValidRows);
    }

    let mask = BooleanChunked::from_slice("valid".into(), &keep);
    let mut df = df.filter(&mask)?;

    let parsed = Int64Chunked::from_vec(DATE_COLUMN.into(), stamps_ms)
        .into_datetime(TimeUnit::Milliseconds, None)
        .into_series();
    df.with_column(parsed)?;
    df.with_column(Column::new(DAY_COLUMN.into(), day_names))?;
    df.with_column(Column::new(HOUR_COLUMN.into(), hours))?;

    Ok(df)
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::testutil::SAMPLE_CSV;

    #[test]
    fn lowercases_columns_and_derives_features() {
        let df = load_from_bytes(SAMPLE_CSV.as_bytes(), 100).unwrap();
        assert_eq!(df.height(), 3);

        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        for expected in [DATE_COLUMN, LAT_COLUMN, LON_COLUMN, DAY_COLUMN, HOUR_COLUMN] {
            assert!(names.contains(&expected.to_string()), "missing {expected}");
        }

        let hours: Vec<i32> = df
            .column(HOUR_COLUMN)
            .unwrap()
            .i32()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(hours, vec![5, 5, 17]);
        for hour in &hours {
            assert!((0..24).contains(hour));
        }

        let days: Vec<&str> = df
            .column(DAY_COLUMN)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(days, vec!["Monday", "Monday", "Tuesday"]);
        for day in days {
            assert!(DAY_ORDER.contains(&day));
        }
    }

    #[test]
    fn caps_rows_at_requested_count() {
        let df = load_from_bytes(SAMPLE_CSV.as_bytes(), 2).unwrap();
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn drops_rows_with_bad_timestamps() {
        let csv = "Date/Time,Lat,Lon\nnot-a-date,40.70,-74.00\n9/1/2014 5:10:00,40.75,-73.99\n";
        let df = load_from_bytes(csv.as_bytes(), 100).unwrap();
        assert_eq!(df.height(), 1);
    }

    #[test]
    fn all_bad_timestamps_is_an_error() {
        let csv = "Date/Time,Lat,Lon\nnope,40.70,-74.00\nstill nope,40.71,-74.01\n";
        assert!(matches!(
            load_from_bytes(csv.as_bytes(), 100),
            Err(LoaderError::NoValidRows)
        ));
    }

    #[test]
    fn missing_coordinate_column_is_an_error() {
        let csv = "Date/Time,Lat\n9/1/2014 5:10:00,40.75\n";
        assert!(matches!(
            load_from_bytes(csv.as_bytes(), 100),
            Err(LoaderError::MissingColumn(_))
        ));
    }

    #[test]
    fn accepts_iso_timestamps() {
        let csv = "Date/Time,Lat,Lon\n2014-09-01 05:10:00,40.75,-73.99\n";
        let df = load_from_bytes(csv.as_bytes(), 100).unwrap();
        assert_eq!(df.height(), 1);
    }
}

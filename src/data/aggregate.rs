//! Grouped counts over the pickup table.

use polars::prelude::*;
use thiserror::Error;

use super::loader::{DAY_COLUMN, HOUR_COLUMN};

/// Weekday names in display order, Monday first.
pub const DAY_ORDER: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

pub const HOURS_PER_DAY: usize = 24;

#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("Unexpected value in '{column}': {value}")]
    BadValue {
        column: &'static str,
        value: String,
    },
}

/// Position of a weekday name in the Monday-first order.
pub fn day_index(name: &str) -> Option<usize> {
    DAY_ORDER.iter().position(|day| *day == name)
}

/// Count pickups per hour of day. Empty hours stay at zero.
pub fn count_by_hour(df: &DataFrame) -> Result<[u32; HOURS_PER_DAY], AggregateError> {
    let hours = df.column(HOUR_COLUMN)?.i32()?;

    let mut bins = [0u32; HOURS_PER_DAY];
    for hour in hours.into_no_null_iter() {
        match usize::try_from(hour).ok().filter(|h| *h < HOURS_PER_DAY) {
            Some(idx) => bins[idx] += 1,
            None => {
                return Err(AggregateError::BadValue {
                    column: HOUR_COLUMN,
                    value: hour.to_string(),
                })
            }
        }
    }

    Ok(bins)
}

/// Count pickups per day of week, returned in Monday-first order.
pub fn count_by_day(df: &DataFrame) -> Result<[u32; 7], AggregateError> {
    let days = df.column(DAY_COLUMN)?.str()?;

    let mut counts = [0u32; 7];
    for day in days.into_iter().flatten() {
        match day_index(day) {
            Some(idx) => counts[idx] += 1,
            None => {
                return Err(AggregateError::BadValue {
                    column: DAY_COLUMN,
                    value: day.to_string(),
                })
            }
        }
    }

    Ok(counts)
}

/// Cross-tab of pickups by day and hour. Rows follow the Monday-first day
/// order, columns are hours 0..24, missing combinations are zero-filled.
pub fn count_by_day_hour(df: &DataFrame) -> Result<[[u32; HOURS_PER_DAY]; 7], AggregateError> {
    let days = df.column(DAY_COLUMN)?.str()?;
    let hours = df.column(HOUR_COLUMN)?.i32()?;

    let mut grid = [[0u32; HOURS_PER_DAY]; 7];
    for (day, hour) in days.into_iter().zip(hours.into_iter()) {
        let (Some(day), Some(hour)) = (day, hour) else {
            continue;
        };
        let day_idx = day_index(day).ok_or_else(|| AggregateError::BadValue {
            column: DAY_COLUMN,
            value: day.to_string(),
        })?;
        let hour_idx = usize::try_from(hour)
            .ok()
            .filter(|h| *h < HOURS_PER_DAY)
            .ok_or_else(|| AggregateError::BadValue {
                column: HOUR_COLUMN,
                value: hour.to_string(),
            })?;
        grid[day_idx][hour_idx] += 1;
    }

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::testutil::sample_frame;

    #[test]
    fn hour_bins_match_scenario() {
        let df = sample_frame();
        let bins = count_by_hour(&df).unwrap();

        assert_eq!(bins.len(), 24);
        assert_eq!(bins[5], 2);
        assert_eq!(bins[17], 1);
        assert_eq!(bins.iter().sum::<u32>(), df.height() as u32);
        for (hour, count) in bins.iter().enumerate() {
            if hour != 5 && hour != 17 {
                assert_eq!(*count, 0, "hour {hour} should be empty");
            }
        }
    }

    #[test]
    fn day_counts_follow_canonical_order() {
        let df = sample_frame();
        let counts = count_by_day(&df).unwrap();

        assert_eq!(counts[0], 2); // Monday
        assert_eq!(counts[1], 1); // Tuesday
        assert_eq!(counts[2..].iter().sum::<u32>(), 0);
        assert_eq!(counts.iter().sum::<u32>(), df.height() as u32);
        assert_eq!(DAY_ORDER[0], "Monday");
        assert_eq!(DAY_ORDER[6], "Sunday");
    }

    #[test]
    fn cross_tab_is_zero_filled() {
        let df = sample_frame();
        let grid = count_by_day_hour(&df).unwrap();

        assert_eq!(grid[0][5], 2);
        assert_eq!(grid[1][17], 1);
        assert_eq!(grid.iter().flatten().sum::<u32>(), 3);
    }

    #[test]
    fn day_index_covers_the_week() {
        assert_eq!(day_index("Monday"), Some(0));
        assert_eq!(day_index("Sunday"), Some(6));
        assert_eq!(day_index("Funday"), None);
    }
}

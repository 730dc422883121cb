//! Pure row filters over the pickup table.

use polars::prelude::*;
use thiserror::Error;

use super::loader::{DATE_COLUMN, DAY_COLUMN, HOUR_COLUMN};

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Keep rows matching the derived-hour filter and the day-of-week membership
/// filter. An unset hour and an empty day list are both no-ops. The input is
/// not mutated.
pub fn by_hour_and_days(
    df: &DataFrame,
    hour: Option<i32>,
    days: &[String],
) -> Result<DataFrame, FilterError> {
    let mut predicate = lit(true);

    if let Some(hour) = hour {
        predicate = predicate.and(col(HOUR_COLUMN).eq(lit(hour)));
    }
    if !days.is_empty() {
        let membership = days.iter().fold(lit(false), |acc, day| {
            acc.or(col(DAY_COLUMN).eq(lit(day.clone())))
        });
        predicate = predicate.and(membership);
    }

    Ok(df.clone().lazy().filter(predicate).collect()?)
}

/// Keep rows whose original timestamp has the given hour component. Agrees
/// with filtering on the derived `hour` column (see tests).
pub fn by_exact_hour(df: &DataFrame, hour: i32) -> Result<DataFrame, FilterError> {
    Ok(df
        .clone()
        .lazy()
        .filter(col(DATE_COLUMN).dt().hour().eq(lit(hour)))
        .collect()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::testutil::sample_frame;

    #[test]
    fn unset_filters_keep_everything() {
        let df = sample_frame();
        let all = by_hour_and_days(&df, None, &[]).unwrap();
        assert!(all.equals(&df));
    }

    #[test]
    fn empty_day_list_is_a_no_op() {
        let df = sample_frame();
        let filtered = by_hour_and_days(&df, Some(5), &[]).unwrap();
        assert_eq!(filtered.height(), 2);

        // same result as restricting to the days actually present at hour 5
        let with_days =
            by_hour_and_days(&df, Some(5), &["Monday".to_string(), "Tuesday".to_string()])
                .unwrap();
        assert!(filtered.equals(&with_days));
    }

    #[test]
    fn membership_filter_keeps_selected_days() {
        let df = sample_frame();
        let tuesday = by_hour_and_days(&df, None, &["Tuesday".to_string()]).unwrap();
        assert_eq!(tuesday.height(), 1);
    }

    #[test]
    fn filtering_twice_matches_filtering_once() {
        let df = sample_frame();
        let days = vec!["Monday".to_string()];
        let once = by_hour_and_days(&df, Some(5), &days).unwrap();
        let twice = by_hour_and_days(&once, Some(5), &days).unwrap();
        assert!(once.equals(&twice));
    }

    #[test]
    fn exact_hour_matches_derived_hour() {
        let df = sample_frame();
        let by_timestamp = by_exact_hour(&df, 17).unwrap();
        assert_eq!(by_timestamp.height(), 1);

        let by_derived = by_hour_and_days(&df, Some(17), &[]).unwrap();
        assert!(by_timestamp.equals(&by_derived));
    }

    #[test]
    fn no_match_yields_empty_table() {
        let df = sample_frame();
        let empty = by_exact_hour(&df, 3).unwrap();
        assert_eq!(empty.height(), 0);
    }
}

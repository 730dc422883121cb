//! Data module - dataset loading, caching, aggregation and filtering

mod aggregate;
mod cache;
mod export;
mod filter;
mod loader;

pub use aggregate::{
    count_by_day, count_by_day_hour, count_by_hour, day_index, DAY_ORDER, HOURS_PER_DAY,
};
pub use cache::TableCache;
pub use export::write_csv;
pub use filter::{by_exact_hour, by_hour_and_days};
pub use loader::{
    fetch, load_from_bytes, LoaderError, DATE_COLUMN, DAY_COLUMN, HOUR_COLUMN, LAT_COLUMN,
    LON_COLUMN,
};

#[cfg(test)]
pub(crate) mod testutil {
    use polars::prelude::DataFrame;

    /// Three pickups: hours [5, 5, 17], days [Monday, Monday, Tuesday].
    /// September 1st 2014 was a Monday.
    pub(crate) const SAMPLE_CSV: &str = "\
Date/Time,Lat,Lon,Base
9/1/2014 5:10:00,40.7500,-73.9900,B02512
9/1/2014 5:45:00,40.7600,-73.9800,B02512
9/2/2014 17:20:00,40.7400,-74.0000,B02512
";

    pub(crate) fn sample_frame() -> DataFrame {
        super::load_from_bytes(SAMPLE_CSV.as_bytes(), 100).expect("sample data loads")
    }
}

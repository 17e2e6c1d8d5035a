//! Stats module - Percentiles and summaries

mod calculator;

pub use calculator::{BoxStats, OutlierBounds, StatsCalculator, LOWER_QUANTILE, UPPER_QUANTILE};

//! Data Processor Module
//! Outlier removal and the reshaping each chart needs.

use crate::data::calendar::{self, MONTH_ABBREVIATIONS};
use crate::data::loader::{DailyViews, PageViewTable};
use crate::stats::{OutlierBounds, StatsCalculator};
use chrono::{Datelike, Month};
use std::collections::HashMap;
use thiserror::Error;

/// Year of the zero rows padding the bar chart axis.
pub const PADDING_YEAR: i32 = 2016;
/// Months of `PADDING_YEAR` padded with zero, in order.
pub const PADDING_MONTHS: [Month; 4] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
];

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Cannot compute percentiles of an empty table")]
    EmptyInput,
}

/// Table with outliers removed, plus the bounds that were applied.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedTable {
    pub table: PageViewTable,
    pub bounds: OutlierBounds,
}

impl CleanedTable {
    pub fn rows(&self) -> &[DailyViews] {
        self.table.rows()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Average page views for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyAverage {
    pub year: i32,
    pub month: Month,
    pub average: i64,
}

impl MonthlyAverage {
    pub fn month_name(&self) -> &'static str {
        self.month.name()
    }
}

/// One daily observation keyed for the box charts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxRow {
    pub year: i32,
    pub month: &'static str,
    pub value: f64,
}

/// Handles data cleaning and transformation operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Keep rows whose value lies within the 2.5th..97.5th percentile range.
    ///
    /// Bounds come from the full table and are inclusive; row order is kept.
    pub fn remove_outliers(table: &PageViewTable) -> Result<CleanedTable, ProcessorError> {
        let bounds =
            StatsCalculator::outlier_bounds(&table.values()).ok_or(ProcessorError::EmptyInput)?;

        let kept = table
            .rows()
            .iter()
            .filter(|row| bounds.contains(row.value as f64))
            .copied()
            .collect();

        Ok(CleanedTable {
            table: kept,
            bounds,
        })
    }

    /// Mean views per (year, month), padded with zero rows for early 2016.
    ///
    /// Groups keep the order in which they first appear; the padding rows come first.
    pub fn monthly_averages(cleaned: &CleanedTable) -> Vec<MonthlyAverage> {
        let mut index: HashMap<(i32, u32), usize> = HashMap::new();
        let mut groups: Vec<(i32, Month, Vec<f64>)> = Vec::new();

        for row in cleaned.rows() {
            let key = (row.date.year(), row.date.month());
            let slot = *index.entry(key).or_insert_with(|| {
                groups.push((key.0, calendar::month_of(row.date), Vec::new()));
                groups.len() - 1
            });
            groups[slot].2.push(row.value as f64);
        }

        let padding = PADDING_MONTHS.iter().map(|&month| MonthlyAverage {
            year: PADDING_YEAR,
            month,
            average: 0,
        });

        padding
            .chain(groups.into_iter().filter_map(|(year, month, values)| {
                StatsCalculator::rounded_mean(&values).map(|average| MonthlyAverage {
                    year,
                    month,
                    average,
                })
            }))
            .collect()
    }

    /// One row per cleaned observation with year and short month label.
    pub fn box_rows(cleaned: &CleanedTable) -> Vec<BoxRow> {
        cleaned
            .rows()
            .iter()
            .map(|row| BoxRow {
                year: row.date.year(),
                month: calendar::abbreviation(calendar::month_of(row.date)),
                value: row.value as f64,
            })
            .collect()
    }

    /// Values grouped by year, years ascending.
    pub fn group_by_year(rows: &[BoxRow]) -> Vec<(i32, Vec<f64>)> {
        let mut years: Vec<i32> = rows.iter().map(|r| r.year).collect();
        years.sort_unstable();
        years.dedup();

        years
            .into_iter()
            .map(|year| {
                let values = rows
                    .iter()
                    .filter(|r| r.year == year)
                    .map(|r| r.value)
                    .collect();
                (year, values)
            })
            .collect()
    }

    /// Values grouped by month label in the fixed order Jan..Dec.
    ///
    /// Every month is present; months without data get an empty group.
    pub fn group_by_month(rows: &[BoxRow]) -> Vec<(&'static str, Vec<f64>)> {
        MONTH_ABBREVIATIONS
            .iter()
            .map(|&label| {
                let values = rows
                    .iter()
                    .filter(|r| r.month == label)
                    .map(|r| r.value)
                    .collect();
                (label, values)
            })
            .collect()
    }
}

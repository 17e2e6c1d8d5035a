//! CSV Data Loader Module
//! Reads the daily page-view CSV with Polars into a date-indexed table.

use chrono::NaiveDate;
use polars::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

pub const DATE_COLUMN: &str = "date";
pub const VALUE_COLUMN: &str = "value";
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Row {row}: invalid date {value:?}")]
    InvalidDate { row: usize, value: String },
    #[error("Row {row}: missing {column}")]
    MissingValue { row: usize, column: &'static str },
    #[error("Row {row}: value {value:?} is not an integer")]
    InvalidValue { row: usize, value: String },
}

/// One day of page views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyViews {
    pub date: NaiveDate,
    pub value: i64,
}

/// Page views keyed by calendar date, in file order.
///
/// Duplicate or unsorted dates are kept as they appear in the source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageViewTable {
    rows: Vec<DailyViews>,
}

impl PageViewTable {
    pub fn new(rows: Vec<DailyViews>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[DailyViews] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value column as floats, for the statistics code.
    pub fn values(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.value as f64).collect()
    }
}

impl FromIterator<DailyViews> for PageViewTable {
    fn from_iter<I: IntoIterator<Item = DailyViews>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Handles CSV file loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load the CSV and convert it into a typed table.
    ///
    /// Any unparseable date or value aborts the whole load.
    pub fn load_csv(file_path: &Path) -> Result<PageViewTable, LoaderError> {
        let df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .finish()?
            .collect()?;
        debug!(rows = df.height(), columns = ?df.get_column_names(), "CSV read");

        Self::to_table(&df)
    }

    /// Convert a `date`/`value` DataFrame into rows.
    pub fn to_table(df: &DataFrame) -> Result<PageViewTable, LoaderError> {
        let date_col = df.column(DATE_COLUMN)?.cast(&DataType::String)?;
        let dates = date_col.str()?;
        let values = Self::integer_values(df.column(VALUE_COLUMN)?)?;

        let mut rows = Vec::with_capacity(df.height());
        for (row, (date, value)) in dates.into_iter().zip(values).enumerate() {
            let date = date.ok_or(LoaderError::MissingValue {
                row,
                column: DATE_COLUMN,
            })?;
            let date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).map_err(|_| {
                LoaderError::InvalidDate {
                    row,
                    value: date.to_string(),
                }
            })?;
            let value = value.ok_or(LoaderError::MissingValue {
                row,
                column: VALUE_COLUMN,
            })?;
            rows.push(DailyViews { date, value });
        }

        Ok(PageViewTable::new(rows))
    }

    /// Read the value column as whole numbers without truncating.
    ///
    /// Integer columns pass through; float columns are accepted only where
    /// every value is integral; anything else must parse as `i64`.
    fn integer_values(column: &Column) -> Result<Vec<Option<i64>>, LoaderError> {
        let dtype = column.dtype();
        if dtype.is_integer() {
            let ints = column.cast(&DataType::Int64)?;
            return Ok(ints.i64()?.into_iter().collect());
        }

        if dtype.is_float() {
            let floats = column.cast(&DataType::Float64)?;
            return floats
                .f64()?
                .into_iter()
                .enumerate()
                .map(|(row, value)| match value {
                    Some(v) if v.is_finite() && v.fract() == 0.0 => Ok(Some(v as i64)),
                    Some(v) => Err(LoaderError::InvalidValue {
                        row,
                        value: v.to_string(),
                    }),
                    None => Ok(None),
                })
                .collect();
        }

        let text = column.cast(&DataType::String)?;
        text.str()?
            .into_iter()
            .enumerate()
            .map(|(row, value)| match value {
                Some(s) => s.trim().parse::<i64>().map(Some).map_err(|_| {
                    LoaderError::InvalidValue {
                        row,
                        value: s.to_string(),
                    }
                }),
                None => Ok(None),
            })
            .collect()
    }
}

//! Data module - CSV loading and processing

pub mod calendar;
mod loader;
mod processor;

pub use loader::{DailyViews, DataLoader, LoaderError, PageViewTable};
pub use processor::{
    BoxRow, CleanedTable, DataProcessor, MonthlyAverage, ProcessorError, PADDING_MONTHS,
    PADDING_YEAR,
};

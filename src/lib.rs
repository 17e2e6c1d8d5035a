//! Page-view charts - cleans a daily page-view series and renders static charts.
//!
//! The pipeline is Load → Clean → {line, bar, box}. Each chart takes the
//! cleaned table as an explicit argument; nothing is shared between runs.

pub mod charts;
pub mod config;
pub mod data;
pub mod stats;

use anyhow::{Context, Result};
use charts::StaticChartRenderer;
use config::Config;
use data::{CleanedTable, DataLoader, DataProcessor};
use std::path::PathBuf;
use tracing::info;

/// Files written by one run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub loaded_rows: usize,
    pub cleaned_rows: usize,
    pub line_plot: PathBuf,
    pub bar_plot: PathBuf,
    pub box_plot: PathBuf,
}

/// Load and clean the input CSV.
pub fn load_and_clean(config: &Config) -> Result<(usize, CleanedTable)> {
    let table = DataLoader::load_csv(&config.input_path)
        .with_context(|| format!("Failed to load {}", config.input_path.display()))?;
    info!(rows = table.len(), path = %config.input_path.display(), "Loaded page views");

    let cleaned = DataProcessor::remove_outliers(&table).context("Failed to clean data")?;
    info!(
        kept = cleaned.len(),
        dropped = table.len() - cleaned.len(),
        low = cleaned.bounds.low,
        high = cleaned.bounds.high,
        "Removed outliers"
    );

    Ok((table.len(), cleaned))
}

/// Draw the daily line chart.
pub fn draw_line_plot(cleaned: &CleanedTable, config: &Config) -> Result<PathBuf> {
    let path = config.line_plot_path();
    StaticChartRenderer::render_line(cleaned, &path, config.line_plot_size)
        .with_context(|| format!("Failed to draw {}", path.display()))?;
    info!(path = %path.display(), "Wrote line plot");
    Ok(path)
}

/// Draw the monthly average bar chart.
pub fn draw_bar_plot(cleaned: &CleanedTable, config: &Config) -> Result<PathBuf> {
    let averages = DataProcessor::monthly_averages(cleaned);
    let path = config.bar_plot_path();
    StaticChartRenderer::render_bar(&averages, &path, config.bar_plot_size)
        .with_context(|| format!("Failed to draw {}", path.display()))?;
    info!(path = %path.display(), groups = averages.len(), "Wrote bar plot");
    Ok(path)
}

/// Draw the year-wise and month-wise box plots.
pub fn draw_box_plot(cleaned: &CleanedTable, config: &Config) -> Result<PathBuf> {
    let rows = DataProcessor::box_rows(cleaned);
    let path = config.box_plot_path();
    StaticChartRenderer::render_box(&rows, &path, config.box_plot_size)
        .with_context(|| format!("Failed to draw {}", path.display()))?;
    info!(path = %path.display(), "Wrote box plot");
    Ok(path)
}

/// Run the whole pipeline once.
pub fn run(config: &Config) -> Result<RunOutput> {
    let (loaded_rows, cleaned) = load_and_clean(config)?;

    Ok(RunOutput {
        loaded_rows,
        cleaned_rows: cleaned.len(),
        line_plot: draw_line_plot(&cleaned, config)?,
        bar_plot: draw_bar_plot(&cleaned, config)?,
        box_plot: draw_box_plot(&cleaned, config)?,
    })
}

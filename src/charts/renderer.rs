//! Static Chart Renderer
//! Writes the three PNG charts with plotters' bitmap backend.
//!
//! Layout:
//! 1. Line chart: cleaned daily series, ticks every January and July
//! 2. Bar chart: monthly averages grouped by year, one colour per month
//! 3. Box chart: two panels side by side
//!    - Left: Year-wise Box Plot (Trend)
//!    - Right: Month-wise Box Plot (Seasonality), Jan..Dec

use crate::charts::plotter::{CategoryAxis, ChartPlotter, GROUP_WIDTH, LINE_COLOR};
use crate::data::{BoxRow, CleanedTable, DataProcessor, MonthlyAverage};
use crate::stats::StatsCalculator;
use chrono::{Datelike, NaiveDate};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

pub const LINE_TITLE: &str = "Daily freeCodeCamp Forum Page Views 5/2016-12/2019";
pub const YEAR_BOX_TITLE: &str = "Year-wise Box Plot (Trend)";
pub const MONTH_BOX_TITLE: &str = "Month-wise Box Plot (Seasonality)";
const LEGEND_TITLE: &str = "Months";
/// Legend box offset from the plotting area's top-left corner, in pixels.
const LEGEND_X: i32 = 10;
const LEGEND_Y: i32 = 30;

const FONT: &str = "sans-serif";

/// Errors that can occur during plot generation
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

type Result<T> = core::result::Result<T, PlotError>;

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Draw the cleaned daily series as a line chart.
    pub fn render_line(
        cleaned: &CleanedTable,
        output_path: &Path,
        size: (u32, u32),
    ) -> Result<()> {
        let rows = cleaned.rows();
        if rows.is_empty() {
            return Err(PlotError::InvalidData("No rows to plot".to_string()));
        }

        let first = rows.iter().map(|r| r.date).min().unwrap_or_default();
        let last = rows.iter().map(|r| r.date).max().unwrap_or_default();
        let ticks: Vec<i32> = ChartPlotter::half_year_ticks(first, last)
            .into_iter()
            .map(|d| d.num_days_from_ce())
            .collect();
        let (y_min, y_max) = Self::padded_range(rows.iter().map(|r| r.value as f64));

        let root = BitMapBackend::new(output_path, size).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

        let x_range =
            (first.num_days_from_ce()..last.num_days_from_ce() + 1).with_key_points(ticks);
        let mut chart = ChartBuilder::on(&root)
            .caption(LINE_TITLE, (FONT, 24))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d(x_range, y_min..y_max)
            .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc("Date")
            .y_desc("Page Views")
            .label_style((FONT, 14))
            .axis_desc_style((FONT, 18))
            .x_label_formatter(&|days| {
                NaiveDate::from_num_days_from_ce_opt(*days)
                    .map(ChartPlotter::format_year_month)
                    .unwrap_or_default()
            })
            .y_label_formatter(&|v| format!("{:.0}", v))
            .draw()
            .map_err(|e| PlotError::Drawing(e.to_string()))?;

        chart
            .draw_series(LineSeries::new(
                rows.iter().map(|r| (r.date.num_days_from_ce(), r.value as f64)),
                LINE_COLOR.stroke_width(1),
            ))
            .map_err(|e| PlotError::Drawing(e.to_string()))?;

        root.present()
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
        Ok(())
    }

    /// Draw monthly averages as bars grouped by year with one hue per month.
    pub fn render_bar(
        averages: &[MonthlyAverage],
        output_path: &Path,
        size: (u32, u32),
    ) -> Result<()> {
        if averages.is_empty() {
            return Err(PlotError::InvalidData(
                "No monthly averages to plot".to_string(),
            ));
        }

        let data = ChartPlotter::bar_chart_data(averages);
        let year_labels: Vec<String> = data.years.iter().map(|y| y.to_string()).collect();
        let hue_count = data.hues.len();
        let y_max = data.bars.iter().map(|b| b.value).max().unwrap_or(0).max(1) as f64 * 1.05;

        let root = BitMapBackend::new(output_path, size).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .x_label_area_size(70)
            .y_label_area_size(80)
            .build_cartesian_2d(CategoryAxis::new(data.years.len()), 0.0..y_max)
            .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc("Years")
            .y_desc("Average Page Views")
            .axis_desc_style((FONT, 18))
            .x_label_style((FONT, 14).into_font().transform(FontTransform::Rotate90))
            .y_label_style((FONT, 14))
            .x_label_formatter(&|x| ChartPlotter::category_label(&year_labels, *x))
            .y_label_formatter(&|v| format!("{:.0}", v))
            .draw()
            .map_err(|e| PlotError::Drawing(e.to_string()))?;

        for hue_index in 0..hue_count {
            let color = ChartPlotter::bright(hue_index);
            let bars = data
                .bars
                .iter()
                .filter(|b| b.hue_index == hue_index)
                .map(|b| {
                    let (left, right) = ChartPlotter::bar_span(b.year_index, hue_index, hue_count);
                    Rectangle::new([(left, 0.0), (right, b.value as f64)], color.filled())
                });

            chart
                .draw_series(bars)
                .map_err(|e| PlotError::Drawing(e.to_string()))?
                .label(data.legend_labels.get(hue_index).copied().unwrap_or_default())
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled())
                });
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::Coordinate(LEGEND_X, LEGEND_Y))
            .label_font((FONT, 14))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(|e| PlotError::Drawing(e.to_string()))?;

        // Legend title sits just above the legend box.
        chart
            .plotting_area()
            .strip_coord_spec()
            .draw(&Text::new(
                LEGEND_TITLE,
                (LEGEND_X + 4, LEGEND_Y - 20),
                (FONT, 15).into_font(),
            ))
            .map_err(|e| PlotError::Drawing(e.to_string()))?;

        root.present()
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
        Ok(())
    }

    /// Draw the year-wise and month-wise box plots side by side.
    pub fn render_box(rows: &[BoxRow], output_path: &Path, size: (u32, u32)) -> Result<()> {
        if rows.is_empty() {
            return Err(PlotError::InvalidData("No rows to plot".to_string()));
        }

        let (year_labels, year_groups): (Vec<String>, Vec<Vec<f64>>) =
            DataProcessor::group_by_year(rows)
                .into_iter()
                .map(|(year, values)| (year.to_string(), values))
                .unzip();
        let (month_labels, month_groups): (Vec<String>, Vec<Vec<f64>>) =
            DataProcessor::group_by_month(rows)
                .into_iter()
                .map(|(month, values)| (month.to_string(), values))
                .unzip();

        let year_colors: Vec<RGBColor> = (0..year_labels.len()).map(ChartPlotter::bright).collect();
        let month_colors = ChartPlotter::husl_palette(month_labels.len());
        let y_range = Self::padded_range(rows.iter().map(|r| r.value));

        let root = BitMapBackend::new(output_path, size).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| PlotError::DrawingArea(e.to_string()))?;
        let (left, right) = root.split_horizontally(size.0 / 2);

        Self::draw_box_panel(
            &left,
            YEAR_BOX_TITLE,
            "Year",
            &year_labels,
            &year_groups,
            &year_colors,
            y_range,
        )?;
        Self::draw_box_panel(
            &right,
            MONTH_BOX_TITLE,
            "Month",
            &month_labels,
            &month_groups,
            &month_colors,
            y_range,
        )?;

        root.present()
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
        Ok(())
    }

    fn draw_box_panel(
        area: &DrawingArea<BitMapBackend<'_>, Shift>,
        title: &str,
        x_desc: &str,
        labels: &[String],
        groups: &[Vec<f64>],
        colors: &[RGBColor],
        (y_min, y_max): (f64, f64),
    ) -> Result<()> {
        let mut chart = ChartBuilder::on(area)
            .caption(title, (FONT, 20))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(80)
            .build_cartesian_2d(CategoryAxis::new(labels.len()), y_min..y_max)
            .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(x_desc)
            .y_desc("Page Views")
            .label_style((FONT, 14))
            .axis_desc_style((FONT, 16))
            .x_label_formatter(&|x| ChartPlotter::category_label(labels, *x))
            .y_label_formatter(&|v| format!("{:.0}", v))
            .draw()
            .map_err(|e| PlotError::Drawing(e.to_string()))?;

        let half = GROUP_WIDTH / 2.0;
        let cap = half / 2.0;
        for (i, values) in groups.iter().enumerate() {
            // Empty groups keep their slot but draw nothing.
            let Some(stats) = StatsCalculator::box_stats(values) else {
                continue;
            };
            let x = i as f64;
            let color = colors.get(i).copied().unwrap_or(BLACK);
            let outline = BLACK.stroke_width(1);

            chart
                .draw_series([
                    Rectangle::new([(x - half, stats.q1), (x + half, stats.q3)], color.filled()),
                    Rectangle::new([(x - half, stats.q1), (x + half, stats.q3)], outline),
                ])
                .map_err(|e| PlotError::Drawing(e.to_string()))?;

            chart
                .draw_series([
                    // Median
                    PathElement::new(
                        vec![(x - half, stats.median), (x + half, stats.median)],
                        outline,
                    ),
                    // Whiskers
                    PathElement::new(vec![(x, stats.q1), (x, stats.whisker_low)], outline),
                    PathElement::new(vec![(x, stats.q3), (x, stats.whisker_high)], outline),
                    // Caps
                    PathElement::new(
                        vec![(x - cap, stats.whisker_low), (x + cap, stats.whisker_low)],
                        outline,
                    ),
                    PathElement::new(
                        vec![(x - cap, stats.whisker_high), (x + cap, stats.whisker_high)],
                        outline,
                    ),
                ])
                .map_err(|e| PlotError::Drawing(e.to_string()))?;

            chart
                .draw_series(stats.fliers.iter().map(|&v| Circle::new((x, v), 3, outline)))
                .map_err(|e| PlotError::Drawing(e.to_string()))?;
        }

        Ok(())
    }

    /// Min/max of the values with 5% headroom either side.
    fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
        let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        if !min.is_finite() {
            return (0.0, 1.0);
        }
        let pad = ((max - min) * 0.05).max(1.0);
        (min - pad, max + pad)
    }
}

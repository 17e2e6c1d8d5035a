//! Chart Plotter Module
//! Colours, axis ticks and bar layout shared by the static renderers.

use crate::data::calendar::MONTH_NAMES;
use crate::data::MonthlyAverage;
use chrono::{Datelike, Month, NaiveDate};
use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint, Ranged};
use plotters::style::{Color, HSLColor, RGBAColor, RGBColor};
use std::ops::Range;

/// Line chart colour (#D62728)
pub const LINE_COLOR: RGBColor = RGBColor(214, 39, 40);

/// seaborn "bright" palette
pub const BRIGHT_PALETTE: [RGBColor; 10] = [
    RGBColor(2, 62, 255),    // Blue
    RGBColor(255, 124, 0),   // Orange
    RGBColor(26, 201, 56),   // Green
    RGBColor(232, 0, 11),    // Red
    RGBColor(139, 43, 226),  // Purple
    RGBColor(159, 72, 0),    // Brown
    RGBColor(241, 76, 193),  // Pink
    RGBColor(163, 163, 163), // Grey
    RGBColor(255, 196, 0),   // Yellow
    RGBColor(0, 215, 255),   // Cyan
];

/// Share of a category slot covered by its bars or box.
pub const GROUP_WIDTH: f64 = 0.8;

/// One bar of the grouped monthly chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub year_index: usize,
    pub hue_index: usize,
    pub value: i64,
}

/// Grouped bar chart input: year categories, month hues and legend text.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChartData {
    pub years: Vec<i32>,
    pub hues: Vec<Month>,
    pub bars: Vec<Bar>,
    /// Legend text per hue position.
    pub legend_labels: Vec<&'static str>,
}

/// Category x axis: slot `i` spans `i - 0.5..i + 0.5`, ticks only at slot centres.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryAxis {
    count: usize,
}

impl CategoryAxis {
    pub fn new(count: usize) -> Self {
        Self {
            count: count.max(1),
        }
    }

    pub fn centres(&self) -> Vec<f64> {
        (0..self.count).map(|i| i as f64).collect()
    }
}

impl Ranged for CategoryAxis {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        let range = self.range();
        let t = (value - range.start) / (range.end - range.start);
        limit.0 + ((limit.1 - limit.0) as f64 * t).round() as i32
    }

    fn key_points<Hint: KeyPointHint>(&self, _hint: Hint) -> Vec<f64> {
        self.centres()
    }

    fn range(&self) -> Range<f64> {
        -0.5..self.count as f64 - 0.5
    }
}

/// Creates chart inputs from the processed tables.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Palette colour for a category, cycling.
    pub fn bright(index: usize) -> RGBColor {
        BRIGHT_PALETTE[index % BRIGHT_PALETTE.len()]
    }

    /// `n` colours evenly spaced in hue, starting just past red.
    pub fn husl_palette(n: usize) -> Vec<RGBColor> {
        (0..n)
            .map(|i| {
                let hue = (0.01 + i as f64 / n as f64) % 1.0;
                let RGBAColor(r, g, b, _) = HSLColor(hue, 0.65, 0.6).to_rgba();
                RGBColor(r, g, b)
            })
            .collect()
    }

    /// 1 January and 1 July dates falling within `[start, end]`.
    pub fn half_year_ticks(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        if start > end {
            return Vec::new();
        }
        (start.year()..=end.year())
            .flat_map(|year| {
                [1, 7]
                    .into_iter()
                    .filter_map(move |month| NaiveDate::from_ymd_opt(year, month, 1))
            })
            .filter(|d| *d >= start && *d <= end)
            .collect()
    }

    /// Tick label for the line chart's date axis.
    pub fn format_year_month(date: NaiveDate) -> String {
        date.format("%Y-%m").to_string()
    }

    /// Legend labels for `hue_count` hues.
    ///
    /// Labels are assigned by position from January onward, not by the month
    /// each hue actually holds.
    pub fn legend_labels(hue_count: usize) -> Vec<&'static str> {
        MONTH_NAMES.iter().copied().take(hue_count).collect()
    }

    /// Lay out the monthly averages as years x month hues, both in first-seen order.
    pub fn bar_chart_data(averages: &[MonthlyAverage]) -> BarChartData {
        let mut years: Vec<i32> = Vec::new();
        let mut hues: Vec<Month> = Vec::new();
        let mut bars = Vec::with_capacity(averages.len());

        for avg in averages {
            let year_index = Self::position_or_push(&mut years, avg.year);
            let hue_index = Self::position_or_push(&mut hues, avg.month);
            bars.push(Bar {
                year_index,
                hue_index,
                value: avg.average,
            });
        }

        let legend_labels = Self::legend_labels(hues.len());
        BarChartData {
            years,
            hues,
            bars,
            legend_labels,
        }
    }

    fn position_or_push<T: PartialEq + Copy>(items: &mut Vec<T>, item: T) -> usize {
        match items.iter().position(|x| *x == item) {
            Some(pos) => pos,
            None => {
                items.push(item);
                items.len() - 1
            }
        }
    }

    /// Horizontal extent of a bar within its category slot centred on `category`.
    pub fn bar_span(category: usize, hue_index: usize, hue_count: usize) -> (f64, f64) {
        let width = GROUP_WIDTH / hue_count.max(1) as f64;
        let left = category as f64 - GROUP_WIDTH / 2.0 + hue_index as f64 * width;
        (left, left + width)
    }

    /// Label for a category axis tick, empty between categories.
    pub fn category_label(labels: &[String], position: f64) -> String {
        let idx = position.round();
        if idx < 0.0 || (position - idx).abs() > 1e-6 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn avg(year: i32, month: Month, average: i64) -> MonthlyAverage {
        MonthlyAverage {
            year,
            month,
            average,
        }
    }

    #[test]
    fn test_half_year_ticks() {
        let start = NaiveDate::from_ymd_opt(2016, 5, 9).unwrap();
        let end = NaiveDate::from_ymd_opt(2019, 12, 3).unwrap();
        let ticks: Vec<String> = ChartPlotter::half_year_ticks(start, end)
            .into_iter()
            .map(ChartPlotter::format_year_month)
            .collect();
        assert_eq!(
            ticks,
            vec!["2016-07", "2017-01", "2017-07", "2018-01", "2018-07", "2019-01", "2019-07"]
        );
        assert!(ChartPlotter::half_year_ticks(end, start).is_empty());
    }

    #[test]
    fn test_bar_chart_data_first_seen_order() {
        let averages = vec![
            avg(2016, Month::January, 0),
            avg(2016, Month::May, 19432),
            avg(2017, Month::January, 32785),
            avg(2017, Month::May, 29369),
        ];
        let data = ChartPlotter::bar_chart_data(&averages);

        assert_eq!(data.years, vec![2016, 2017]);
        assert_eq!(data.hues, vec![Month::January, Month::May]);
        assert_eq!(
            data.bars[3],
            Bar {
                year_index: 1,
                hue_index: 1,
                value: 29369
            }
        );
    }

    #[test]
    fn test_legend_labels_are_positional() {
        // hue order May, January: labels still read January, February
        let averages = vec![avg(2017, Month::May, 1), avg(2017, Month::January, 2)];
        let data = ChartPlotter::bar_chart_data(&averages);
        assert_eq!(data.hues, vec![Month::May, Month::January]);
        assert_eq!(data.legend_labels, vec!["January", "February"]);

        assert_eq!(ChartPlotter::legend_labels(20).len(), 12);
    }

    #[test]
    fn test_legend_labels_match_hues_when_padding_leads() {
        let mut averages: Vec<MonthlyAverage> = crate::data::PADDING_MONTHS
            .into_iter()
            .map(|m| avg(2016, m, 0))
            .collect();
        for n in 5..=12u8 {
            averages.push(avg(2016, Month::try_from(n).unwrap(), 100));
        }
        let data = ChartPlotter::bar_chart_data(&averages);
        let keyed: Vec<&str> = data.hues.iter().map(|m| m.name()).collect();
        assert_eq!(data.legend_labels, keyed);
    }

    #[test]
    fn test_bar_span_tiles_group_width() {
        let (l0, r0) = ChartPlotter::bar_span(2, 0, 4);
        let (l3, r3) = ChartPlotter::bar_span(2, 3, 4);
        assert!((l0 - 1.6).abs() < 1e-9);
        assert!((r0 - 1.8).abs() < 1e-9);
        assert!((l3 - 2.2).abs() < 1e-9);
        assert!((r3 - 2.4).abs() < 1e-9);
    }

    #[test]
    fn test_category_label() {
        let labels = vec!["2016".to_string(), "2017".to_string()];
        assert_eq!(ChartPlotter::category_label(&labels, 1.0), "2017");
        assert_eq!(ChartPlotter::category_label(&labels, 0.5), "");
        assert_eq!(ChartPlotter::category_label(&labels, 2.0), "");
        assert_eq!(ChartPlotter::category_label(&labels, -1.0), "");
    }

    #[test]
    fn test_category_axis_maps_slots() {
        let axis = CategoryAxis::new(2);
        assert_eq!(axis.centres(), vec![0.0, 1.0]);
        assert_eq!(axis.range(), -0.5..1.5);
        assert_eq!(axis.map(&-0.5, (0, 100)), 0);
        assert_eq!(axis.map(&0.0, (0, 100)), 25);
        assert_eq!(axis.map(&1.5, (0, 100)), 100);
        // y-style reversed pixel range
        assert_eq!(axis.map(&1.0, (100, 0)), 25);
        assert_eq!(CategoryAxis::new(0).centres(), vec![0.0]);
    }

    #[test]
    fn test_palettes() {
        assert_eq!(ChartPlotter::bright(0), ChartPlotter::bright(10));
        let husl = ChartPlotter::husl_palette(12);
        assert_eq!(husl.len(), 12);
        assert_ne!(husl[0], husl[6]);
    }
}

//! Statistics Calculator Module
//! Percentiles, outlier bounds, rounded group means and box-plot summaries.

/// Lower percentile used to trim outliers.
pub const LOWER_QUANTILE: f64 = 2.5;
/// Upper percentile used to trim outliers.
pub const UPPER_QUANTILE: f64 = 97.5;
/// Whisker reach in multiples of the interquartile range.
pub const WHISKER_IQR: f64 = 1.5;

/// Inclusive value range kept by the cleaner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlierBounds {
    pub low: f64,
    pub high: f64,
}

impl OutlierBounds {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }
}

/// Summary drawn for one box.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub count: usize,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Smallest observation within `q1 - 1.5 * IQR`.
    pub whisker_low: f64,
    /// Largest observation within `q3 + 1.5 * IQR`.
    pub whisker_high: f64,
    /// Observations beyond the whiskers, ascending.
    pub fliers: Vec<f64>,
}

/// Handles statistical calculations.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Calculate percentile using linear interpolation (NumPy compatible).
    ///
    /// `sorted_values` must be ascending; `p` is in percent.
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        // a + (b - a) * t stays exact when a == b
        let (a, b) = (sorted_values[lower], sorted_values[upper]);
        if lower == upper {
            a
        } else {
            a + (b - a) * frac
        }
    }

    pub fn sorted(values: &[f64]) -> Vec<f64> {
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        sorted
    }

    /// 2.5th / 97.5th percentile of the full set. `None` when empty.
    pub fn outlier_bounds(values: &[f64]) -> Option<OutlierBounds> {
        if values.is_empty() {
            return None;
        }
        let sorted = Self::sorted(values);
        Some(OutlierBounds {
            low: Self::percentile(&sorted, LOWER_QUANTILE),
            high: Self::percentile(&sorted, UPPER_QUANTILE),
        })
    }

    /// Arithmetic mean rounded half-to-even. `None` when empty.
    pub fn rounded_mean(values: &[f64]) -> Option<i64> {
        if values.is_empty() {
            return None;
        }
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        Some(mean.round_ties_even() as i64)
    }

    /// Quartiles, whiskers and fliers for a box plot. `None` when empty.
    pub fn box_stats(values: &[f64]) -> Option<BoxStats> {
        if values.is_empty() {
            return None;
        }

        let sorted = Self::sorted(values);
        let q1 = Self::percentile(&sorted, 25.0);
        let median = Self::percentile(&sorted, 50.0);
        let q3 = Self::percentile(&sorted, 75.0);
        let iqr = q3 - q1;
        let fence_low = q1 - WHISKER_IQR * iqr;
        let fence_high = q3 + WHISKER_IQR * iqr;

        let whisker_low = sorted
            .iter()
            .copied()
            .find(|&v| v >= fence_low)
            .unwrap_or(q1);
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= fence_high)
            .unwrap_or(q3);
        let fliers = sorted
            .iter()
            .copied()
            .filter(|&v| v < whisker_low || v > whisker_high)
            .collect();

        Some(BoxStats {
            count: sorted.len(),
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
            fliers,
        })
    }
}

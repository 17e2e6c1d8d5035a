use chrono::{Datelike, Duration, NaiveDate};
use pageview_charts::config::Config;
use pageview_charts::data::{DataProcessor, PADDING_YEAR};
use pageview_charts::stats::StatsCalculator;
use std::fmt::Write as _;
use std::path::Path;

/// Writes ~3.5 years of daily views with a few spikes and dips.
fn write_fixture(path: &Path) -> usize {
    let start = NaiveDate::from_ymd_opt(2016, 5, 9).unwrap();
    let mut csv = String::from("date,value\n");
    let days = 1304;
    for i in 0..days {
        let date = start + Duration::days(i);
        let mut value = 20_000 + (i * 37) % 15_000 + i * 40;
        if i % 97 == 0 {
            value *= 40;
        }
        if i % 89 == 0 {
            value = 1_000 + i;
        }
        writeln!(csv, "{},{}", date.format("%Y-%m-%d"), value).unwrap();
    }
    std::fs::write(path, csv).unwrap();
    days as usize
}

#[test]
fn test_load_and_clean_from_csv() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("fcc-forum-pageviews.csv");
    let total = write_fixture(&input);
    let config = Config::with_paths(&input, dir.path());

    let (loaded, cleaned) = pageview_charts::load_and_clean(&config).unwrap();
    assert_eq!(loaded, total);

    // Bounds come from the raw values.
    let raw: Vec<f64> = std::fs::read_to_string(&input)
        .unwrap()
        .lines()
        .skip(1)
        .map(|line| line.split(',').nth(1).unwrap().parse().unwrap())
        .collect();
    let bounds = StatsCalculator::outlier_bounds(&raw).unwrap();
    assert_eq!(cleaned.bounds, bounds);

    let outside = raw.iter().filter(|v| !bounds.contains(**v)).count();
    assert!(outside > 0);
    assert_eq!(cleaned.len(), total - outside);
    assert!(cleaned
        .rows()
        .iter()
        .all(|r| bounds.contains(r.value as f64)));
    assert!(cleaned.rows().windows(2).all(|w| w[0].date < w[1].date));
}

#[test]
fn test_chart_inputs_from_cleaned_table() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("fcc-forum-pageviews.csv");
    write_fixture(&input);
    let config = Config::with_paths(&input, dir.path());
    let (_, cleaned) = pageview_charts::load_and_clean(&config).unwrap();

    let averages = DataProcessor::monthly_averages(&cleaned);
    assert!(averages[..4]
        .iter()
        .all(|a| a.year == PADDING_YEAR && a.average == 0));
    // May 2016 .. Dec 2019
    assert_eq!(averages.len(), 4 + 8 + 12 * 3);

    let first_real = &averages[4];
    let may: Vec<f64> = cleaned
        .rows()
        .iter()
        .filter(|r| r.date.year() == 2016 && r.date.month() == 5)
        .map(|r| r.value as f64)
        .collect();
    assert_eq!(first_real.month_name(), "May");
    let exact = may.iter().sum::<f64>() / may.len() as f64;
    assert!((first_real.average as f64 - exact).abs() <= 0.5);

    let rows = DataProcessor::box_rows(&cleaned);
    assert_eq!(rows.len(), cleaned.len());
    let by_month = DataProcessor::group_by_month(&rows);
    let labels: Vec<&str> = by_month.iter().map(|(m, _)| *m).collect();
    assert_eq!(
        labels,
        vec!["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"]
    );
}

#[test]
fn test_missing_input_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::with_paths(dir.path().join("missing.csv"), dir.path());
    assert!(pageview_charts::run(&config).is_err());
    assert!(!config.line_plot_path().exists());
}

#[test]
fn test_header_only_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.csv");
    std::fs::write(&input, "date,value\n").unwrap();
    let config = Config::with_paths(&input, dir.path());

    assert!(pageview_charts::load_and_clean(&config).is_err());
}

#[test]
fn test_run_writes_three_images() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("fcc-forum-pageviews.csv");
    write_fixture(&input);
    let config = Config::with_paths(&input, dir.path());

    let output = pageview_charts::run(&config).unwrap();

    assert_eq!(output.line_plot, dir.path().join("line_plot.png"));
    assert_eq!(image::image_dimensions(&output.line_plot).unwrap(), (1200, 900));
    assert_eq!(image::image_dimensions(&output.bar_plot).unwrap(), (1200, 900));
    assert_eq!(image::image_dimensions(&output.box_plot).unwrap(), (1800, 600));
}

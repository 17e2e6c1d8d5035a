//! Page-view charts - reads `fcc-forum-pageviews.csv` and writes
//! `line_plot.png`, `bar_plot.png` and `box_plot.png` to the working directory.

use anyhow::Result;
use pageview_charts::config::Config;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let output = pageview_charts::run(&Config::default())?;
    tracing::info!(
        loaded = output.loaded_rows,
        cleaned = output.cleaned_rows,
        "Done"
    );
    Ok(())
}

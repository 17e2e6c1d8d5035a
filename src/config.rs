//! Fixed run settings.
//!
//! The program has no configuration surface: `Config::default()` holds the
//! literal input filename, output filenames and figure sizes. Tests build
//! their own `Config` to redirect paths.

use std::path::{Path, PathBuf};

pub const INPUT_FILE: &str = "fcc-forum-pageviews.csv";
pub const LINE_PLOT_FILE: &str = "line_plot.png";
pub const BAR_PLOT_FILE: &str = "bar_plot.png";
pub const BOX_PLOT_FILE: &str = "box_plot.png";

/// Figure sizes in pixels (matplotlib inches at 100 DPI).
pub const LINE_PLOT_SIZE: (u32, u32) = (1200, 900);
pub const BAR_PLOT_SIZE: (u32, u32) = (1200, 900);
pub const BOX_PLOT_SIZE: (u32, u32) = (1800, 600);

#[derive(Debug, Clone)]
pub struct Config {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub line_plot_file: String,
    pub bar_plot_file: String,
    pub box_plot_file: String,
    pub line_plot_size: (u32, u32),
    pub bar_plot_size: (u32, u32),
    pub box_plot_size: (u32, u32),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(INPUT_FILE),
            output_dir: PathBuf::from("."),
            line_plot_file: LINE_PLOT_FILE.to_string(),
            bar_plot_file: BAR_PLOT_FILE.to_string(),
            box_plot_file: BOX_PLOT_FILE.to_string(),
            line_plot_size: LINE_PLOT_SIZE,
            bar_plot_size: BAR_PLOT_SIZE,
            box_plot_size: BOX_PLOT_SIZE,
        }
    }
}

impl Config {
    /// Same fixed settings, reading `input_path` and writing into `output_dir`.
    pub fn with_paths(input_path: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> Self {
        Self {
            input_path: input_path.as_ref().to_path_buf(),
            output_dir: output_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    pub fn line_plot_path(&self) -> PathBuf {
        self.output_dir.join(&self.line_plot_file)
    }

    pub fn bar_plot_path(&self) -> PathBuf {
        self.output_dir.join(&self.bar_plot_file)
    }

    pub fn box_plot_path(&self) -> PathBuf {
        self.output_dir.join(&self.box_plot_file)
    }
}

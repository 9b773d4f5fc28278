//! Default settings.

use crate::schema::AppConfig;
use optiplot_common::{LoggingConfig, StylePreset};
use optiplot_i18n::Locale;
use std::path::PathBuf;

/// Default output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "out";
/// Default directory of chart definitions.
pub const DEFAULT_CHARTS_DIR: &str = "charts";
/// Default image width, matching matplotlib's 8x6 inch figure at 100 dpi.
pub const DEFAULT_WIDTH: u32 = 800;
/// Default image height.
pub const DEFAULT_HEIGHT: u32 = 600;
/// Settings file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "optiplot.toml";

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            charts_dir: PathBuf::from(DEFAULT_CHARTS_DIR),
            locale: Locale::default(),
            default_style: StylePreset::default(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Effective size of a chart given its optional overrides.
    pub fn size_for(&self, width: Option<u32>, height: Option<u32>) -> (u32, u32) {
        (width.unwrap_or(self.width), height.unwrap_or(self.height))
    }
}

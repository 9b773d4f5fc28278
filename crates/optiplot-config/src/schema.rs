//! Application settings schema.

use optiplot_common::{LoggingConfig, StylePreset};
use optiplot_i18n::Locale;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings shared by every chart of a run, read from `optiplot.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Directory rendered images are written to.
    pub output_dir: PathBuf,
    /// Directory scanned for chart definitions.
    pub charts_dir: PathBuf,
    /// Language of axis titles and translated labels.
    pub locale: Locale,
    /// Preset for charts that do not name one.
    pub default_style: StylePreset,
    /// Image width for charts that do not set one.
    pub width: u32,
    /// Image height for charts that do not set one.
    pub height: u32,
    /// Logging settings.
    pub logging: LoggingConfig,
}

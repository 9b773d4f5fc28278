//! Common type definitions and newtype wrappers for domain modeling.

use crate::error::OptiplotError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Identifier of a chart definition, unique within a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartId(pub String);

impl ChartId {
    /// Creates a chart id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrows the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id is non-empty kebab-case (`[a-z0-9-]+`, no leading or trailing dash).
    pub fn is_kebab_case(&self) -> bool {
        !self.0.is_empty()
            && !self.0.starts_with('-')
            && !self.0.ends_with('-')
            && self
                .0
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    }
}

impl fmt::Display for ChartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The two chart shapes the tool draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// One polyline per series, x = iteration.
    Line,
    /// One colored bar per category.
    Bar,
}

impl ChartKind {
    /// Lowercase name used in definition files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Bar => "bar",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = OptiplotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "line" => Ok(Self::Line),
            "bar" => Ok(Self::Bar),
            other => Err(OptiplotError::validation_field(
                format!("unknown chart kind '{other}', expected 'line' or 'bar'"),
                "kind",
            )),
        }
    }
}

/// Image format of a rendered chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Raster output through the bitmap backend.
    Png,
    /// Vector output through the SVG backend.
    Svg,
}

impl OutputFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }

    /// Infers the format from a file name's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = OptiplotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            "pdf" => Err(OptiplotError::validation_field(
                "PDF output is not supported, use 'svg' for vector output",
                "output.format",
            )),
            other => Err(OptiplotError::validation_field(
                format!("unknown output format '{other}'"),
                "output.format",
            )),
        }
    }
}

/// Named styling presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StylePreset {
    /// Plain library defaults: white panel, no grid, sans-serif.
    #[default]
    Classic,
    /// Serif fonts, small ticks, grey panel with white grid.
    Paper,
    /// Large ticks and legend, grey panel, tight margins.
    Talk,
}

impl StylePreset {
    /// Lowercase preset name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Paper => "paper",
            Self::Talk => "talk",
        }
    }
}

impl fmt::Display for StylePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StylePreset {
    type Err = OptiplotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "classic" => Ok(Self::Classic),
            "paper" => Ok(Self::Paper),
            "talk" => Ok(Self::Talk),
            other => Err(OptiplotError::validation_field(
                format!("unknown style preset '{other}'"),
                "style",
            )),
        }
    }
}

/// Where the legend box sits inside the plot area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LegendPosition {
    #[default]
    UpperRight,
    UpperLeft,
    LowerLeft,
    LowerRight,
    /// No legend is drawn.
    None,
}

impl LegendPosition {
    /// Whether a legend is drawn at all.
    pub fn is_visible(self) -> bool {
        !matches!(self, Self::None)
    }
}

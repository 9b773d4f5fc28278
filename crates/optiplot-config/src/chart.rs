//! Chart definition documents.
//!
//! One document describes one chart: what kind it is, how it is styled,
//! where it is written and the literal data it shows. Documents are TOML by
//! default; YAML and JSON are accepted with the same structure.

use optiplot_common::{
    ChartId, ChartKind, LegendPosition, OptiplotError, OutputFormat, Result, StylePreset,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Text shown on a chart: either literal, or a message key translated at
/// render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LabelText {
    /// Shown as written.
    Literal(String),
    /// Fluent message key with string arguments.
    Localized {
        /// Message key, e.g. `axis-time-seconds`.
        key: String,
        /// Named arguments for the message.
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        args: BTreeMap<String, String>,
    },
}

impl LabelText {
    /// Shorthand for a literal label.
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Shorthand for a localized label without arguments.
    pub fn key(key: impl Into<String>) -> Self {
        Self::Localized {
            key: key.into(),
            args: BTreeMap::new(),
        }
    }

    /// Whether the label renders as nothing.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Literal(text) => text.trim().is_empty(),
            Self::Localized { key, .. } => key.trim().is_empty(),
        }
    }
}

/// The `[chart]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChartSection {
    /// Unique kebab-case id.
    pub id: ChartId,
    /// Line or bar chart.
    pub kind: ChartKind,
    /// Styling preset; the application default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StylePreset>,
    /// Caption above the plot. The published charts had none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<LabelText>,
    /// Horizontal axis title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_label: Option<LabelText>,
    /// Vertical axis title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_label: Option<LabelText>,
    /// Legend placement for line charts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<LegendPosition>,
}

/// The `[output]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// File name, written into the output directory.
    pub file: PathBuf,
    /// Image format; inferred from `file` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
    /// Width in pixels; the application default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Height in pixels; the application default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Half-open x domain `start..end` of a line series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct XRange {
    /// First x value.
    pub start: i64,
    /// One past the last x value.
    pub end: i64,
}

impl XRange {
    /// Number of x positions in the range; zero when `end <= start`.
    pub fn len(self) -> usize {
        usize::try_from(self.end.saturating_sub(self.start)).unwrap_or(0)
    }

    /// Whether the range is empty.
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }
}

/// One `[[series]]` entry of a line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeriesDefinition {
    /// Legend entry.
    pub label: LabelText,
    /// Explicit line color; next color of the default cycle when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// X domain; `0..values.len()` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<XRange>,
    /// One value per iteration.
    pub values: Vec<f64>,
}

impl SeriesDefinition {
    /// The effective x domain.
    pub fn x_range(&self) -> XRange {
        self.range.unwrap_or(XRange {
            start: 0,
            end: i64::try_from(self.values.len()).unwrap_or(i64::MAX),
        })
    }
}

/// One `[[bars]]` entry of a bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BarDefinition {
    /// Category name under the bar.
    pub label: LabelText,
    /// Bar height.
    pub value: f64,
    /// Explicit bar color; next color of the default cycle when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A complete chart definition document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChartDefinition {
    /// Header: id, kind, style and labels.
    pub chart: ChartSection,
    /// Target file.
    pub output: OutputSection,
    /// Line chart data.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub series: Vec<SeriesDefinition>,
    /// Bar chart data.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bars: Vec<BarDefinition>,
}

impl ChartDefinition {
    /// Parses a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    /// Parses a YAML document.
    pub fn from_yaml_str(input: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(input)?)
    }

    /// Parses a JSON document.
    pub fn from_json_str(input: &str) -> Result<Self> {
        serde_json::from_str(input)
            .map_err(|e| OptiplotError::config_with_source("JSON parsing error", e))
    }

    /// Chart id.
    pub fn id(&self) -> &ChartId {
        &self.chart.id
    }

    /// Chart kind.
    pub fn kind(&self) -> ChartKind {
        self.chart.kind
    }

    /// The explicit output format, or the one implied by the file extension.
    pub fn output_format(&self) -> Result<OutputFormat> {
        if let Some(format) = self.output.format {
            return Ok(format);
        }
        match self.output.file.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => ext.parse(),
            None => Err(OptiplotError::validation_field(
                format!(
                    "cannot infer the image format of '{}', add an extension or output.format",
                    self.output.file.display()
                ),
                "output.file",
            )),
        }
    }

    /// Total number of plotted values: points of all series, or bars.
    pub fn point_count(&self) -> usize {
        match self.chart.kind {
            ChartKind::Line => self.series.iter().map(|s| s.values.len()).sum(),
            ChartKind::Bar => self.bars.len(),
        }
    }

    /// Number of series (line) or bars (bar).
    pub fn entry_count(&self) -> usize {
        match self.chart.kind {
            ChartKind::Line => self.series.len(),
            ChartKind::Bar => self.bars.len(),
        }
    }

    /// Skeleton document written by `optiplot init`.
    pub fn template_toml(id: &ChartId, kind: ChartKind) -> String {
        let body = match kind {
            ChartKind::Line => {
                "x_label = { key = \"axis-iterations\" }\n\
                 y_label = { key = \"axis-time-seconds\" }\n\
                 legend = \"upper-right\"\n"
            }
            ChartKind::Bar => "y_label = { key = \"axis-time-seconds\" }\n",
        };
        let data = match kind {
            ChartKind::Line => {
                "# One [[series]] per optimizer run. `range` must match the number of values.\n\
                 [[series]]\n\
                 label = \"Run 1\"\n\
                 range = { start = 0, end = 3 }\n\
                 values = [3.0, 2.0, 1.0]\n"
            }
            ChartKind::Bar => {
                "# One [[bars]] entry per category, drawn left to right.\n\
                 [[bars]]\n\
                 label = { key = \"bar-no-optimization\" }\n\
                 value = 3.0\n\
                 color = \"blue\"\n\
                 \n\
                 [[bars]]\n\
                 label = \"GA\"\n\
                 value = 2.0\n\
                 color = \"orange\"\n"
            }
        };
        format!(
            "# Fill in the values from the optimizer output.\n\
             \n\
             [chart]\n\
             id = \"{id}\"\n\
             kind = \"{kind}\"\n\
             style = \"paper\"\n\
             {body}\
             \n\
             [output]\n\
             file = \"{id}.png\"\n\
             \n\
             {data}"
        )
    }
}

/// Definition file encodings, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionFormat {
    /// `.toml`
    Toml,
    /// `.yaml` or `.yml`
    Yaml,
    /// `.json`
    Json,
}

impl DefinitionFormat {
    /// Format for `path`, if its extension is a known one.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Parses `input` in this format.
    pub fn parse(self, input: &str) -> Result<ChartDefinition> {
        match self {
            Self::Toml => ChartDefinition::from_toml_str(input),
            Self::Yaml => ChartDefinition::from_yaml_str(input),
            Self::Json => ChartDefinition::from_json_str(input),
        }
    }
}

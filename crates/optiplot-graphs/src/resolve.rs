//! Turns chart definitions into draw-ready charts.
//!
//! Resolution is where labels get translated, colors picked and extents
//! computed. Renderers only draw what they are handed.

use crate::colors::assign_colors;
use crate::style::StyleProfile;
use optiplot_common::{ChartId, ChartKind, LegendPosition, OutputFormat, Result, Rgb};
use optiplot_config::{AppConfig, ChartDefinition, LabelText};
use optiplot_i18n::LabelTranslator;
use std::ops::Range;
use std::path::PathBuf;
use tracing::debug;

/// Padding added on both sides of a line chart's y extent, and above the
/// tallest bar.
pub const EXTENT_PADDING: f64 = 0.05;

/// Half the width of a bar, in category units.
pub const BAR_HALF_WIDTH: f64 = 0.4;

/// One line of a line chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSeries {
    /// Legend entry.
    pub label: String,
    /// Line color.
    pub color: Rgb,
    /// `(x, y)` points, x being `range.start + i`.
    pub points: Vec<(f64, f64)>,
}

/// One bar of a bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBar {
    /// Category name; may span several lines.
    pub label: String,
    /// Bar height.
    pub value: f64,
    /// Fill color.
    pub color: Rgb,
}

/// Data and extents of a resolved chart.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    /// Line chart.
    Line {
        /// Series in definition order.
        series: Vec<ResolvedSeries>,
        /// Horizontal extent.
        x: Range<f64>,
        /// Vertical extent.
        y: Range<f64>,
    },
    /// Bar chart. Bar `i` is centered on `x = i`.
    Bar {
        /// Bars in definition order.
        bars: Vec<ResolvedBar>,
        /// Vertical extent, starting at zero.
        y: Range<f64>,
    },
}

/// A chart with everything resolved, ready for a renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedChart {
    /// Chart id.
    pub id: ChartId,
    /// Translated caption.
    pub title: Option<String>,
    /// Translated horizontal axis title.
    pub x_label: Option<String>,
    /// Translated vertical axis title.
    pub y_label: Option<String>,
    /// Legend placement; always `None` for bar charts.
    pub legend: LegendPosition,
    /// Fonts and colors.
    pub style: StyleProfile,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Encoding of the output file.
    pub format: OutputFormat,
    /// Output file inside the output directory.
    pub path: PathBuf,
    /// Data to draw.
    pub data: ChartData,
}

impl ResolvedChart {
    /// Resolves `definition` against the translator and application settings.
    ///
    /// The definition is expected to have passed validation; resolution
    /// still fails cleanly on unknown colors, message keys or formats.
    pub fn resolve(
        definition: &ChartDefinition,
        translator: &LabelTranslator,
        config: &AppConfig,
    ) -> Result<Self> {
        let text = |label: &Option<LabelText>| -> Result<Option<String>> {
            label
                .as_ref()
                .map(|label| translate_label(label, translator))
                .transpose()
        };

        let data = match definition.kind() {
            ChartKind::Line => resolve_line(definition, translator)?,
            ChartKind::Bar => resolve_bars(definition, translator)?,
        };
        let legend = match definition.kind() {
            ChartKind::Line => definition.chart.legend.unwrap_or_default(),
            ChartKind::Bar => LegendPosition::None,
        };
        let style = StyleProfile::for_preset(definition.chart.style.unwrap_or(config.default_style));
        let (width, height) = config.size_for(definition.output.width, definition.output.height);

        let chart = Self {
            id: definition.id().clone(),
            title: text(&definition.chart.title)?,
            x_label: text(&definition.chart.x_label)?,
            y_label: text(&definition.chart.y_label)?,
            legend,
            style,
            width,
            height,
            format: definition.output_format()?,
            path: config.output_dir.join(&definition.output.file),
            data,
        };
        debug!(
            id = %chart.id,
            preset = %chart.style.preset,
            format = %chart.format,
            path = %chart.path.display(),
            "resolved chart"
        );
        Ok(chart)
    }

    /// Line or bar.
    pub fn kind(&self) -> ChartKind {
        match self.data {
            ChartData::Line { .. } => ChartKind::Line,
            ChartData::Bar { .. } => ChartKind::Bar,
        }
    }
}

/// Text of a label in the translator's locale.
pub fn translate_label(label: &LabelText, translator: &LabelTranslator) -> Result<String> {
    match label {
        LabelText::Literal(text) => Ok(text.clone()),
        LabelText::Localized { key, args } => translator.translate(key, args),
    }
}

fn resolve_line(definition: &ChartDefinition, translator: &LabelTranslator) -> Result<ChartData> {
    let colors = assign_colors(definition.series.iter().map(|s| s.color.as_deref()))?;

    let mut series = Vec::with_capacity(definition.series.len());
    for (def, color) in definition.series.iter().zip(colors) {
        let start = def.x_range().start as f64;
        let points = def
            .values
            .iter()
            .enumerate()
            .map(|(i, &value)| (start + i as f64, value))
            .collect();
        series.push(ResolvedSeries {
            label: translate_label(&def.label, translator)?,
            color,
            points,
        });
    }

    let xs = series.iter().flat_map(|s| s.points.iter().map(|p| p.0));
    let ys = series.iter().flat_map(|s| s.points.iter().map(|p| p.1));
    let x = span(xs).map_or(0.0..1.0, |(min, max)| widen(min, max));
    let y = span(ys).map_or(0.0..1.0, |(min, max)| padded(min, max));

    Ok(ChartData::Line { series, x, y })
}

fn resolve_bars(definition: &ChartDefinition, translator: &LabelTranslator) -> Result<ChartData> {
    let colors = assign_colors(definition.bars.iter().map(|b| b.color.as_deref()))?;

    let mut bars = Vec::with_capacity(definition.bars.len());
    for (def, color) in definition.bars.iter().zip(colors) {
        bars.push(ResolvedBar {
            label: translate_label(&def.label, translator)?,
            value: def.value,
            color,
        });
    }

    let top = bars.iter().map(|b| b.value).fold(0.0, f64::max);
    let y = if top > 0.0 {
        0.0..top * (1.0 + EXTENT_PADDING)
    } else {
        0.0..1.0
    };
    Ok(ChartData::Bar { bars, y })
}

/// Horizontal extent of a bar chart with `count` bars.
pub fn bar_x_extent(count: usize) -> Range<f64> {
    let margin = 1.0 - BAR_HALF_WIDTH;
    -margin..(count.max(1) as f64 - 1.0 + margin)
}

fn span(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((min, max)) => Some((min.min(v), max.max(v))),
    })
}

/// `min..max` padded by [`EXTENT_PADDING`] of its span on both sides.
fn padded(min: f64, max: f64) -> Range<f64> {
    let pad = if max > min {
        (max - min) * EXTENT_PADDING
    } else {
        // A flat series still needs some room around it.
        min.abs().max(1.0) * EXTENT_PADDING
    };
    (min - pad)..(max + pad)
}

/// `min..max`, widened around a single x position.
fn widen(min: f64, max: f64) -> Range<f64> {
    if max > min {
        min..max
    } else {
        (min - 0.5)..(max + 0.5)
    }
}

//! Renderer trait and the backend plumbing shared by all chart kinds.

use crate::resolve::{ChartData, ResolvedChart};
use crate::style::{points_to_px, StyleProfile};
use crate::{bar, line};
use async_trait::async_trait;
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use optiplot_common::utils::label_lines;
use optiplot_common::{ChartId, ChartKind, OptiplotError, OutputFormat, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::PathBuf;
use tracing::{debug, info};

/// A chart written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedChart {
    /// Chart id.
    pub id: ChartId,
    /// File that was written.
    pub path: PathBuf,
    /// Encoding of the file.
    pub format: OutputFormat,
    /// Size of the file in bytes.
    pub bytes: usize,
}

/// Trait for chart renderers.
#[async_trait]
pub trait ChartRenderer: Send + Sync {
    /// Chart kind this renderer draws.
    fn kind(&self) -> ChartKind;

    /// Gets the name of this renderer.
    fn name(&self) -> &'static str;

    /// Draws `chart` into an encoded image held in memory.
    fn draw(&self, chart: &ResolvedChart) -> Result<Vec<u8>>;

    /// Draws `chart` on a blocking worker thread and writes it to its path.
    async fn render(&self, chart: &ResolvedChart) -> Result<RenderedChart>;
}

/// Renders `chart` with `draw` on a blocking thread, then writes the file.
///
/// Drawing errors are graph errors; creating the output directory or writing
/// the file fails with an I/O error.
pub(crate) async fn render_blocking(
    chart: &ResolvedChart,
    draw: fn(&ResolvedChart) -> Result<Vec<u8>>,
) -> Result<RenderedChart> {
    let owned = chart.clone();
    let encoded = tokio::task::spawn_blocking(move || draw(&owned))
        .await
        .map_err(|e| {
            OptiplotError::graph_with_source(format!("render task for '{}' failed", chart.id), e)
        })??;

    if let Some(parent) = chart.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&chart.path, &encoded).await?;

    info!(
        id = %chart.id,
        path = %chart.path.display(),
        bytes = encoded.len(),
        "rendered chart"
    );
    Ok(RenderedChart {
        id: chart.id.clone(),
        path: chart.path.clone(),
        format: chart.format,
        bytes: encoded.len(),
    })
}

/// Encodes `chart` in its output format.
pub fn encode(chart: &ResolvedChart) -> Result<Vec<u8>> {
    let size = (chart.width, chart.height);
    debug!(
        id = %chart.id,
        width = chart.width,
        height = chart.height,
        format = %chart.format,
        "drawing chart"
    );

    match chart.format {
        OutputFormat::Png => {
            let mut pixels = vec![0u8; chart.width as usize * chart.height as usize * 3];
            {
                let root = BitMapBackend::with_buffer(&mut pixels, size).into_drawing_area();
                draw_chart(&root, chart)?;
                root.present()?;
            }
            let mut png = Vec::new();
            PngEncoder::new(&mut png)
                .write_image(&pixels, chart.width, chart.height, ColorType::Rgb8)
                .map_err(|e| OptiplotError::graph_with_source("PNG encoding failed", e))?;
            Ok(png)
        }
        OutputFormat::Svg => {
            let mut svg = String::new();
            {
                let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
                draw_chart(&root, chart)?;
                root.present()?;
            }
            Ok(svg.into_bytes())
        }
    }
}

fn draw_chart<DB>(root: &DrawingArea<DB, Shift>, chart: &ResolvedChart) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&crate::colors::plot_color(chart.style.background))?;
    match &chart.data {
        ChartData::Line { series, x, y } => line::draw(root, chart, series, x, y),
        ChartData::Bar { bars, y } => bar::draw(root, chart, bars, y),
    }
}

/// Checks that `chart` is of the kind a renderer handles.
pub(crate) fn expect_kind(chart: &ResolvedChart, kind: ChartKind) -> Result<()> {
    if chart.kind() == kind {
        Ok(())
    } else {
        Err(OptiplotError::graph(format!(
            "chart '{}' is a {} chart, not a {kind} chart",
            chart.id,
            chart.kind()
        )))
    }
}

/// Gap in pixels between an axis and the text next to it.
pub(crate) const TEXT_GAP: u32 = 6;

/// Label text for slots plotters draws as a single line: captions, axis
/// titles and legend entries. Line breaks become spaces.
pub(crate) fn one_line(label: &str) -> String {
    label_lines(label).join(" ")
}

/// Width in pixels reserved left of the plot for y tick labels and title.
pub(crate) fn y_label_area(style: &StyleProfile, y: &Range<f64>) -> u32 {
    let widest = format_tick(y.start).len().max(format_tick(y.end).len());
    let tick_width = (widest as f64 * points_to_px(style.tick_size) * 0.62).ceil() as u32;
    tick_width + style.label_line_height() + TEXT_GAP * 3
}

/// Height in pixels reserved under the plot for `tick_lines` lines of tick
/// text and, when present, the axis title.
pub(crate) fn x_label_area(style: &StyleProfile, tick_lines: usize, has_title: bool) -> u32 {
    let ticks = style.tick_line_height() * tick_lines.max(1) as u32;
    let title = if has_title {
        style.label_line_height() + TEXT_GAP
    } else {
        0
    };
    ticks + title + TEXT_GAP * 3
}

/// Tick label text for a numeric axis value.
///
/// Whole numbers print without a fraction, matching how iteration counts
/// and millisecond-scale times read on the published charts.
pub fn format_tick(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else if value.abs() >= 100.0 || value == value.trunc() {
        format!("{value:.0}")
    } else {
        let text = format!("{value:.2}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

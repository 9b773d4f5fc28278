//! Line charts: one line per series, one legend entry per line.

use crate::colors::plot_color;
use crate::renderer::{
    encode, expect_kind, format_tick, one_line, render_blocking, x_label_area, y_label_area,
    ChartRenderer, RenderedChart,
};
use crate::resolve::{ResolvedChart, ResolvedSeries};
use async_trait::async_trait;
use optiplot_common::{ChartKind, LegendPosition, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;

/// Length in pixels of a line sample in the legend.
const LEGEND_SAMPLE: i32 = 20;

/// Renderer for line charts.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineChartRenderer;

impl LineChartRenderer {
    /// Creates a new line chart renderer.
    pub fn new() -> Self {
        Self
    }
}

fn draw_line_chart(chart: &ResolvedChart) -> Result<Vec<u8>> {
    expect_kind(chart, ChartKind::Line)?;
    encode(chart)
}

#[async_trait]
impl ChartRenderer for LineChartRenderer {
    fn kind(&self) -> ChartKind {
        ChartKind::Line
    }

    fn name(&self) -> &'static str {
        "line"
    }

    fn draw(&self, chart: &ResolvedChart) -> Result<Vec<u8>> {
        draw_line_chart(chart)
    }

    async fn render(&self, chart: &ResolvedChart) -> Result<RenderedChart> {
        render_blocking(chart, draw_line_chart).await
    }
}

fn series_label_position(legend: LegendPosition) -> Option<SeriesLabelPosition> {
    match legend {
        LegendPosition::UpperRight => Some(SeriesLabelPosition::UpperRight),
        LegendPosition::UpperLeft => Some(SeriesLabelPosition::UpperLeft),
        LegendPosition::LowerLeft => Some(SeriesLabelPosition::LowerLeft),
        LegendPosition::LowerRight => Some(SeriesLabelPosition::LowerRight),
        LegendPosition::None => None,
    }
}

pub(crate) fn draw<DB>(
    root: &DrawingArea<DB, Shift>,
    chart: &ResolvedChart,
    series: &[ResolvedSeries],
    x: &Range<f64>,
    y: &Range<f64>,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let style = &chart.style;

    let mut builder = ChartBuilder::on(root);
    builder
        .margin(style.margin as i32)
        .x_label_area_size(x_label_area(style, 1, chart.x_label.is_some()) as i32)
        .y_label_area_size(y_label_area(style, y) as i32);
    if let Some(title) = &chart.title {
        builder.caption(one_line(title), style.title_font());
    }
    let mut ctx = builder.build_cartesian_2d(x.clone(), y.clone())?;

    if let Some(panel) = style.panel {
        ctx.plotting_area().fill(&plot_color(panel))?;
    }

    let x_ticks = |v: &f64| format_tick(*v);
    let y_ticks = |v: &f64| format_tick(*v);
    let mut mesh = ctx.configure_mesh();
    mesh.label_style(style.tick_font())
        .axis_desc_style(style.label_font())
        .x_label_formatter(&x_ticks)
        .y_label_formatter(&y_ticks);
    if let Some(label) = &chart.x_label {
        mesh.x_desc(one_line(label));
    }
    if let Some(label) = &chart.y_label {
        mesh.y_desc(one_line(label));
    }
    match (style.grid, style.panel) {
        (Some(grid), Some(panel)) => {
            mesh.bold_line_style(plot_color(grid).stroke_width(1))
                .light_line_style(TRANSPARENT)
                .axis_style(plot_color(panel));
        }
        (Some(grid), None) => {
            mesh.bold_line_style(plot_color(grid).stroke_width(1))
                .light_line_style(TRANSPARENT);
        }
        (None, _) => {
            mesh.disable_mesh();
        }
    }
    mesh.draw()?;

    let width = style.line_width;
    for entry in series {
        let color = plot_color(entry.color);
        let drawn = ctx.draw_series(LineSeries::new(
            entry.points.iter().copied(),
            color.stroke_width(width),
        ))?;
        if chart.legend.is_visible() {
            drawn.label(one_line(&entry.label)).legend(move |(px, py)| {
                PathElement::new(
                    vec![(px, py), (px + LEGEND_SAMPLE, py)],
                    color.stroke_width(width),
                )
            });
        }
    }

    if let Some(position) = series_label_position(chart.legend) {
        ctx.configure_series_labels()
            .position(position)
            .label_font(style.legend_font())
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK.mix(0.3))
            .draw()?;
    }
    Ok(())
}

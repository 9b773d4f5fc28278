//! Bar charts: one bar per category, each in its own color.
//!
//! Category names are drawn under the bars by hand so that names with line
//! breaks, such as `Cesta\n(MMAS, 59.4%)`, keep their layout.

use crate::colors::plot_color;
use crate::renderer::{
    encode, expect_kind, format_tick, one_line, render_blocking, x_label_area, y_label_area,
    ChartRenderer, RenderedChart, TEXT_GAP,
};
use crate::resolve::{bar_x_extent, ResolvedBar, ResolvedChart, BAR_HALF_WIDTH};
use async_trait::async_trait;
use optiplot_common::utils::label_lines;
use optiplot_common::{ChartKind, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::Range;

/// Length in pixels of the tick mark under each bar.
const TICK_LENGTH: i32 = 5;

/// Renderer for bar charts.
#[derive(Debug, Clone, Copy, Default)]
pub struct BarChartRenderer;

impl BarChartRenderer {
    /// Creates a new bar chart renderer.
    pub fn new() -> Self {
        Self
    }
}

fn draw_bar_chart(chart: &ResolvedChart) -> Result<Vec<u8>> {
    expect_kind(chart, ChartKind::Bar)?;
    encode(chart)
}

#[async_trait]
impl ChartRenderer for BarChartRenderer {
    fn kind(&self) -> ChartKind {
        ChartKind::Bar
    }

    fn name(&self) -> &'static str {
        "bar"
    }

    fn draw(&self, chart: &ResolvedChart) -> Result<Vec<u8>> {
        draw_bar_chart(chart)
    }

    async fn render(&self, chart: &ResolvedChart) -> Result<RenderedChart> {
        render_blocking(chart, draw_bar_chart).await
    }
}

/// Number of text lines of the tallest category name.
pub fn max_label_lines(bars: &[ResolvedBar]) -> usize {
    bars.iter()
        .map(|bar| label_lines(&bar.label).len())
        .max()
        .unwrap_or(1)
        .max(1)
}

pub(crate) fn draw<DB>(
    root: &DrawingArea<DB, Shift>,
    chart: &ResolvedChart,
    bars: &[ResolvedBar],
    y: &Range<f64>,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let style = &chart.style;
    let label_rows = max_label_lines(bars);
    let x = bar_x_extent(bars.len());

    let mut builder = ChartBuilder::on(root);
    builder
        .margin(style.margin as i32)
        .x_label_area_size(x_label_area(style, label_rows, chart.x_label.is_some()) as i32)
        .y_label_area_size(y_label_area(style, y) as i32);
    if let Some(title) = &chart.title {
        builder.caption(one_line(title), style.title_font());
    }
    let mut ctx = builder.build_cartesian_2d(x.clone(), y.clone())?;

    if let Some(panel) = style.panel {
        ctx.plotting_area().fill(&plot_color(panel))?;
    }

    let y_ticks = |v: &f64| format_tick(*v);
    let mut mesh = ctx.configure_mesh();
    mesh.disable_x_mesh()
        .disable_x_axis()
        .label_style(style.tick_font())
        .axis_desc_style(style.label_font())
        .y_label_formatter(&y_ticks);
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
            mesh.disable_y_mesh();
        }
    }
    mesh.draw()?;

    if style.panel.is_none() {
        // Baseline in place of the disabled x axis.
        ctx.draw_series(std::iter::once(PathElement::new(
            vec![(x.start, y.start), (x.end, y.start)],
            BLACK,
        )))?;
    }

    ctx.draw_series(bars.iter().enumerate().map(|(i, bar)| {
        let center = i as f64;
        Rectangle::new(
            [
                (center - BAR_HALF_WIDTH, y.start),
                (center + BAR_HALF_WIDTH, bar.value),
            ],
            plot_color(bar.color).filled(),
        )
    }))?;

    let line_height = style.tick_line_height() as i32;
    let gap = TEXT_GAP as i32;
    let tick_text = TextStyle::from(style.tick_font()).pos(Pos::new(HPos::Center, VPos::Top));
    let (_, baseline) = ctx.backend_coord(&(0.0, y.start));

    for (i, bar) in bars.iter().enumerate() {
        let (center, _) = ctx.backend_coord(&(i as f64, y.start));
        root.draw(&PathElement::new(
            vec![(center, baseline), (center, baseline + TICK_LENGTH)],
            BLACK,
        ))?;
        for (row, text) in label_lines(&bar.label).into_iter().enumerate() {
            let top = baseline + TICK_LENGTH + gap + row as i32 * line_height;
            root.draw(&Text::new(text, (center, top), tick_text.clone()))?;
        }
    }

    if let Some(label) = &chart.x_label {
        let (pixels_x, _) = ctx.plotting_area().get_pixel_range();
        let center = (pixels_x.start + pixels_x.end) / 2;
        let top = baseline + TICK_LENGTH + gap * 2 + label_rows as i32 * line_height;
        let title = TextStyle::from(style.label_font()).pos(Pos::new(HPos::Center, VPos::Top));
        root.draw(&Text::new(one_line(label), (center, top), title))?;
    }
    Ok(())
}

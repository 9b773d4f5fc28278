//! Style profiles: fonts, sizes, panel and grid colors per preset.
//!
//! Sizes are given in points, the unit the published figures were tuned in,
//! and converted to pixels at [`DPI`].

use optiplot_common::{Rgb, StylePreset};
use plotters::style::{FontDesc, FontFamily, FontStyle};

/// Resolution used to convert point sizes to pixels.
pub const DPI: f64 = 100.0;

/// Converts a size in points to pixels.
pub fn points_to_px(points: f64) -> f64 {
    points * DPI / 72.0
}

/// Everything a renderer needs to know about how a chart looks.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleProfile {
    /// Preset the profile was built from.
    pub preset: StylePreset,
    /// Font family name understood by plotters (`sans-serif`, `serif`).
    pub font_family: &'static str,
    /// Title size in points.
    pub title_size: f64,
    /// Axis title size in points.
    pub label_size: f64,
    /// Tick label size in points.
    pub tick_size: f64,
    /// Legend text size in points.
    pub legend_size: f64,
    /// Whether axis titles are bold.
    pub bold_labels: bool,
    /// Figure background.
    pub background: Rgb,
    /// Plot panel fill; `None` leaves the figure background.
    pub panel: Option<Rgb>,
    /// Grid line color; `None` draws no grid.
    pub grid: Option<Rgb>,
    /// Line series stroke width in pixels.
    pub line_width: u32,
    /// Outer margin in pixels.
    pub margin: u32,
}

const WHITE: Rgb = Rgb(255, 255, 255);
const SEABORN_PANEL: Rgb = Rgb(0xEA, 0xEA, 0xF2);

impl StyleProfile {
    /// Profile for a preset.
    pub fn for_preset(preset: StylePreset) -> Self {
        match preset {
            StylePreset::Classic => Self {
                preset,
                font_family: "sans-serif",
                title_size: 12.0,
                label_size: 10.0,
                tick_size: 10.0,
                legend_size: 10.0,
                bold_labels: false,
                background: WHITE,
                panel: None,
                grid: None,
                line_width: 2,
                margin: 20,
            },
            StylePreset::Paper => Self {
                preset,
                font_family: "serif",
                title_size: 12.0,
                label_size: 10.0,
                tick_size: 8.0,
                legend_size: 10.0,
                bold_labels: true,
                background: WHITE,
                panel: Some(SEABORN_PANEL),
                grid: Some(WHITE),
                line_width: 2,
                margin: 16,
            },
            StylePreset::Talk => Self {
                preset,
                font_family: "sans-serif",
                title_size: 18.0,
                label_size: 16.0,
                tick_size: 13.0,
                legend_size: 15.0,
                bold_labels: true,
                background: WHITE,
                panel: Some(SEABORN_PANEL),
                grid: Some(WHITE),
                line_width: 3,
                margin: 8,
            },
        }
    }

    fn font(&self, points: f64, style: FontStyle) -> FontDesc<'static> {
        FontDesc::new(FontFamily::from(self.font_family), points_to_px(points), style)
    }

    /// Font for the chart title.
    pub fn title_font(&self) -> FontDesc<'static> {
        self.font(self.title_size, FontStyle::Normal)
    }

    /// Font for axis titles.
    pub fn label_font(&self) -> FontDesc<'static> {
        let style = if self.bold_labels {
            FontStyle::Bold
        } else {
            FontStyle::Normal
        };
        self.font(self.label_size, style)
    }

    /// Font for tick labels, including bar category names.
    pub fn tick_font(&self) -> FontDesc<'static> {
        self.font(self.tick_size, FontStyle::Normal)
    }

    /// Font for legend entries.
    pub fn legend_font(&self) -> FontDesc<'static> {
        self.font(self.legend_size, FontStyle::Normal)
    }

    /// Height in pixels of one line of tick text.
    pub fn tick_line_height(&self) -> u32 {
        line_height(self.tick_size)
    }

    /// Height in pixels of one line of axis title text.
    pub fn label_line_height(&self) -> u32 {
        line_height(self.label_size)
    }
}

impl Default for StyleProfile {
    fn default() -> Self {
        Self::for_preset(StylePreset::default())
    }
}

fn line_height(points: f64) -> u32 {
    // Rounded up, plus leading.
    (points_to_px(points) * 1.25).ceil() as u32
}

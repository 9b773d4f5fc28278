//! # optiplot graphs
//!
//! Line and bar chart rendering for optiplot.
//!
//! Chart definitions are first resolved into draw-ready [`ResolvedChart`]s
//! (labels translated, colors picked, extents computed), then drawn with
//! plotters into PNG or SVG files. [`GraphManager`] renders a whole batch
//! concurrently.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bar;
pub mod colors;
pub mod line;
pub mod manager;
pub mod renderer;
pub mod resolve;
pub mod style;

pub use bar::BarChartRenderer;
pub use line::LineChartRenderer;
pub use manager::*;
pub use renderer::{encode, format_tick, ChartRenderer, RenderedChart};
pub use resolve::*;
pub use style::StyleProfile;

//! Chart definition and settings validation.
//!
//! Everything that would make a render fail half-way is rejected here, with
//! the offending field named, before any file is touched.

use crate::chart::{ChartDefinition, LabelText};
use crate::schema::AppConfig;
use optiplot_common::utils::is_plain_file_name;
use optiplot_common::{parse_color, ChartKind, OptiplotError, Result};
use std::collections::HashSet;

/// Largest accepted image side in pixels.
pub const MAX_DIMENSION: u32 = 16_384;

/// Validates chart definitions and application settings.
pub struct ChartValidator;

impl ChartValidator {
    /// Validates one chart definition.
    pub fn validate(chart: &ChartDefinition) -> Result<()> {
        Self::validate_header(chart)?;
        match chart.kind() {
            ChartKind::Line => Self::validate_line(chart)?,
            ChartKind::Bar => Self::validate_bar(chart)?,
        }
        Self::validate_output(chart)
    }

    /// Validates a set of definitions that will be rendered together.
    ///
    /// Besides the per-chart checks, ids and output files must be unique.
    pub fn validate_catalog<'a>(charts: impl IntoIterator<Item = &'a ChartDefinition>) -> Result<()> {
        let mut ids = HashSet::new();
        let mut files = HashSet::new();
        for chart in charts {
            Self::validate(chart)?;
            if !ids.insert(chart.id().clone()) {
                return Err(OptiplotError::validation_field(
                    format!("duplicate chart id '{}'", chart.id()),
                    "chart.id",
                ));
            }
            if !files.insert(chart.output.file.clone()) {
                return Err(OptiplotError::validation_field(
                    format!(
                        "chart '{}' writes '{}', which another chart already writes",
                        chart.id(),
                        chart.output.file.display()
                    ),
                    "output.file",
                ));
            }
        }
        Ok(())
    }

    /// Validates application settings.
    pub fn validate_settings(config: &AppConfig) -> Result<()> {
        check_dimension(config.width, "width")?;
        check_dimension(config.height, "height")?;
        if config.output_dir.as_os_str().is_empty() {
            return Err(OptiplotError::validation_field(
                "output directory must not be empty",
                "output_dir",
            ));
        }
        Ok(())
    }

    fn validate_header(chart: &ChartDefinition) -> Result<()> {
        if !chart.id().is_kebab_case() {
            return Err(OptiplotError::validation_field(
                format!("chart id '{}' must be kebab-case ([a-z0-9-]+)", chart.id()),
                "chart.id",
            ));
        }
        for (label, field) in [
            (&chart.chart.title, "chart.title"),
            (&chart.chart.x_label, "chart.x_label"),
            (&chart.chart.y_label, "chart.y_label"),
        ] {
            if label.as_ref().is_some_and(LabelText::is_blank) {
                return Err(OptiplotError::validation_field(
                    "label is blank, leave it out instead",
                    field,
                ));
            }
        }
        Ok(())
    }

    fn validate_line(chart: &ChartDefinition) -> Result<()> {
        if chart.series.is_empty() {
            return Err(OptiplotError::validation_field(
                "a line chart needs at least one [[series]]",
                "series",
            ));
        }
        if !chart.bars.is_empty() {
            return Err(OptiplotError::validation_field(
                "a line chart cannot have [[bars]]",
                "bars",
            ));
        }

        for (idx, series) in chart.series.iter().enumerate() {
            let field = |name: &str| format!("series[{idx}].{name}");
            if series.values.is_empty() {
                return Err(OptiplotError::validation_field("series has no values", field("values")));
            }
            if let Some(range) = series.range {
                if range.len() != series.values.len() {
                    return Err(OptiplotError::validation_field(
                        format!(
                            "range {}..{} has {} positions but there are {} values",
                            range.start,
                            range.end,
                            range.len(),
                            series.values.len()
                        ),
                        field("range"),
                    ));
                }
            }
            if let Some(pos) = series.values.iter().position(|v| !v.is_finite()) {
                return Err(OptiplotError::validation_field(
                    format!("value #{pos} is not a finite number"),
                    field("values"),
                ));
            }
            check_color(series.color.as_deref(), &field("color"))?;
        }
        Ok(())
    }

    fn validate_bar(chart: &ChartDefinition) -> Result<()> {
        if chart.bars.is_empty() {
            return Err(OptiplotError::validation_field(
                "a bar chart needs at least one [[bars]] entry",
                "bars",
            ));
        }
        if !chart.series.is_empty() {
            return Err(OptiplotError::validation_field(
                "a bar chart cannot have [[series]]",
                "series",
            ));
        }

        for (idx, bar) in chart.bars.iter().enumerate() {
            if !bar.value.is_finite() {
                return Err(OptiplotError::validation_field(
                    "bar value is not a finite number",
                    format!("bars[{idx}].value"),
                ));
            }
            if bar.value < 0.0 {
                return Err(OptiplotError::validation_field(
                    "bar values must not be negative",
                    format!("bars[{idx}].value"),
                ));
            }
            check_color(bar.color.as_deref(), &format!("bars[{idx}].color"))?;
        }
        Ok(())
    }

    fn validate_output(chart: &ChartDefinition) -> Result<()> {
        if !is_plain_file_name(&chart.output.file) {
            return Err(OptiplotError::validation_field(
                format!(
                    "'{}' must be a bare file name, charts are written to the output directory",
                    chart.output.file.display()
                ),
                "output.file",
            ));
        }
        chart.output_format()?;
        if let Some(width) = chart.output.width {
            check_dimension(width, "output.width")?;
        }
        if let Some(height) = chart.output.height {
            check_dimension(height, "output.height")?;
        }
        Ok(())
    }
}

fn check_dimension(value: u32, field: &str) -> Result<()> {
    if value == 0 || value > MAX_DIMENSION {
        return Err(OptiplotError::validation_field(
            format!("{value} is outside 1..={MAX_DIMENSION}"),
            field,
        ));
    }
    Ok(())
}

fn check_color(color: Option<&str>, field: &str) -> Result<()> {
    match color {
        Some(color) => parse_color(color).map(|_| ()).map_err(|_| {
            OptiplotError::validation_field(
                format!("'{color}' is not a known color name or #rrggbb value"),
                field,
            )
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{BarDefinition, ChartSection, OutputSection, SeriesDefinition, XRange};
    use optiplot_common::ChartId;
    use std::path::PathBuf;

    fn line_chart(values: Vec<f64>, range: Option<XRange>) -> ChartDefinition {
        ChartDefinition {
            chart: ChartSection {
                id: ChartId::new("comparison-trials"),
                kind: ChartKind::Line,
                style: None,
                title: None,
                x_label: Some(LabelText::key("axis-iterations")),
                y_label: Some(LabelText::key("axis-time-seconds")),
                legend: None,
            },
            output: OutputSection {
                file: PathBuf::from("plotComparisonTrials.svg"),
                format: None,
                width: None,
                height: None,
            },
            series: vec![SeriesDefinition {
                label: LabelText::literal("No trial"),
                color: None,
                range,
                values,
            }],
            bars: Vec::new(),
        }
    }

    fn bar_chart() -> ChartDefinition {
        let mut chart = line_chart(vec![1.0], None);
        chart.chart.id = ChartId::new("comparison-test");
        chart.chart.kind = ChartKind::Bar;
        chart.series.clear();
        chart.output.file = PathBuf::from("plotComparisonTest.png");
        chart.bars = vec![BarDefinition {
            label: LabelText::literal("GA"),
            value: 9247.0,
            color: Some("tab:blue".to_string()),
        }];
        chart
    }

    #[test]
    fn test_valid_charts_pass() {
        assert!(ChartValidator::validate(&line_chart(vec![3.0, 2.0], None)).is_ok());
        assert!(ChartValidator::validate(&line_chart(
            vec![3.0, 2.0],
            Some(XRange { start: 5, end: 7 })
        ))
        .is_ok());
        assert!(ChartValidator::validate(&bar_chart()).is_ok());
    }

    #[test]
    fn test_mismatched_range_is_rejected() {
        let chart = line_chart(vec![3.0, 2.0, 1.0], Some(XRange { start: 0, end: 700 }));
        let err = ChartValidator::validate(&chart).unwrap_err();
        assert_eq!(err.field(), Some("series[0].range"));
        assert!(err.to_string().contains("700"));
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        let chart = line_chart(vec![1.0, f64::NAN], None);
        assert_eq!(
            ChartValidator::validate(&chart).unwrap_err().field(),
            Some("series[0].values")
        );
    }

    #[test]
    fn test_kind_and_data_must_agree() {
        let mut chart = line_chart(vec![1.0], None);
        chart.series.clear();
        assert_eq!(ChartValidator::validate(&chart).unwrap_err().field(), Some("series"));

        let mut chart = bar_chart();
        chart.series = line_chart(vec![1.0], None).series;
        assert_eq!(ChartValidator::validate(&chart).unwrap_err().field(), Some("series"));
    }

    #[test]
    fn test_unknown_color_is_rejected() {
        let mut chart = bar_chart();
        chart.bars[0].color = Some("tab:turquoise".to_string());
        assert_eq!(
            ChartValidator::validate(&chart).unwrap_err().field(),
            Some("bars[0].color")
        );
    }

    #[test]
    fn test_output_must_be_a_bare_file_name() {
        let mut chart = bar_chart();
        chart.output.file = PathBuf::from("../escape.png");
        assert_eq!(
            ChartValidator::validate(&chart).unwrap_err().field(),
            Some("output.file")
        );
    }

    #[test]
    fn test_bad_id_and_dimensions() {
        let mut chart = bar_chart();
        chart.chart.id = ChartId::new("Comparison Test");
        assert_eq!(ChartValidator::validate(&chart).unwrap_err().field(), Some("chart.id"));

        let mut chart = bar_chart();
        chart.output.width = Some(0);
        assert_eq!(
            ChartValidator::validate(&chart).unwrap_err().field(),
            Some("output.width")
        );
    }

    #[test]
    fn test_blank_axis_labels_are_rejected() {
        let mut chart = line_chart(vec![1.0], None);
        chart.chart.title = Some(LabelText::literal("  "));
        assert_eq!(
            ChartValidator::validate(&chart).unwrap_err().field(),
            Some("chart.title")
        );

        let mut chart = line_chart(vec![1.0], None);
        chart.chart.y_label = Some(LabelText::key(""));
        assert_eq!(
            ChartValidator::validate(&chart).unwrap_err().field(),
            Some("chart.y_label")
        );
    }

    #[test]
    fn test_unicode_hex_color_is_rejected() {
        let mut chart = bar_chart();
        chart.bars[0].color = Some("#aébcd".to_string());
        assert_eq!(
            ChartValidator::validate(&chart).unwrap_err().field(),
            Some("bars[0].color")
        );
    }

    #[test]
    fn test_catalog_rejects_duplicates() {
        let a = bar_chart();
        let mut b = line_chart(vec![1.0], None);
        assert!(ChartValidator::validate_catalog([&a, &b]).is_ok());

        b.chart.id = a.chart.id.clone();
        assert_eq!(
            ChartValidator::validate_catalog([&a, &b]).unwrap_err().field(),
            Some("chart.id")
        );

        let mut c = line_chart(vec![1.0], None);
        c.chart.id = ChartId::new("other");
        c.output.file = a.output.file.clone();
        assert_eq!(
            ChartValidator::validate_catalog([&a, &c]).unwrap_err().field(),
            Some("output.file")
        );
    }
}

//! Tests for the shared domain types.

use optiplot_common::{ChartId, ChartKind, LegendPosition, OutputFormat, StylePreset};
use std::path::Path;

#[test]
fn test_chart_id_kebab_case() {
    assert!(ChartId::new("optimizers-comparison-750-1000").is_kebab_case());
    assert!(!ChartId::new("Optimizers").is_kebab_case());
    assert!(!ChartId::new("with space").is_kebab_case());
    assert!(!ChartId::new("-leading").is_kebab_case());
    assert!(!ChartId::new("").is_kebab_case());
}

#[test]
fn test_output_format_inference() {
    assert_eq!(OutputFormat::from_path(Path::new("a.png")), Some(OutputFormat::Png));
    assert_eq!(OutputFormat::from_path(Path::new("a.SVG")), Some(OutputFormat::Svg));
    assert_eq!(OutputFormat::from_path(Path::new("a.pdf")), None);
    assert_eq!(OutputFormat::from_path(Path::new("noext")), None);
}

#[test]
fn test_pdf_is_rejected_with_hint() {
    let err = "pdf".parse::<OutputFormat>().unwrap_err();
    assert!(err.to_string().contains("svg"));
    assert_eq!(err.field(), Some("output.format"));
}

#[test]
fn test_enum_parsing_is_case_insensitive() {
    assert_eq!("LINE".parse::<ChartKind>().unwrap(), ChartKind::Line);
    assert_eq!("Paper".parse::<StylePreset>().unwrap(), StylePreset::Paper);
    assert!("pie".parse::<ChartKind>().is_err());
}

#[test]
fn test_serde_names() {
    #[derive(serde::Deserialize)]
    struct Probe {
        kind: ChartKind,
        style: StylePreset,
        legend: LegendPosition,
    }

    let probe: Probe =
        serde_json::from_str(r#"{"kind":"bar","style":"talk","legend":"lower-left"}"#).unwrap();
    assert_eq!(probe.kind, ChartKind::Bar);
    assert_eq!(probe.style, StylePreset::Talk);
    assert_eq!(probe.legend, LegendPosition::LowerLeft);
    assert!(!LegendPosition::None.is_visible());
}

//! Integration tests for optiplot-graphs crate.
//!
//! Drawing text needs a system font. Tests that draw skip themselves on
//! hosts without one.

use optiplot_common::test_utils::{create_temp_dir, fixtures, fonts_available, init_test_logging};
use optiplot_common::{OptiplotError, OutputFormat};
use optiplot_config::{AppConfig, ChartDefinition, ChartLoader, LabelText};
use optiplot_graphs::{
    BarChartRenderer, ChartRenderer, GraphManager, LineChartRenderer, ResolvedChart,
};
use optiplot_i18n::{LabelTranslator, Locale};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

macro_rules! require_fonts {
    () => {
        if !fonts_available() {
            eprintln!("skipping: no system fonts available");
            return;
        }
    };
}

fn translator() -> LabelTranslator {
    LabelTranslator::new(Locale::Czech).unwrap()
}

fn config_in(dir: &Path) -> AppConfig {
    AppConfig {
        output_dir: dir.to_path_buf(),
        ..AppConfig::default()
    }
}

fn line_definition(id: &str) -> ChartDefinition {
    let mut definition = ChartDefinition::from_toml_str(&fixtures::line_chart_toml(id)).unwrap();
    definition.series[0].values = fixtures::best_so_far(5, 109_564.0);
    definition
}

fn bar_definition(id: &str) -> ChartDefinition {
    ChartDefinition::from_toml_str(&fixtures::bar_chart_toml(id)).unwrap()
}

#[test]
fn test_line_chart_png_has_requested_size() {
    init_test_logging();
    require_fonts!();

    let dir = create_temp_dir();
    let chart =
        ResolvedChart::resolve(&line_definition("line"), &translator(), &config_in(dir.path()))
            .unwrap();
    let png = LineChartRenderer::new().draw(&chart).unwrap();

    let image = image::load_from_memory(&png).unwrap();
    assert_eq!((image.width(), image.height()), (800, 600));
}

#[test]
fn test_bar_chart_svg_contains_category_names() {
    require_fonts!();

    let mut definition = bar_definition("bars");
    definition.output.file = PathBuf::from("bars.svg");
    let chart =
        ResolvedChart::resolve(&definition, &translator(), &AppConfig::default()).unwrap();
    assert_eq!(chart.format, OutputFormat::Svg);

    let svg = String::from_utf8(BarChartRenderer::new().draw(&chart).unwrap()).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Bez optimalizace"));
    // Multi-line names are drawn one line at a time.
    assert!(svg.contains("Cesta"));
    assert!(svg.contains("(MMAS, 59.4%)"));
}

#[test]
fn test_multi_line_legend_entry_keeps_both_lines() {
    require_fonts!();

    let mut definition = line_definition("legend");
    definition.output.file = PathBuf::from("legend.svg");
    definition.series[0].label = LabelText::Localized {
        key: "bar-path".to_string(),
        args: BTreeMap::from([
            ("optimizer".to_string(), "MMAS".to_string()),
            ("share".to_string(), "59.4%".to_string()),
        ]),
    };
    definition.chart.title = Some(LabelText::literal("Srovnání\noptimalizátorů"));

    let chart =
        ResolvedChart::resolve(&definition, &translator(), &AppConfig::default()).unwrap();
    let svg = String::from_utf8(LineChartRenderer::new().draw(&chart).unwrap()).unwrap();
    assert!(svg.contains("Cesta (MMAS, 59.4%)"));
    assert!(svg.contains("Srovnání optimalizátorů"));
}

#[test]
fn test_renderer_rejects_other_kind() {
    let chart =
        ResolvedChart::resolve(&bar_definition("bars"), &translator(), &AppConfig::default())
            .unwrap();
    let err = LineChartRenderer::new().draw(&chart).unwrap_err();
    assert!(matches!(err, OptiplotError::Graph { .. }));
}

#[tokio::test]
async fn test_render_writes_file() {
    require_fonts!();

    let dir = create_temp_dir();
    let out = dir.path().join("nested").join("out");
    let chart =
        ResolvedChart::resolve(&line_definition("line"), &translator(), &config_in(&out))
            .unwrap();

    let rendered = LineChartRenderer::new().render(&chart).await.unwrap();
    assert_eq!(rendered.path, out.join("line.png"));
    assert_eq!(rendered.format, OutputFormat::Png);
    let written = std::fs::metadata(&rendered.path).unwrap().len();
    assert!(written > 0);
    assert_eq!(written as usize, rendered.bytes);
}

#[tokio::test]
async fn test_batch_keeps_order_and_isolates_failures() {
    let dir = create_temp_dir();
    let manager = GraphManager::new(Arc::new(translator()), Arc::new(config_in(dir.path())));

    let mut broken = bar_definition("broken");
    broken.output.file = PathBuf::from("broken.png");
    if let optiplot_config::LabelText::Localized { key, .. } = &mut broken.bars[0].label {
        *key = "bar-unknown".to_string();
    }

    let definitions = vec![line_definition("first"), broken, bar_definition("last")];
    let outcomes = manager.render_all(&definitions).await;

    let ids: Vec<&str> = outcomes.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["first", "broken", "last"]);
    assert!(matches!(
        outcomes[1].result,
        Err(OptiplotError::Localization { .. })
    ));

    if fonts_available() {
        assert!(outcomes[0].is_ok());
        assert!(outcomes[2].is_ok());
    }
}

#[tokio::test]
async fn test_unwritable_output_is_an_io_error() {
    require_fonts!();

    let dir = create_temp_dir();
    // A file where the output directory should be.
    let blocker = dir.path().join("out");
    std::fs::write(&blocker, "not a directory").unwrap();

    let manager = GraphManager::new(Arc::new(translator()), Arc::new(config_in(&blocker)));
    let err = manager.render_one(&line_definition("line")).await.unwrap_err();
    assert!(matches!(err, OptiplotError::Io(_)));
}

#[tokio::test]
async fn test_every_shipped_chart_renders() {
    init_test_logging();
    require_fonts!();

    let charts_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../charts");
    let definitions: Vec<ChartDefinition> = ChartLoader::load_dir(&charts_dir)
        .await
        .unwrap()
        .into_iter()
        .map(|loaded| loaded.definition)
        .collect();

    let dir = create_temp_dir();
    let manager = GraphManager::new(Arc::new(translator()), Arc::new(config_in(dir.path())));
    let outcomes = manager.render_all(&definitions).await;

    assert_eq!(outcomes.len(), definitions.len());
    for (outcome, definition) in outcomes.iter().zip(&definitions) {
        assert_eq!(&outcome.id, definition.id());
        let rendered = outcome.result.as_ref().unwrap();
        assert!(rendered.bytes > 0, "{} is empty", rendered.path.display());
        assert_eq!(rendered.format, definition.output_format().unwrap());
    }
}

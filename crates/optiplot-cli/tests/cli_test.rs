//! Integration tests for the optiplot command.

use clap::Parser;
use optiplot_cli::{run, Cli, CliError, Command};
use optiplot_common::test_utils::{create_temp_dir, fixtures, fonts_available, init_test_logging};
use optiplot_common::{ChartKind, OptiplotError, StylePreset};
use optiplot_config::{AppConfig, ChartLoader};
use std::path::{Path, PathBuf};

fn config_in(dir: &Path) -> AppConfig {
    AppConfig {
        output_dir: dir.join("out"),
        charts_dir: dir.join("charts"),
        ..AppConfig::default()
    }
}

async fn run_args(args: &[&str], config: AppConfig) -> (Result<(), CliError>, String) {
    let mut argv = vec!["optiplot"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();
    let mut out = Vec::new();
    let result = run(cli.command, config, &mut out).await;
    (result, String::from_utf8(out).unwrap())
}

fn write_charts(dir: &Path) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join("line.toml"), fixtures::line_chart_toml("line")).unwrap();
    std::fs::write(dir.join("bars.toml"), fixtures::bar_chart_toml("bars")).unwrap();
}

#[test]
fn test_parse_subcommands() {
    let cli = Cli::try_parse_from(["optiplot", "init", "my-chart", "--kind", "bar"]).unwrap();
    assert!(matches!(
        cli.command,
        Command::Init { ref id, kind: ChartKind::Bar, force: false } if id == "my-chart"
    ));

    let cli = Cli::try_parse_from(["optiplot", "render", "a.toml", "b.yaml", "--style", "talk"])
        .unwrap();
    match cli.command {
        Command::Render { files, style, output_dir } => {
            assert_eq!(files, vec![PathBuf::from("a.toml"), PathBuf::from("b.yaml")]);
            assert_eq!(style, Some(StylePreset::Talk));
            assert!(output_dir.is_none());
        }
        other => panic!("unexpected command: {other:?}"),
    }

    let cli = Cli::try_parse_from(["optiplot", "average", "runs.txt", "-w", "500"]).unwrap();
    assert!(matches!(cli.command, Command::Average { width: Some(500), .. }));
}

#[test]
fn test_parse_rejects_bad_values() {
    assert!(Cli::try_parse_from(["optiplot", "init", "x", "--kind", "pie"]).is_err());
    assert!(Cli::try_parse_from(["optiplot", "--locale", "de", "list"]).is_err());
    assert!(Cli::try_parse_from(["optiplot", "render", "--style", "fancy"]).is_err());
    assert!(Cli::try_parse_from(["optiplot"]).is_err());
}

#[tokio::test]
async fn test_init_writes_valid_template() {
    let dir = create_temp_dir();
    let config = config_in(dir.path());

    let (result, out) = run_args(&["init", "new-chart", "--kind", "bar"], config.clone()).await;
    result.unwrap();
    let path = config.charts_dir.join("new-chart.toml");
    assert_eq!(out.trim(), path.display().to_string());

    let loaded = ChartLoader::load_file(&path).await.unwrap();
    assert_eq!(loaded.definition.kind(), ChartKind::Bar);
    assert_eq!(loaded.definition.id().as_str(), "new-chart");
}

#[tokio::test]
async fn test_init_refuses_to_overwrite() {
    let dir = create_temp_dir();
    let config = config_in(dir.path());
    let path = config.charts_dir.join("taken.toml");
    std::fs::create_dir_all(&config.charts_dir).unwrap();
    std::fs::write(&path, "keep me").unwrap();

    let (result, _) = run_args(&["init", "taken"], config.clone()).await;
    assert!(matches!(result, Err(CliError::AlreadyExists(ref p)) if p == &path));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep me");

    let (result, _) = run_args(&["init", "taken", "--force"], config).await;
    result.unwrap();
    assert!(std::fs::read_to_string(&path).unwrap().contains("id = \"taken\""));
}

#[tokio::test]
async fn test_init_rejects_bad_id() {
    let dir = create_temp_dir();
    let (result, _) = run_args(&["init", "Not_Kebab"], config_in(dir.path())).await;
    assert!(matches!(
        result,
        Err(CliError::Optiplot(OptiplotError::Validation { .. }))
    ));
}

#[tokio::test]
async fn test_average_prints_series() {
    let dir = create_temp_dir();
    let file = dir.path().join("runs.txt");
    std::fs::write(&file, "10,20,30,\n20,40,\n").unwrap();
    let file_arg = file.to_str().unwrap();

    let (result, out) = run_args(&["average", file_arg], AppConfig::default()).await;
    result.unwrap();
    assert_eq!(out, "15,30,15,\n");

    let (result, out) = run_args(&["average", file_arg, "--width", "2"], AppConfig::default()).await;
    result.unwrap();
    assert_eq!(out, "15,30,\n");
}

#[tokio::test]
async fn test_average_reports_bad_data() {
    let dir = create_temp_dir();
    let file = dir.path().join("runs.txt");
    std::fs::write(&file, "1,2\nx,3\n").unwrap();

    let (result, _) = run_args(&["average", file.to_str().unwrap()], AppConfig::default()).await;
    let err = result.unwrap_err();
    assert!(err.to_string().contains("runs.txt"));
}

#[tokio::test]
async fn test_convert_time_uses_first_run() {
    let dir = create_temp_dir();
    let file = dir.path().join("times.txt");
    std::fs::write(&file, "60, 90, 30,\n600,600,600,\n").unwrap();
    let file_arg = file.to_str().unwrap();

    let (result, out) = run_args(&["convert-time", file_arg], AppConfig::default()).await;
    result.unwrap();
    assert_eq!(out, "1,1.5,0.5,\n");

    std::fs::write(&file, "\n\n").unwrap();
    let (result, _) = run_args(&["convert-time", file_arg], AppConfig::default()).await;
    assert!(matches!(
        result,
        Err(CliError::Optiplot(OptiplotError::Data { .. }))
    ));
}

#[tokio::test]
async fn test_list_and_check() {
    let dir = create_temp_dir();
    let config = config_in(dir.path());
    write_charts(&config.charts_dir);

    let (result, out) = run_args(&["list"], config.clone()).await;
    result.unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    // Sorted by file name: bars.toml before line.toml.
    assert!(lines[0].starts_with("bars\tbar\t"));
    assert!(lines[1].starts_with("line\tline\t"));

    let (result, out) = run_args(&["check"], config).await;
    result.unwrap();
    assert!(out.ends_with("2 definitions valid\n"));
}

#[tokio::test]
async fn test_check_reports_invalid_file() {
    let dir = create_temp_dir();
    let file = dir.path().join("broken.toml");
    std::fs::write(&file, "[chart]\nid = \"broken\"\n").unwrap();

    let (result, out) = run_args(&["check", file.to_str().unwrap()], AppConfig::default()).await;
    assert!(matches!(result, Err(CliError::Optiplot(_))));
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_render_writes_every_chart() {
    init_test_logging();
    if !fonts_available() {
        eprintln!("skipping: no system fonts available");
        return;
    }

    let dir = create_temp_dir();
    let config = config_in(dir.path());
    write_charts(&config.charts_dir);

    let (result, out) = run_args(&["render", "--style", "paper"], config.clone()).await;
    result.unwrap();
    assert_eq!(out.lines().filter(|l| l.starts_with("rendered ")).count(), 2);
    assert!(config.output_dir.join("line.png").exists());
}

#[tokio::test]
async fn test_render_fails_when_a_chart_fails() {
    let dir = create_temp_dir();
    let config = config_in(dir.path());
    write_charts(&config.charts_dir);
    // A file where the output directory should be.
    std::fs::write(&config.output_dir, "not a directory").unwrap();

    let (result, out) = run_args(&["render"], config).await;
    assert!(matches!(
        result,
        Err(CliError::ChartsFailed { failed: 2, total: 2 })
    ));
    assert_eq!(out.lines().filter(|l| l.starts_with("failed ")).count(), 2);
}

#[tokio::test]
async fn test_render_keeps_going_past_a_broken_definition() {
    let dir = create_temp_dir();
    let config = config_in(dir.path());
    std::fs::create_dir_all(&config.charts_dir).unwrap();
    std::fs::write(
        config.charts_dir.join("a-good.toml"),
        fixtures::bar_chart_toml("a-good"),
    )
    .unwrap();
    std::fs::write(
        config.charts_dir.join("z-bad.toml"),
        fixtures::line_chart_toml("z-bad").replace("end = 5", "end = 700"),
    )
    .unwrap();

    let (result, out) = run_args(&["render"], config.clone()).await;
    assert!(matches!(result, Err(CliError::ChartsFailed { total: 2, .. })));
    let failures: Vec<&str> = out.lines().filter(|l| l.starts_with("failed ")).collect();
    assert!(failures.iter().any(|l| l.contains("z-bad.toml")));

    if fonts_available() {
        assert!(matches!(
            result,
            Err(CliError::ChartsFailed { failed: 1, total: 2 })
        ));
        assert!(out.contains("rendered a-good"));
        assert!(config.output_dir.join("a-good.png").exists());
    }
}

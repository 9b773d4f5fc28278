//! Command implementations.
//!
//! Commands write their report to the given writer so they can be run
//! against a buffer in tests. Logging goes through `tracing` as usual.

use crate::cli::Command;
use crate::error::{CliError, CliResult};
use optiplot_common::results::{average_runs, format_series, parse_runs, seconds_to_minutes};
use optiplot_common::{ChartId, ChartKind, OptiplotError, StylePreset};
use optiplot_config::{AppConfig, ChartDefinition, ChartLoader, ChartValidator, LoadedChart};
use optiplot_graphs::GraphManager;
use optiplot_i18n::LabelTranslator;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Runs a parsed command against resolved settings.
pub async fn run<W: Write>(command: Command, config: AppConfig, out: &mut W) -> CliResult<()> {
    match command {
        Command::Render { files, style, .. } => render(&files, style, config, out).await,
        Command::List { .. } => list(&config, out).await,
        Command::Check { files } => check(&files, &config, out).await,
        Command::Init { id, kind, force } => init(&id, kind, force, &config, out).await,
        Command::Average { file, width } => average(&file, width, out).await,
        Command::ConvertTime { file } => convert_time(&file, out).await,
    }
}

async fn load_charts(files: &[PathBuf], config: &AppConfig) -> CliResult<Vec<LoadedChart>> {
    let charts = if files.is_empty() {
        ChartLoader::load_dir(&config.charts_dir).await?
    } else {
        ChartLoader::load_paths(files).await?
    };
    Ok(charts)
}

/// Renders chart definitions and reports one line per chart.
///
/// Every definition is attempted: a file that fails to load is reported
/// like a chart that fails to render, and the command fails afterwards if
/// anything did.
pub async fn render<W: Write>(
    files: &[PathBuf],
    style: Option<StylePreset>,
    config: AppConfig,
    out: &mut W,
) -> CliResult<()> {
    let paths = if files.is_empty() {
        ChartLoader::definition_files(&config.charts_dir).await?
    } else {
        files.to_vec()
    };

    let mut failed = 0;
    let mut definitions: Vec<ChartDefinition> = Vec::with_capacity(paths.len());
    for (path, loaded) in ChartLoader::load_each(&paths).await {
        match loaded {
            Ok(loaded) => definitions.push(loaded.definition),
            Err(e) => {
                failed += 1;
                writeln!(out, "failed {}: {e}", path.display())?;
            }
        }
    }
    ChartValidator::validate_catalog(&definitions)?;

    if let Some(style) = style {
        for definition in &mut definitions {
            definition.chart.style = Some(style);
        }
    }

    let translator = LabelTranslator::new(config.locale)?;
    let manager = GraphManager::new(Arc::new(translator), Arc::new(config));
    let outcomes = manager.render_all(&definitions).await;

    for outcome in &outcomes {
        match &outcome.result {
            Ok(rendered) => writeln!(
                out,
                "rendered {} -> {} ({} bytes)",
                outcome.id,
                rendered.path.display(),
                rendered.bytes
            )?,
            Err(e) => {
                failed += 1;
                writeln!(out, "failed {}: {e}", outcome.id)?;
            }
        }
    }

    if failed > 0 {
        return Err(CliError::ChartsFailed {
            failed,
            total: paths.len(),
        });
    }
    Ok(())
}

/// Prints one tab-separated line per definition: id, kind, series or bar
/// count, point count and output file.
pub async fn list<W: Write>(config: &AppConfig, out: &mut W) -> CliResult<()> {
    for loaded in ChartLoader::load_dir(&config.charts_dir).await? {
        let chart = &loaded.definition;
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            chart.id(),
            chart.kind(),
            chart.entry_count(),
            chart.point_count(),
            chart.output.file.display()
        )?;
    }
    Ok(())
}

/// Loads and validates definitions without drawing anything.
pub async fn check<W: Write>(files: &[PathBuf], config: &AppConfig, out: &mut W) -> CliResult<()> {
    let charts = load_charts(files, config).await?;
    for loaded in &charts {
        writeln!(out, "ok {} ({})", loaded.definition.id(), loaded.source.display())?;
    }
    writeln!(out, "{} definitions valid", charts.len())?;
    Ok(())
}

/// Writes a skeleton definition for `id` into the charts directory.
pub async fn init<W: Write>(
    id: &str,
    kind: ChartKind,
    force: bool,
    config: &AppConfig,
    out: &mut W,
) -> CliResult<()> {
    let id = ChartId::new(id);
    if !id.is_kebab_case() {
        return Err(OptiplotError::validation_field(
            format!("chart id '{id}' must be kebab-case"),
            "chart.id",
        )
        .into());
    }

    let path = config.charts_dir.join(format!("{id}.toml"));
    if !force && tokio::fs::try_exists(&path).await? {
        return Err(CliError::AlreadyExists(path));
    }

    tokio::fs::create_dir_all(&config.charts_dir).await?;
    tokio::fs::write(&path, ChartDefinition::template_toml(&id, kind)).await?;
    info!(path = %path.display(), %kind, "wrote chart template");
    writeln!(out, "{}", path.display())?;
    Ok(())
}

async fn read_runs(file: &Path) -> CliResult<Vec<Vec<f64>>> {
    let content = tokio::fs::read_to_string(file).await?;
    parse_runs(&content).map_err(|e| {
        OptiplotError::with_source(format!("failed to parse {}", file.display()), e).into()
    })
}

/// Prints the column-wise average of every run in `file`.
pub async fn average<W: Write>(file: &Path, width: Option<usize>, out: &mut W) -> CliResult<()> {
    let runs = read_runs(file).await?;
    if runs.is_empty() {
        warn!(file = %file.display(), "no runs to average");
    }
    writeln!(out, "{}", format_series(&average_runs(&runs, width)))?;
    Ok(())
}

/// Prints the first run of `file` in minutes.
pub async fn convert_time<W: Write>(file: &Path, out: &mut W) -> CliResult<()> {
    let runs = read_runs(file).await?;
    let first = runs.first().ok_or_else(|| {
        OptiplotError::data(format!("{} contains no runs", file.display()))
    })?;
    writeln!(out, "{}", format_series(&seconds_to_minutes(first)))?;
    Ok(())
}

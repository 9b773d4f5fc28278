//! Command line arguments.

use clap::{Parser, Subcommand};
use optiplot_common::{ChartKind, StylePreset};
use optiplot_config::{AppConfig, ENV_CONFIG_PATH};
use optiplot_i18n::Locale;
use std::path::PathBuf;

/// Renders optimization run results as line and bar charts.
#[derive(Debug, Parser)]
#[command(name = "optiplot", author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (defaults to ./optiplot.toml when present)
    #[arg(short, long, global = true, env = ENV_CONFIG_PATH)]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "optiplot_graphs=trace"
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Language of translated labels (cs, cs-CZ, en, en-US)
    #[arg(long, global = true)]
    pub locale: Option<Locale>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render the given chart definitions, or every one in the charts directory.
    Render {
        /// Definition files (.toml, .yaml, .yml, .json)
        files: Vec<PathBuf>,

        /// Directory the images are written to
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Style preset applied to every chart, overriding their own
        #[arg(short, long)]
        style: Option<StylePreset>,
    },

    /// List the chart definitions in the charts directory.
    List {
        /// Directory to scan instead of the configured one
        #[arg(long)]
        charts_dir: Option<PathBuf>,
    },

    /// Load and validate chart definitions without rendering.
    Check {
        /// Definition files; the charts directory when empty
        files: Vec<PathBuf>,
    },

    /// Write a skeleton definition to `<charts_dir>/<ID>.toml`.
    Init {
        /// Chart id, in kebab-case
        id: String,

        /// Chart kind
        #[arg(short, long, default_value = "line")]
        kind: ChartKind,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Average several runs column-wise and print the series.
    Average {
        /// File with one comma-separated run per line
        file: PathBuf,

        /// Number of columns; the longest run when omitted
        #[arg(short, long)]
        width: Option<usize>,
    },

    /// Print the first run of a file converted from seconds to minutes.
    ConvertTime {
        /// File with one comma-separated run per line
        file: PathBuf,
    },
}

impl Cli {
    /// Applies the global flags on top of loaded settings.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }
        if let Some(locale) = self.locale {
            config.locale = locale;
        }
        if let Command::Render {
            output_dir: Some(dir),
            ..
        } = &self.command
        {
            config.output_dir.clone_from(dir);
        }
        if let Command::List {
            charts_dir: Some(dir),
        } = &self.command
        {
            config.charts_dir.clone_from(dir);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_settings() {
        let cli = Cli::try_parse_from([
            "optiplot",
            "--log-level",
            "debug",
            "--locale",
            "en",
            "render",
            "--output-dir",
            "figures",
        ])
        .unwrap();

        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.locale, Locale::English);
        assert_eq!(config.output_dir, PathBuf::from("figures"));
    }

    #[test]
    fn test_no_flags_keep_settings() {
        let cli = Cli::try_parse_from(["optiplot", "check"]).unwrap();
        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config, AppConfig::default());
    }
}

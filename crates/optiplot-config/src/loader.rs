//! Loading of application settings and chart definition files.

use crate::chart::{ChartDefinition, DefinitionFormat};
use crate::defaults::DEFAULT_CONFIG_FILE;
use crate::schema::AppConfig;
use crate::validator::ChartValidator;
use optiplot_common::{OptiplotError, Result, StylePreset};
use optiplot_i18n::Locale;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable naming the settings file.
pub const ENV_CONFIG_PATH: &str = "OPTIPLOT_CONFIG";
/// Environment override for [`AppConfig::output_dir`].
pub const ENV_OUTPUT_DIR: &str = "OPTIPLOT_OUTPUT_DIR";
/// Environment override for [`AppConfig::charts_dir`].
pub const ENV_CHARTS_DIR: &str = "OPTIPLOT_CHARTS_DIR";
/// Environment override for [`AppConfig::locale`].
pub const ENV_LOCALE: &str = "OPTIPLOT_LOCALE";
/// Environment override for [`AppConfig::default_style`].
pub const ENV_STYLE: &str = "OPTIPLOT_STYLE";
/// Environment override for the log level.
pub const ENV_LOG_LEVEL: &str = "OPTIPLOT_LOG_LEVEL";

/// Settings loader: file, then environment overrides, then validation.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads settings from `explicit`, `$OPTIPLOT_CONFIG`, `./optiplot.toml`
    /// or the defaults, in that order, and applies environment overrides.
    pub fn load(explicit: Option<&Path>) -> Result<AppConfig> {
        Self::load_with_env(explicit, |name| env::var(name).ok())
    }

    /// Same as [`ConfigLoader::load`] with a custom environment lookup.
    pub fn load_with_env<F>(explicit: Option<&Path>, lookup: F) -> Result<AppConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| lookup(ENV_CONFIG_PATH).map(PathBuf::from));

        let mut config = match path {
            Some(path) => Self::load_file(&path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::load_file(DEFAULT_CONFIG_FILE)?,
            None => {
                debug!("no settings file, using defaults");
                AppConfig::default()
            }
        };

        Self::apply_env_overrides(&mut config, lookup)?;
        ChartValidator::validate_settings(&config)?;
        Ok(config)
    }

    /// Reads and parses a settings file without overrides.
    pub fn load_file(path: impl AsRef<Path>) -> Result<AppConfig> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            OptiplotError::config_with_source(format!("failed to read {}", path.display()), e)
        })?;
        let config = Self::from_toml_str(&content).map_err(|e| {
            OptiplotError::config_with_source(format!("failed to parse {}", path.display()), e)
        })?;
        info!(path = %path.display(), "loaded settings");
        Ok(config)
    }

    /// Parses settings from TOML text.
    pub fn from_toml_str(input: &str) -> Result<AppConfig> {
        Ok(toml::from_str(input)?)
    }

    fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_OUTPUT_DIR) {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(ENV_CHARTS_DIR) {
            config.charts_dir = PathBuf::from(dir);
        }
        if let Some(locale) = lookup(ENV_LOCALE) {
            config.locale = locale.parse::<Locale>().map_err(|e| {
                OptiplotError::config_with_source(format!("invalid {ENV_LOCALE}"), e)
            })?;
        }
        if let Some(style) = lookup(ENV_STYLE) {
            config.default_style = style.parse::<StylePreset>().map_err(|e| {
                OptiplotError::config_with_source(format!("invalid {ENV_STYLE}"), e)
            })?;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            config.logging.level = level;
        }
        Ok(())
    }
}

/// A chart definition together with the file it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedChart {
    /// Definition file.
    pub source: PathBuf,
    /// Parsed and validated definition.
    pub definition: ChartDefinition,
}

/// Loader for chart definition files.
pub struct ChartLoader;

impl ChartLoader {
    /// Loads and validates one definition file.
    pub async fn load_file(path: impl AsRef<Path>) -> Result<LoadedChart> {
        let path = path.as_ref();
        let format = DefinitionFormat::from_path(path).ok_or_else(|| {
            OptiplotError::config(format!(
                "{}: unsupported definition format, expected .toml, .yaml, .yml or .json",
                path.display()
            ))
        })?;

        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            OptiplotError::config_with_source(format!("failed to read {}", path.display()), e)
        })?;
        let definition = format.parse(&content).map_err(|e| in_file(path, e))?;
        ChartValidator::validate(&definition).map_err(|e| in_file(path, e))?;

        debug!(
            path = %path.display(),
            id = %definition.id(),
            kind = %definition.kind(),
            points = definition.point_count(),
            "loaded chart definition"
        );
        Ok(LoadedChart {
            source: path.to_path_buf(),
            definition,
        })
    }

    /// Loads the given files in order and checks them as one catalog.
    pub async fn load_paths(paths: &[PathBuf]) -> Result<Vec<LoadedChart>> {
        let mut charts = Vec::with_capacity(paths.len());
        for path in paths {
            charts.push(Self::load_file(path).await?);
        }
        ChartValidator::validate_catalog(charts.iter().map(|c| &c.definition))?;
        Ok(charts)
    }

    /// Loads each file on its own, keeping every file's outcome in input
    /// order. No catalog check is made.
    pub async fn load_each(paths: &[PathBuf]) -> Vec<(PathBuf, Result<LoadedChart>)> {
        let mut outcomes = Vec::with_capacity(paths.len());
        for path in paths {
            let loaded = Self::load_file(path).await;
            if let Err(e) = &loaded {
                warn!(path = %path.display(), error = %e, "skipping chart definition");
            }
            outcomes.push((path.clone(), loaded));
        }
        outcomes
    }

    /// Loads every definition file in `dir`, sorted by file name.
    ///
    /// Files with other extensions are ignored.
    pub async fn load_dir(dir: impl AsRef<Path>) -> Result<Vec<LoadedChart>> {
        let paths = Self::definition_files(dir.as_ref()).await?;
        info!(dir = %dir.as_ref().display(), count = paths.len(), "loading chart definitions");
        Self::load_paths(&paths).await
    }

    /// Definition files in `dir`, sorted by file name.
    pub async fn definition_files(dir: &Path) -> Result<Vec<PathBuf>> {
        let mut entries = tokio::fs::read_dir(dir).await.map_err(|e| {
            OptiplotError::config_with_source(
                format!("failed to read chart directory {}", dir.display()),
                e,
            )
        })?;

        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if entry.file_type().await?.is_file() && DefinitionFormat::from_path(&path).is_some() {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }
}

/// Prefixes an error with the definition file it came from, keeping the
/// field of validation errors.
fn in_file(path: &Path, err: OptiplotError) -> OptiplotError {
    match err {
        OptiplotError::Validation { message, field } => OptiplotError::Validation {
            message: format!("{}: {message}", path.display()),
            field,
        },
        other => OptiplotError::config_with_source(format!("invalid {}", path.display()), other),
    }
}

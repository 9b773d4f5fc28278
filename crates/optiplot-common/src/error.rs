//! Error types and utilities for optiplot

use thiserror::Error;

/// Result type alias for optiplot operations
pub type Result<T> = std::result::Result<T, OptiplotError>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for optiplot operations
#[derive(Error, Debug)]
pub enum OptiplotError {
    /// Configuration and chart definition loading errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Chart drawing errors
    #[error("Graph error: {message}")]
    Graph {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Translation errors
    #[error("Localization error: {message}")]
    Localization {
        message: String,
        locale: Option<String>,
    },

    /// Validation errors for chart definitions and settings
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Malformed run-result data
    #[error("Data error: {message}")]
    Data {
        message: String,
        line: Option<usize>,
    },

    /// Generic error with custom message
    #[error("{message}")]
    Generic {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },
}

impl OptiplotError {
    /// Create a new generic error with a custom message
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new generic error with a custom message and source
    pub fn with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Generic {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new graph error
    pub fn graph(msg: impl Into<String>) -> Self {
        Self::Graph {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new graph error with source
    pub fn graph_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Graph {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new localization error
    pub fn localization(msg: impl Into<String>) -> Self {
        Self::Localization {
            message: msg.into(),
            locale: None,
        }
    }

    /// Create a new localization error with locale
    pub fn localization_with_locale(msg: impl Into<String>, locale: impl Into<String>) -> Self {
        Self::Localization {
            message: msg.into(),
            locale: Some(locale.into()),
        }
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new data error
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data {
            message: msg.into(),
            line: None,
        }
    }

    /// Create a new data error pointing at a 1-based input line
    pub fn data_at_line(msg: impl Into<String>, line: usize) -> Self {
        Self::Data {
            message: msg.into(),
            line: Some(line),
        }
    }

    /// Field name attached to a validation error, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => field.as_deref(),
            _ => None,
        }
    }
}

/// Convert from toml::de::Error to OptiplotError
impl From<toml::de::Error> for OptiplotError {
    fn from(err: toml::de::Error) -> Self {
        Self::config_with_source("TOML parsing error", err)
    }
}

/// Convert from serde_yaml::Error to OptiplotError
impl From<serde_yaml::Error> for OptiplotError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::config_with_source("YAML parsing error", err)
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to OptiplotError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for OptiplotError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::graph_with_source("Chart rendering failed", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_error_creation() {
        let error = OptiplotError::new("test message");
        assert!(error.to_string().contains("test message"));

        let config_error = OptiplotError::config("config issue");
        assert!(config_error.to_string().contains("Configuration error"));
        assert!(config_error.to_string().contains("config issue"));

        let validation_error = OptiplotError::validation_field("Invalid input", "series[0].range");
        assert!(validation_error.to_string().contains("Validation error"));
        assert_eq!(validation_error.field(), Some("series[0].range"));

        let localization_error =
            OptiplotError::localization_with_locale("Translation missing", "cs-CZ");
        assert!(localization_error.to_string().contains("Localization error"));
    }

    #[test]
    fn test_error_with_source() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let wrapped_error = OptiplotError::with_source("Failed to read file", io_error);

        assert!(wrapped_error.to_string().contains("Failed to read file"));
        assert!(wrapped_error.source().is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "read-only");
        let error: OptiplotError = io_error.into();

        assert!(error.to_string().contains("I/O error"));
        assert!(error.source().is_some());
        assert!(matches!(error, OptiplotError::Io(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let err = toml::from_str::<toml::Value>("key = ").unwrap_err();
        let error: OptiplotError = err.into();

        assert!(matches!(error, OptiplotError::Config { .. }));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_error_display_formatting() {
        assert_eq!(format!("{}", OptiplotError::new("plain")), "plain");
        assert_eq!(
            format!("{}", OptiplotError::config("missing field")),
            "Configuration error: missing field"
        );
        assert_eq!(
            format!("{}", OptiplotError::data_at_line("bad number", 3)),
            "Data error: bad number"
        );
    }
}
